use crate::error::{ClientbookError, Result};
use crate::sheet::{parse_number, Table};

// Candidate column-name substrings. Sheet headers drift between revisions
// of the workbook, so every field is resolved by fuzzy keyword match.
pub const NAME_KEYWORDS: &[&str] = &["업체명", "상호"];
pub const STATUS_KEYWORDS: &[&str] = &["상태", "비고", "구분"];
pub const MANAGER_KEYWORDS: &[&str] = &["담당자", "대표", "성함"];
pub const PHONE_KEYWORDS: &[&str] = &["연락처", "전화", "휴대폰"];
pub const CONTENT_KEYWORDS: &[&str] = &["내용", "품목", "거래내용"];
pub const BALANCE_KEYWORDS: &[&str] = &["잔액", "잔고", "미수"];
pub const DATE_KEYWORDS: &[&str] = &["일자", "날짜", "거래일"];
pub const SALES_KEYWORDS: &[&str] = &["매출"];
pub const COLLECTION_KEYWORDS: &[&str] = &["수금", "입금"];
pub const MEMO_KEYWORDS: &[&str] = &["적요", "메모", "비고"];

#[derive(Debug, Clone, Default)]
pub struct Company {
    pub name: String,
    pub manager: String,
    pub phone: String,
    pub content: String,
    pub balance: f64,
    pub status: String,
}

#[derive(Debug, Clone, Default)]
pub struct Transaction {
    pub company: String,
    pub date: String,
    pub sales: f64,
    pub collection: f64,
    pub balance: f64,
    pub memo: String,
}

fn text(row: &[String], idx: Option<usize>) -> String {
    idx.and_then(|i| row.get(i)).cloned().unwrap_or_default()
}

fn amount(row: &[String], idx: Option<usize>) -> f64 {
    idx.and_then(|i| row.get(i))
        .map(|c| parse_number(c))
        .unwrap_or(0.0)
}

/// Build company records from the summary tab. The name column is required;
/// every other field degrades to blank/zero when its column is absent.
pub fn companies_from(table: &Table, sheet: &str) -> Result<Vec<Company>> {
    if table.columns.is_empty() {
        return Ok(Vec::new());
    }
    let name = table.find_col(NAME_KEYWORDS).ok_or_else(|| {
        ClientbookError::MissingColumn(sheet.to_string(), NAME_KEYWORDS.join("/"))
    })?;
    let manager = table.find_col(MANAGER_KEYWORDS);
    let phone = table.find_col(PHONE_KEYWORDS);
    let content = table.find_col(CONTENT_KEYWORDS);
    let balance = table.find_col(BALANCE_KEYWORDS);
    let status = table.find_col(STATUS_KEYWORDS);

    Ok(table
        .rows
        .iter()
        .filter(|row| !row[name].is_empty())
        .map(|row| Company {
            name: row[name].clone(),
            manager: text(row, manager),
            phone: text(row, phone),
            content: text(row, content),
            balance: amount(row, balance),
            status: text(row, status),
        })
        .collect())
}

/// Build transaction records from the history tab. The company column is
/// required so rows can be joined back to a client by name.
pub fn transactions_from(table: &Table, sheet: &str) -> Result<Vec<Transaction>> {
    if table.columns.is_empty() {
        return Ok(Vec::new());
    }
    let company = table.find_col(NAME_KEYWORDS).ok_or_else(|| {
        ClientbookError::MissingColumn(sheet.to_string(), NAME_KEYWORDS.join("/"))
    })?;
    let date = table.find_col(DATE_KEYWORDS);
    let sales = table.find_col(SALES_KEYWORDS);
    let collection = table.find_col(COLLECTION_KEYWORDS);
    let balance = table.find_col(BALANCE_KEYWORDS);
    let memo = table.find_col(MEMO_KEYWORDS);

    Ok(table
        .rows
        .iter()
        .filter(|row| !row[company].is_empty())
        .map(|row| Transaction {
            company: row[company].clone(),
            date: text(row, date),
            sales: amount(row, sales),
            collection: amount(row, collection),
            balance: amount(row, balance),
            memo: text(row, memo),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(header: &[&str], rows: &[&[&str]]) -> Table {
        let mut block: Vec<Vec<String>> =
            vec![header.iter().map(|c| c.to_string()).collect()];
        for r in rows {
            block.push(r.iter().map(|c| c.to_string()).collect());
        }
        Table::from_block(&block, "test").unwrap()
    }

    #[test]
    fn test_companies_from_resolves_fuzzy_columns() {
        let t = table(
            &["거래처 상호", "대표 성함", "전화번호", "주요 품목", "미수 잔액", "비고"],
            &[&["한빛상사", "김한빛", "010-1234-5678", "전자부품", "1,304,689,660원", ""]],
        );
        let companies = companies_from(&t, "요약").unwrap();
        assert_eq!(companies.len(), 1);
        let c = &companies[0];
        assert_eq!(c.name, "한빛상사");
        assert_eq!(c.manager, "김한빛");
        assert_eq!(c.phone, "010-1234-5678");
        assert_eq!(c.content, "전자부품");
        assert_eq!(c.balance, 1304689660.0);
    }

    #[test]
    fn test_companies_from_missing_name_column_errors() {
        let t = table(&["담당자", "잔액"], &[&["김한빛", "100"]]);
        let err = companies_from(&t, "요약").unwrap_err();
        assert!(err.to_string().contains("요약"));
    }

    #[test]
    fn test_companies_from_missing_optional_columns_default() {
        let t = table(&["업체명"], &[&["한빛상사"]]);
        let companies = companies_from(&t, "요약").unwrap();
        assert_eq!(companies[0].balance, 0.0);
        assert!(companies[0].status.is_empty());
    }

    #[test]
    fn test_companies_from_skips_nameless_rows() {
        let t = table(&["업체명", "잔액"], &[&["", "100"], &["한빛상사", "200"]]);
        let companies = companies_from(&t, "요약").unwrap();
        assert_eq!(companies.len(), 1);
    }

    #[test]
    fn test_transactions_from_coerces_amounts() {
        let t = table(
            &["업체명", "거래일자", "매출액", "수금액", "잔액", "적요"],
            &[
                &["한빛상사", "2025-01-15", "500,000원", "abc", "500,000", "1월 납품"],
                &["한빛상사", "2025-01-20", "", "300,000원", "200,000", ""],
            ],
        );
        let txns = transactions_from(&t, "거래내역").unwrap();
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].sales, 500000.0);
        assert_eq!(txns[0].collection, 0.0);
        assert_eq!(txns[1].collection, 300000.0);
        assert_eq!(txns[1].sales, 0.0);
    }

    #[test]
    fn test_empty_table_yields_no_records() {
        let t = Table::default();
        assert!(companies_from(&t, "요약").unwrap().is_empty());
        assert!(transactions_from(&t, "거래내역").unwrap().is_empty());
    }
}
