use chrono::NaiveDate;

use crate::error::{ClientbookError, Result};

/// Keywords that mark a row as the header row when found in any cell.
pub const HEADER_KEYWORDS: &[&str] = &["업체명", "상호", "잔액", "일자", "날짜"];

/// Only the top of the block is scanned for a header.
const HEADER_SCAN_LIMIT: usize = 20;

/// Trim a raw cell and blank out spreadsheet-export artifacts.
pub fn normalize_cell(raw: &str) -> String {
    let s = raw.trim();
    match s {
        "nan" | "None" | "NaN" | "NaT" => String::new(),
        _ => s.to_string(),
    }
}

/// Coerce currency-formatted text to a number: "1,304,689,660원" -> 1304689660.
/// Everything that is not a digit, decimal point or minus sign is stripped;
/// anything unparseable (including the empty string) is 0.
pub fn parse_number(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse().unwrap_or(0.0)
}

/// Parse a date cell. Sheets mix `2025-01-15`, `2025.01.15` and `2025/01/15`,
/// sometimes with a time suffix; only the date part matters here.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let head = raw.trim().split_whitespace().next()?;
    for fmt in ["%Y-%m-%d", "%Y.%m.%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(head, fmt) {
            return Some(d);
        }
    }
    None
}

/// Find the header row in a raw block. A row containing any header keyword
/// wins; failing that, the first row with any non-empty cell. Returns None
/// when the scanned rows are entirely blank.
pub fn locate_header(block: &[Vec<String>]) -> Option<usize> {
    let limit = block.len().min(HEADER_SCAN_LIMIT);
    for (i, row) in block.iter().take(limit).enumerate() {
        if row
            .iter()
            .any(|cell| HEADER_KEYWORDS.iter().any(|k| cell.contains(k)))
        {
            return Some(i);
        }
    }
    (0..limit).find(|&i| block[i].iter().any(|cell| !cell.trim().is_empty()))
}

/// A sheet after header promotion: trimmed column names and normalized rows,
/// every row padded/truncated to the header width.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Promote the located header row to column names and keep the rows
    /// beneath it. An entirely empty block yields an empty table (the sheet
    /// exists but holds nothing); a block with content but no locatable
    /// header is an error.
    pub fn from_block(block: &[Vec<String>], sheet: &str) -> Result<Self> {
        if block.is_empty() {
            return Ok(Self::default());
        }
        let header = locate_header(block)
            .ok_or_else(|| ClientbookError::HeaderNotFound(sheet.to_string()))?;
        let columns: Vec<String> = block[header]
            .iter()
            .map(|c| c.trim().to_string())
            .collect();
        let width = columns.len();
        let rows: Vec<Vec<String>> = block[header + 1..]
            .iter()
            .map(|r| {
                let mut row: Vec<String> =
                    r.iter().take(width).map(|c| normalize_cell(c)).collect();
                row.resize(width, String::new());
                row
            })
            .filter(|r| r.iter().any(|c| !c.is_empty()))
            .collect();
        Ok(Self { columns, rows })
    }

    /// First column whose name contains any candidate substring, in declared
    /// column order. No ranking by specificity.
    pub fn find_col(&self, keywords: &[&str]) -> Option<usize> {
        self.columns
            .iter()
            .position(|col| keywords.iter().any(|k| col.contains(k)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("1,304,689,660원"), 1304689660.0);
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("abc"), 0.0);
        assert_eq!(parse_number("-42,000"), -42000.0);
        assert_eq!(parse_number("1234.5"), 1234.5);
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 1, 15);
        assert_eq!(parse_date("2025-01-15"), expected);
        assert_eq!(parse_date("2025.01.15"), expected);
        assert_eq!(parse_date("2025/01/15"), expected);
        assert_eq!(parse_date("2025-01-15 09:30:00"), expected);
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("2025-02-30"), None);
    }

    #[test]
    fn test_locate_header_prefers_keyword_row() {
        let b = block(&[
            &["거래처 관리 대장", "", ""],
            &["", "", ""],
            &["업체명", "잔액", "비고"],
            &["한빛상사", "1,000원", ""],
        ]);
        assert_eq!(locate_header(&b), Some(2));
    }

    #[test]
    fn test_locate_header_falls_back_to_first_nonempty_row() {
        let b = block(&[
            &["", "", ""],
            &["", "", ""],
            &["a", "b", "c"],
            &["1", "2", "3"],
        ]);
        assert_eq!(locate_header(&b), Some(2));
    }

    #[test]
    fn test_locate_header_all_blank_is_none() {
        let b = block(&[&["", ""], &["  ", ""]]);
        assert_eq!(locate_header(&b), None);
    }

    #[test]
    fn test_from_block_promotes_header_and_drops_preamble() {
        let b = block(&[
            &["", "", ""],
            &["업체명 ", "잔액", "상태"],
            &["한빛상사", "1,000원", ""],
            &["", "", ""],
            &["nan", "NaN", "NaT"],
            &["동서무역", "2,500원", "거래 종료"],
        ]);
        let t = Table::from_block(&b, "요약").unwrap();
        assert_eq!(t.columns, vec!["업체명", "잔액", "상태"]);
        assert_eq!(t.rows.len(), 2);
        assert_eq!(t.rows[1][0], "동서무역");
    }

    #[test]
    fn test_from_block_empty_block_is_empty_table() {
        let t = Table::from_block(&[], "요약").unwrap();
        assert!(t.rows.is_empty());
        assert!(t.columns.is_empty());
    }

    #[test]
    fn test_from_block_blank_rows_error() {
        let b = block(&[&["", ""], &["", ""]]);
        let err = Table::from_block(&b, "요약").unwrap_err();
        assert!(err.to_string().contains("요약"));
    }

    #[test]
    fn test_find_col_matches_after_trim() {
        // Column arrives with a trailing space in the raw sheet; trimming at
        // header promotion keeps the substring match working.
        let b = block(&[&["업체명", "잔액 "], &["한빛상사", "100"]]);
        let t = Table::from_block(&b, "요약").unwrap();
        assert_eq!(t.find_col(&["잔액"]), Some(1));
    }

    #[test]
    fn test_find_col_first_match_in_column_order() {
        let b = block(&[&["비고", "상태"], &["x", "y"]]);
        let t = Table::from_block(&b, "요약").unwrap();
        assert_eq!(t.find_col(&["상태", "비고"]), Some(0));
        assert_eq!(t.find_col(&["전화"]), None);
    }

    #[test]
    fn test_ragged_rows_are_padded_to_header_width() {
        let b = block(&[&["업체명", "잔액", "상태"], &["한빛상사"]]);
        let t = Table::from_block(&b, "요약").unwrap();
        assert_eq!(t.rows[0].len(), 3);
        assert_eq!(t.rows[0][2], "");
    }
}
