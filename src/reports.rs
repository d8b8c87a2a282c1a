use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::models::{Company, Transaction};
use crate::sheet::parse_date;

/// Status markers meaning a client relationship has ended or is suspended.
fn closed_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("종료|중단").unwrap())
}

pub fn is_active(company: &Company) -> bool {
    !closed_marker().is_match(company.status.trim())
}

/// Companies visible in a view. `show_all` opts in to ended/suspended rows.
pub fn visible_companies(companies: &[Company], show_all: bool) -> Vec<&Company> {
    companies
        .iter()
        .filter(|c| show_all || is_active(c))
        .collect()
}

/// First company with an exactly matching name. Uniqueness is assumed but
/// never enforced in the sheet, so first match wins.
pub fn find_company<'a>(companies: &'a [Company], name: &str) -> Option<&'a Company> {
    companies.iter().find(|c| c.name == name)
}

pub fn company_history<'a>(txns: &'a [Transaction], name: &str) -> Vec<&'a Transaction> {
    txns.iter().filter(|t| t.company == name).collect()
}

// ---------------------------------------------------------------------------
// Monthly aggregation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyRow {
    pub month: String,
    pub sales: f64,
    pub collection: f64,
    pub balance: f64,
}

/// Bucket transactions by year-month and sum the amount columns. Rows with
/// unparseable dates are dropped. Buckets come out in chronological order.
pub fn monthly_summary(history: &[&Transaction]) -> Vec<MonthlyRow> {
    let mut buckets: BTreeMap<String, (f64, f64, f64)> = BTreeMap::new();
    for t in history {
        let Some(date) = parse_date(&t.date) else {
            continue;
        };
        let entry = buckets.entry(date.format("%Y-%m").to_string()).or_default();
        entry.0 += t.sales;
        entry.1 += t.collection;
        entry.2 += t.balance;
    }
    buckets
        .into_iter()
        .map(|(month, (sales, collection, balance))| MonthlyRow {
            month,
            sales,
            collection,
            balance,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Roll-up stats for the status command and dashboard home
// ---------------------------------------------------------------------------

pub struct BookStats {
    pub companies: usize,
    pub active: usize,
    pub transactions: usize,
    pub outstanding: f64,
}

pub fn book_stats(companies: &[Company], txns: &[Transaction]) -> BookStats {
    BookStats {
        companies: companies.len(),
        active: companies.iter().filter(|c| is_active(c)).count(),
        transactions: txns.len(),
        outstanding: companies
            .iter()
            .filter(|c| is_active(c))
            .map(|c| c.balance)
            .sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn company(name: &str, status: &str, balance: f64) -> Company {
        Company {
            name: name.to_string(),
            status: status.to_string(),
            balance,
            ..Default::default()
        }
    }

    fn txn(company: &str, date: &str, sales: f64, collection: f64) -> Transaction {
        Transaction {
            company: company.to_string(),
            date: date.to_string(),
            sales,
            collection,
            ..Default::default()
        }
    }

    #[test]
    fn test_status_filter_excludes_ended_and_suspended() {
        let companies = vec![
            company("한빛상사", "", 100.0),
            company("동서무역", "거래 종료", 200.0),
            company("남도물산", " 중단 ", 300.0),
        ];
        let active = visible_companies(&companies, false);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "한빛상사");

        let all = visible_companies(&companies, true);
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_find_company_takes_first_match() {
        let companies = vec![company("한빛상사", "", 1.0), company("한빛상사", "", 2.0)];
        let found = find_company(&companies, "한빛상사").unwrap();
        assert_eq!(found.balance, 1.0);
        assert!(find_company(&companies, "없는업체").is_none());
    }

    #[test]
    fn test_company_history_joins_by_name() {
        let txns = vec![
            txn("한빛상사", "2025-01-05", 100.0, 0.0),
            txn("동서무역", "2025-01-06", 50.0, 0.0),
            txn("한빛상사", "2025-02-01", 200.0, 150.0),
        ];
        let history = company_history(&txns, "한빛상사");
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_monthly_summary_sums_same_month_into_one_bucket() {
        let txns = vec![
            txn("한빛상사", "2025-01-05", 100.0, 10.0),
            txn("한빛상사", "2025-01-20", 200.0, 20.0),
        ];
        let history: Vec<&Transaction> = txns.iter().collect();
        let rows = monthly_summary(&history);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].month, "2025-01");
        assert_eq!(rows[0].sales, 300.0);
        assert_eq!(rows[0].collection, 30.0);
    }

    #[test]
    fn test_monthly_summary_is_chronological() {
        let txns = vec![
            txn("한빛상사", "2025-03-01", 3.0, 0.0),
            txn("한빛상사", "2024-12-31", 1.0, 0.0),
            txn("한빛상사", "2025-01-15", 2.0, 0.0),
        ];
        let history: Vec<&Transaction> = txns.iter().collect();
        let months: Vec<String> = monthly_summary(&history)
            .into_iter()
            .map(|r| r.month)
            .collect();
        assert_eq!(months, vec!["2024-12", "2025-01", "2025-03"]);
    }

    #[test]
    fn test_monthly_summary_drops_invalid_dates() {
        let txns = vec![
            txn("한빛상사", "미정", 100.0, 0.0),
            txn("한빛상사", "2025.01.05", 50.0, 0.0),
        ];
        let history: Vec<&Transaction> = txns.iter().collect();
        let rows = monthly_summary(&history);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].sales, 50.0);
    }

    #[test]
    fn test_book_stats_outstanding_counts_active_only() {
        let companies = vec![
            company("한빛상사", "", 100.0),
            company("동서무역", "종료", 999.0),
        ];
        let stats = book_stats(&companies, &[]);
        assert_eq!(stats.companies, 2);
        assert_eq!(stats.active, 1);
        assert_eq!(stats.outstanding, 100.0);
    }
}
