//! Calendar-month bucketing
//!
//! Month keys are `YYYY-MM` strings, so lexicographic order is
//! chronological order and they can be used directly as grouping keys.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Utc};

use crate::models::CategorizedTransaction;

/// Month key (`YYYY-MM`) for a date.
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Group transactions by month key.
pub fn bucket_by_month(
    transactions: &[CategorizedTransaction],
) -> BTreeMap<String, Vec<&CategorizedTransaction>> {
    let mut buckets: BTreeMap<String, Vec<&CategorizedTransaction>> = BTreeMap::new();
    for tx in transactions {
        buckets.entry(month_key(tx.date)).or_default().push(tx);
    }
    buckets
}

/// The `n` month keys ending at the anchor's month, chronological order.
pub fn month_span(anchor: NaiveDate, n: usize) -> Vec<String> {
    let mut year = anchor.year();
    let mut month = anchor.month() as i32;
    let mut keys = Vec::with_capacity(n);
    for _ in 0..n {
        keys.push(format!("{:04}-{:02}", year, month));
        month -= 1;
        if month == 0 {
            month = 12;
            year -= 1;
        }
    }
    keys.reverse();
    keys
}

/// Dense series of exactly `n` month keys for an expense ledger.
///
/// The anchor is the latest transaction date, or today when the ledger is
/// empty. Every month is present even if it has no transactions; callers
/// zero-fill the totals.
pub fn dense_months(expense: &[CategorizedTransaction], n: usize) -> Vec<String> {
    let anchor = expense
        .iter()
        .map(|tx| tx.date)
        .max()
        .unwrap_or_else(|| Utc::now().date_naive());
    month_span(anchor, n)
}

/// Latest month key present in the ledger, if any.
pub fn latest_month(transactions: &[CategorizedTransaction]) -> Option<String> {
    transactions.iter().map(|tx| tx.date).max().map(month_key)
}

/// Total expense per month, keyed by month key.
pub fn monthly_totals(expense: &[CategorizedTransaction]) -> BTreeMap<String, f64> {
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for tx in expense {
        *totals.entry(month_key(tx.date)).or_default() += tx.amount;
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(date: &str, amount: f64) -> CategorizedTransaction {
        CategorizedTransaction {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            merchant: "TEST".to_string(),
            amount,
            category: "Other".to_string(),
        }
    }

    #[test]
    fn test_month_key_zero_pads() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        assert_eq!(month_key(date), "2026-03");
    }

    #[test]
    fn test_month_span_crosses_year_boundary() {
        let anchor = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
        assert_eq!(
            month_span(anchor, 4),
            vec!["2025-11", "2025-12", "2026-01", "2026-02"]
        );
    }

    #[test]
    fn test_dense_months_exact_length_and_order() {
        let expense = vec![tx("2026-06-01", 10.0), tx("2026-08-15", 20.0)];
        let months = dense_months(&expense, 6);
        assert_eq!(months.len(), 6);
        assert_eq!(months.last().unwrap(), "2026-08");
        let mut sorted = months.clone();
        sorted.sort();
        assert_eq!(months, sorted);
    }

    #[test]
    fn test_dense_months_empty_ledger_anchors_on_today() {
        let months = dense_months(&[], 3);
        assert_eq!(months.len(), 3);
        assert_eq!(
            months.last().unwrap(),
            &month_key(Utc::now().date_naive())
        );
    }

    #[test]
    fn test_bucket_by_month_groups_rows() {
        let expense = vec![
            tx("2026-07-01", 10.0),
            tx("2026-07-20", 20.0),
            tx("2026-08-02", 5.0),
        ];
        let buckets = bucket_by_month(&expense);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets["2026-07"].len(), 2);
        assert_eq!(buckets["2026-08"].len(), 1);
    }

    #[test]
    fn test_monthly_totals_sums_per_month() {
        let expense = vec![
            tx("2026-07-01", 10.0),
            tx("2026-07-20", 20.0),
            tx("2026-08-02", 5.0),
        ];
        let totals = monthly_totals(&expense);
        assert_eq!(totals["2026-07"], 30.0);
        assert_eq!(totals["2026-08"], 5.0);
    }
}
