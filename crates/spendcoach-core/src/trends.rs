//! Multi-month trend aggregation and month-over-month comparison

use std::collections::BTreeMap;

use crate::models::{CategorizedTransaction, CategoryDelta, TrendsReport};
use crate::months::{dense_months, month_key, monthly_totals};

/// Dense month series of expense totals with an aligned per-category
/// breakdown.
///
/// Every month in the window is present even with zero activity, and every
/// category series has one entry per month (0 where the category was
/// inactive).
pub fn spending_trends(expense: &[CategorizedTransaction], n_months: usize) -> TrendsReport {
    let months = dense_months(expense, n_months);
    let totals_by_month = monthly_totals(expense);
    let totals = months
        .iter()
        .map(|m| totals_by_month.get(m).copied().unwrap_or(0.0))
        .collect();

    let mut category_month: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
    for tx in expense {
        *category_month
            .entry(tx.category.clone())
            .or_default()
            .entry(month_key(tx.date))
            .or_default() += tx.amount;
    }

    let by_category = category_month
        .into_iter()
        .map(|(category, sums)| {
            let series = months
                .iter()
                .map(|m| sums.get(m).copied().unwrap_or(0.0))
                .collect();
            (category, series)
        })
        .collect();

    TrendsReport {
        months,
        totals,
        by_category,
    }
}

/// Per-category spend deltas between `current_period` and the month
/// immediately before it in the ledger's sorted distinct-month list.
///
/// That previous month is not necessarily calendar-adjacent: a month with
/// zero transactions has no bucket and is skipped over. Returns empty when
/// the current period is absent or fewer than two distinct months exist.
pub fn compare_months(
    expense: &[CategorizedTransaction],
    current_period: &str,
) -> Vec<CategoryDelta> {
    if expense.is_empty() {
        return Vec::new();
    }

    let mut months: Vec<String> = expense.iter().map(|tx| month_key(tx.date)).collect();
    months.sort();
    months.dedup();

    let cur_idx = match months.iter().position(|m| m == current_period) {
        Some(i) if months.len() >= 2 && i > 0 => i,
        _ => return Vec::new(),
    };
    let prev_period = &months[cur_idx - 1];

    let mut current: BTreeMap<String, f64> = BTreeMap::new();
    let mut previous: BTreeMap<String, f64> = BTreeMap::new();
    for tx in expense {
        let month = month_key(tx.date);
        if month == current_period {
            *current.entry(tx.category.clone()).or_default() += tx.amount;
        } else if &month == prev_period {
            *previous.entry(tx.category.clone()).or_default() += tx.amount;
        }
    }

    let mut categories: Vec<String> = current.keys().chain(previous.keys()).cloned().collect();
    categories.sort();
    categories.dedup();

    let mut deltas: Vec<CategoryDelta> = categories
        .into_iter()
        .map(|category| {
            let this_month = current.get(&category).copied().unwrap_or(0.0);
            let prev_month = previous.get(&category).copied().unwrap_or(0.0);
            CategoryDelta {
                category,
                this_month,
                prev_month,
                delta: this_month - prev_month,
            }
        })
        .collect();

    deltas.sort_by(|a, b| {
        b.this_month
            .partial_cmp(&a.this_month)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    deltas
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(date: &str, category: &str, amount: f64) -> CategorizedTransaction {
        CategorizedTransaction {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            merchant: "TEST".to_string(),
            amount,
            category: category.to_string(),
        }
    }

    #[test]
    fn test_trends_zero_fills_missing_months() {
        // Activity in the first and last of a 4-month window only.
        let expense = vec![tx("2026-04-10", "Dining", 50.0), tx("2026-07-10", "Dining", 80.0)];
        let report = spending_trends(&expense, 4);

        assert_eq!(report.months, vec!["2026-04", "2026-05", "2026-06", "2026-07"]);
        assert_eq!(report.totals, vec![50.0, 0.0, 0.0, 80.0]);
        assert_eq!(report.by_category["Dining"], vec![50.0, 0.0, 0.0, 80.0]);
    }

    #[test]
    fn test_trends_category_series_aligned() {
        let expense = vec![
            tx("2026-06-10", "Coffee", 20.0),
            tx("2026-07-10", "Dining", 80.0),
        ];
        let report = spending_trends(&expense, 2);
        assert_eq!(report.by_category["Coffee"], vec![20.0, 0.0]);
        assert_eq!(report.by_category["Dining"], vec![0.0, 80.0]);
    }

    #[test]
    fn test_trends_empty_ledger_has_dense_months() {
        let report = spending_trends(&[], 3);
        assert_eq!(report.months.len(), 3);
        assert_eq!(report.totals, vec![0.0, 0.0, 0.0]);
        assert!(report.by_category.is_empty());
    }

    #[test]
    fn test_compare_requires_two_months() {
        let expense = vec![tx("2026-07-01", "Dining", 50.0)];
        assert!(compare_months(&expense, "2026-07").is_empty());
    }

    #[test]
    fn test_compare_missing_current_period() {
        let expense = vec![
            tx("2026-06-01", "Dining", 50.0),
            tx("2026-07-01", "Dining", 70.0),
        ];
        assert!(compare_months(&expense, "2026-08").is_empty());
    }

    #[test]
    fn test_compare_deltas_union_of_categories() {
        let expense = vec![
            tx("2026-06-01", "Dining", 50.0),
            tx("2026-06-15", "Coffee", 30.0),
            tx("2026-07-01", "Dining", 80.0),
        ];
        let deltas = compare_months(&expense, "2026-07");
        assert_eq!(deltas.len(), 2);
        // Sorted by this_month descending: Dining (80) then Coffee (0).
        assert_eq!(deltas[0].category, "Dining");
        assert_eq!(deltas[0].delta, 30.0);
        assert_eq!(deltas[1].category, "Coffee");
        assert_eq!(deltas[1].this_month, 0.0);
        assert_eq!(deltas[1].delta, -30.0);
    }

    #[test]
    fn test_compare_previous_is_bucket_adjacent_not_calendar_adjacent() {
        // No transactions at all in 2026-06: previous for 2026-07 is 2026-05.
        let expense = vec![
            tx("2026-05-01", "Dining", 40.0),
            tx("2026-07-01", "Dining", 90.0),
        ];
        let deltas = compare_months(&expense, "2026-07");
        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas[0].prev_month, 40.0);
        assert_eq!(deltas[0].delta, 50.0);
    }
}
