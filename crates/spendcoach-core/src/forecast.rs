//! Goal forecasting and what-if simulation

use std::collections::BTreeMap;

use crate::models::{
    round_cents, CategorizedTransaction, ForecastResult, WhatIfResult,
};
use crate::months::{latest_month, month_key};

/// Project monthly surplus against a goal amount and timeline.
///
/// Division by a zero-month horizon is guarded: it means "no forecast
/// window" and yields `need_per_month = 0`.
pub fn goal_forecast(
    income_monthly: f64,
    expense_monthly: f64,
    goal_amount: f64,
    months: u32,
) -> ForecastResult {
    let surplus = (income_monthly - expense_monthly).max(0.0);
    let projected = surplus * months as f64;
    let gap = (goal_amount - projected).max(0.0);
    let on_track = gap <= 0.01;
    let need_per_month = if months > 0 && gap > 0.0 {
        gap / months as f64
    } else {
        0.0
    };

    let message = if on_track {
        "You're on track!".to_string()
    } else {
        format!(
            "Need about ${:.0}/mo to hit ${:.0} in {} months.",
            need_per_month, goal_amount, months
        )
    };

    ForecastResult {
        on_track,
        surplus: round_cents(surplus),
        gap: round_cents(gap),
        need_per_month: round_cents(need_per_month),
        message,
    }
}

/// Re-run the forecast with hypothetical per-category cuts applied to the
/// current month's spend.
///
/// Each requested cut is capped at the category's current spend; categories
/// with no spend this month are ignored.
pub fn what_if(
    expense: &[CategorizedTransaction],
    cuts: &BTreeMap<String, f64>,
    income_monthly: f64,
    goal_amount: f64,
    months: u32,
) -> WhatIfResult {
    let period = latest_month(expense);

    let mut by_category: BTreeMap<String, f64> = BTreeMap::new();
    if let Some(ref current) = period {
        for tx in expense {
            if &month_key(tx.date) == current {
                *by_category.entry(tx.category.clone()).or_default() += tx.amount;
            }
        }
    }

    let mut applied = BTreeMap::new();
    let mut reduced_total = 0.0;
    for (category, spend) in &by_category {
        let wanted = cuts.get(category).copied().unwrap_or(0.0);
        let take = wanted.clamp(0.0, *spend);
        if take > 0.0 {
            applied.insert(category.clone(), round_cents(take));
            reduced_total += take;
        }
    }

    let current_expense: f64 = by_category.values().sum();
    let new_expense = (current_expense - reduced_total).max(0.0);

    WhatIfResult {
        period,
        current_expense: round_cents(current_expense),
        new_expense: round_cents(new_expense),
        applied,
        forecast: goal_forecast(income_monthly, new_expense, goal_amount, months),
    }
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
    fn test_forecast_on_track() {
        let fc = goal_forecast(1800.0, 1500.0, 3000.0, 10);
        assert_eq!(fc.surplus, 300.0);
        assert_eq!(fc.gap, 0.0);
        assert!(fc.on_track);
        assert_eq!(fc.need_per_month, 0.0);
    }

    #[test]
    fn test_forecast_behind_goal() {
        let fc = goal_forecast(1800.0, 1700.0, 3000.0, 2);
        assert_eq!(fc.surplus, 100.0);
        assert_eq!(fc.gap, 2800.0);
        assert!(!fc.on_track);
        assert_eq!(fc.need_per_month, 1400.0);
    }

    #[test]
    fn test_forecast_zero_month_window() {
        let fc = goal_forecast(1800.0, 1700.0, 3000.0, 0);
        assert!(!fc.on_track);
        assert_eq!(fc.need_per_month, 0.0);
    }

    #[test]
    fn test_forecast_expense_exceeds_income_floors_surplus() {
        let fc = goal_forecast(1000.0, 1500.0, 500.0, 6);
        assert_eq!(fc.surplus, 0.0);
        assert_eq!(fc.gap, 500.0);
    }

    #[test]
    fn test_what_if_caps_cuts_at_current_spend() {
        let expense = vec![
            tx("2026-07-05", "Dining", 300.0),
            tx("2026-07-10", "Coffee", 50.0),
        ];
        let mut cuts = BTreeMap::new();
        cuts.insert("Dining".to_string(), 100.0);
        cuts.insert("Coffee".to_string(), 500.0); // more than current spend

        let result = what_if(&expense, &cuts, 1800.0, 3000.0, 10);
        assert_eq!(result.current_expense, 350.0);
        assert_eq!(result.applied["Dining"], 100.0);
        assert_eq!(result.applied["Coffee"], 50.0);
        assert_eq!(result.new_expense, 200.0);
    }

    #[test]
    fn test_what_if_empty_ledger() {
        let result = what_if(&[], &BTreeMap::new(), 1800.0, 3000.0, 10);
        assert!(result.period.is_none());
        assert_eq!(result.current_expense, 0.0);
        assert!(result.applied.is_empty());
    }
}
