//! Data types shared across the analytics engine
//!
//! Everything here is plain structured data: analytics functions take a
//! ledger snapshot plus scalar parameters and return these types. Nothing
//! holds internal state.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A raw transaction as uploaded or generated.
///
/// Sign convention: positive = expense, negative = income. Transactions
/// whose merchant text maps to the "Income" category are treated as income
/// regardless of sign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub merchant: String,
    pub amount: f64,
}

/// A transaction with its assigned spending category.
///
/// The category is immutable once assigned; the whole table is recategorized
/// whenever the ledger snapshot is replaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorizedTransaction {
    pub date: NaiveDate,
    pub merchant: String,
    pub amount: f64,
    pub category: String,
}

/// A group of same-merchant charges recognized as recurring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionCluster {
    pub merchant: String,
    /// Median of the member charges, rounded to cents.
    pub charge: f64,
    /// Distinct months (YYYY-MM) the charge appeared in, sorted ascending.
    pub months: Vec<String>,
    /// Number of distinct months.
    pub count: usize,
}

impl SubscriptionCluster {
    /// Whether this cluster was charged in the given month.
    pub fn active_in(&self, month: &str) -> bool {
        self.months.iter().any(|m| m == month)
    }
}

/// A statistically unusual expense for its merchant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub date: NaiveDate,
    pub merchant: String,
    pub amount: f64,
    pub z_score: f64,
}

/// Result of projecting savings surplus against a goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub on_track: bool,
    pub surplus: f64,
    pub gap: f64,
    pub need_per_month: f64,
    pub message: String,
}

/// A proposed category-level spending cut.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub category: String,
    /// Current-month spend in this category.
    pub current: f64,
    pub suggested_cut: f64,
}

/// Per-category spend for the current and previous month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDelta {
    pub category: String,
    pub this_month: f64,
    pub prev_month: f64,
    pub delta: f64,
}

/// Dense month-over-month spending series.
///
/// `months`, `totals`, and every entry of `by_category` are aligned: index i
/// of each refers to `months[i]`. Months with no activity report 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendsReport {
    pub months: Vec<String>,
    pub totals: Vec<f64>,
    pub by_category: BTreeMap<String, Vec<f64>>,
}

/// One component of the financial health score, scaled to 0-100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub name: String,
    pub value: i64,
    pub hint: String,
}

/// Blended 0-100 financial health score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthScore {
    pub score: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    pub signals: Vec<Signal>,
    /// Set when no data is available and the neutral score is returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explain: Option<String>,
}

/// Spend total for a single category, used where ordering matters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpend {
    pub category: String,
    pub amount: f64,
}

/// Spend total for a single merchant, used where ordering matters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchantSpend {
    pub merchant: String,
    pub amount: f64,
}

/// Coffee-specific insight for the current period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoffeeInsight {
    pub coffee_spend: f64,
    pub message: String,
}

/// Current-period summary for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingSummary {
    pub period: Option<String>,
    pub total_expense_month: f64,
    pub by_category: Vec<CategorySpend>,
    pub top_merchants: Vec<MerchantSpend>,
    pub coffee: Option<CoffeeInsight>,
}

/// Everything the narration layer needs to ground generated text.
///
/// Also consumed by the rule-based fallback coach when no narrator is
/// configured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachContext {
    pub period: Option<String>,
    pub expense_total: f64,
    pub by_category: Vec<CategorySpend>,
    pub top_merchants: Vec<MerchantSpend>,
    pub coffee_msg: String,
    pub forecast: ForecastResult,
    pub suggestions: Vec<Suggestion>,
    pub delta_categories: Vec<CategoryDelta>,
    pub anomaly_count: usize,
}

/// Result of re-running the forecast with hypothetical category cuts applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhatIfResult {
    pub period: Option<String>,
    pub current_expense: f64,
    pub new_expense: f64,
    /// Cuts actually applied, capped at each category's current spend.
    pub applied: BTreeMap<String, f64>,
    pub forecast: ForecastResult,
}

/// This-month vs previous-month comparison plus cut suggestions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareReport {
    pub period: Option<String>,
    pub this_month_total: f64,
    pub prev_month_total: f64,
    pub delta_overall: f64,
    pub categories: Vec<CategoryDelta>,
    pub needed_per_month: f64,
    pub suggestions: Vec<Suggestion>,
    pub forecast: ForecastResult,
}

/// Copyable email template for cancelling a recurring charge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelDraft {
    pub merchant: String,
    pub raw_merchant: String,
    pub charge: f64,
    pub email: String,
}

/// Round a monetary value to cents.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(1.234), 1.23);
        assert_eq!(round_cents(2.676), 2.68);
        assert_eq!(round_cents(-3.14159), -3.14);
        assert_eq!(round_cents(0.0), 0.0);
    }

    #[test]
    fn test_cluster_active_in() {
        let cluster = SubscriptionCluster {
            merchant: "NETFLIX".to_string(),
            charge: 15.49,
            months: vec!["2026-06".to_string(), "2026-07".to_string()],
            count: 2,
        };
        assert!(cluster.active_in("2026-07"));
        assert!(!cluster.active_in("2026-05"));
    }
}
