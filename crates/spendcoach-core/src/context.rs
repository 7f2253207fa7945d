//! Context assembly
//!
//! Composes the individual analytics into the aggregate views the API and
//! narration layers consume: current-period summary, month-over-month
//! comparison, and the full coach context used to ground generated text.

use std::collections::BTreeMap;

use crate::anomalies::{detect_anomalies, AnomalyConfig};
use crate::categorize::{categorize, split_income_expense, COFFEE_CATEGORY};
use crate::forecast::goal_forecast;
use crate::models::{
    round_cents, CancelDraft, CategorizedTransaction, CategorySpend, CoachContext, CoffeeInsight,
    CompareReport, MerchantSpend, SpendingSummary, Transaction,
};
use crate::months::{latest_month, month_key, monthly_totals};
use crate::privacy::mask_merchant;
use crate::subscriptions::SubscriptionConfig;
use crate::suggest::{suggest_cuts, SuggestionConfig};

/// Number of merchants reported in summaries.
const TOP_MERCHANTS: usize = 10;

/// Fraction of coffee spend assumed recoverable by brewing at home.
const COFFEE_TRIM_RATE: f64 = 0.60;

/// All analytics thresholds in one place, passed through to the
/// individual detectors.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsConfig {
    pub subscriptions: SubscriptionConfig,
    pub anomalies: AnomalyConfig,
    pub suggestions: SuggestionConfig,
}

/// Categorize a raw snapshot and split it into (income, expense).
pub fn prepare(
    transactions: &[Transaction],
) -> (Vec<CategorizedTransaction>, Vec<CategorizedTransaction>) {
    split_income_expense(categorize(transactions))
}

/// Coffee spend for the period and the yearly saving a modest trim implies.
pub fn coffee_insight(expense: &[CategorizedTransaction], period: &str) -> CoffeeInsight {
    let coffee_spend: f64 = expense
        .iter()
        .filter(|tx| tx.category == COFFEE_CATEGORY && month_key(tx.date) == period)
        .map(|tx| tx.amount)
        .sum();
    let yearly_save = coffee_spend * COFFEE_TRIM_RATE * 12.0;
    CoffeeInsight {
        coffee_spend: round_cents(coffee_spend),
        message: format!(
            "You've spent ${:.2} on coffee in {}. Brewing at home a bit more could save ~${:.0}/yr.",
            coffee_spend, period, yearly_save
        ),
    }
}

/// Current-period dashboard summary.
pub fn spending_summary(transactions: &[Transaction], privacy: bool) -> SpendingSummary {
    let (_, expense) = prepare(transactions);
    let current = match latest_month(&expense) {
        Some(m) => m,
        None => {
            return SpendingSummary {
                period: None,
                total_expense_month: 0.0,
                by_category: Vec::new(),
                top_merchants: Vec::new(),
                coffee: None,
            }
        }
    };

    let month_rows: Vec<&CategorizedTransaction> = expense
        .iter()
        .filter(|tx| month_key(tx.date) == current)
        .collect();
    let total: f64 = month_rows.iter().map(|tx| tx.amount).sum();

    SpendingSummary {
        total_expense_month: round_cents(total),
        by_category: category_totals(&month_rows),
        top_merchants: merchant_totals(&month_rows, privacy, TOP_MERCHANTS),
        coffee: Some(coffee_insight(&expense, &current)),
        period: Some(current),
    }
}

/// This-month vs previous-month comparison, with the suggestions that
/// would close the current forecast gap.
pub fn compare_report(
    transactions: &[Transaction],
    income_monthly: f64,
    goal_amount: f64,
    months_to_goal: u32,
    config: &AnalyticsConfig,
) -> CompareReport {
    let (_, expense) = prepare(transactions);
    let totals = monthly_totals(&expense);
    let mut months: Vec<&String> = totals.keys().collect();
    months.sort();

    let (period, this_total) = match months.last() {
        Some(m) => ((*m).clone(), totals[*m]),
        None => {
            let forecast = goal_forecast(income_monthly, 0.0, goal_amount, months_to_goal);
            return CompareReport {
                period: None,
                this_month_total: 0.0,
                prev_month_total: 0.0,
                delta_overall: 0.0,
                categories: Vec::new(),
                needed_per_month: 0.0,
                suggestions: Vec::new(),
                forecast,
            };
        }
    };
    let prev_total = if months.len() >= 2 {
        totals[months[months.len() - 2]]
    } else {
        0.0
    };

    let categories = crate::trends::compare_months(&expense, &period);
    let forecast = goal_forecast(income_monthly, this_total, goal_amount, months_to_goal);
    let needed = if forecast.on_track {
        0.0
    } else {
        forecast.need_per_month
    };
    let suggestions = suggest_cuts(&expense, needed, &config.suggestions);

    CompareReport {
        period: Some(period),
        this_month_total: round_cents(this_total),
        prev_month_total: round_cents(prev_total),
        delta_overall: round_cents(this_total - prev_total),
        categories,
        needed_per_month: round_cents(needed),
        suggestions,
        forecast,
    }
}

/// Build the compact context object the narration layer grounds on.
pub fn compose_context(
    transactions: &[Transaction],
    income_monthly: f64,
    goal_amount: f64,
    months_to_goal: u32,
    privacy: bool,
    config: &AnalyticsConfig,
) -> CoachContext {
    let (_, expense) = prepare(transactions);
    let current = match latest_month(&expense) {
        Some(m) => m,
        None => {
            return CoachContext {
                period: None,
                expense_total: 0.0,
                by_category: Vec::new(),
                top_merchants: Vec::new(),
                coffee_msg: String::new(),
                forecast: goal_forecast(income_monthly, 0.0, goal_amount, months_to_goal),
                suggestions: Vec::new(),
                delta_categories: Vec::new(),
                anomaly_count: 0,
            }
        }
    };

    let month_rows: Vec<&CategorizedTransaction> = expense
        .iter()
        .filter(|tx| month_key(tx.date) == current)
        .collect();
    let total: f64 = month_rows.iter().map(|tx| tx.amount).sum();

    let forecast = goal_forecast(income_monthly, total, goal_amount, months_to_goal);
    let needed = if forecast.on_track {
        0.0
    } else {
        forecast.need_per_month
    };

    CoachContext {
        expense_total: round_cents(total),
        by_category: category_totals(&month_rows),
        top_merchants: merchant_totals(&month_rows, privacy, TOP_MERCHANTS),
        coffee_msg: coffee_insight(&expense, &current).message,
        suggestions: suggest_cuts(&expense, needed, &config.suggestions),
        delta_categories: crate::trends::compare_months(&expense, &current),
        anomaly_count: detect_anomalies(&expense, &config.anomalies).len(),
        forecast,
        period: Some(current),
    }
}

/// Copyable email template for cancelling a recurring charge.
pub fn cancel_draft(merchant: &str, charge: f64) -> CancelDraft {
    let email = format!(
        "Subject: Cancel Subscription - {merchant}\n\n\
         Hello {merchant} Support,\n\n\
         I'd like to cancel my subscription effective immediately. \
         My recent charge was approximately ${charge:.2}. \
         Please confirm cancellation and any refund eligibility.\n\n\
         Thank you,\nA Customer"
    );
    CancelDraft {
        merchant: mask_merchant(merchant),
        raw_merchant: merchant.to_string(),
        charge: round_cents(charge),
        email,
    }
}

fn category_totals(rows: &[&CategorizedTransaction]) -> Vec<CategorySpend> {
    let mut by_category: BTreeMap<&str, f64> = BTreeMap::new();
    for tx in rows {
        *by_category.entry(tx.category.as_str()).or_default() += tx.amount;
    }
    let mut out: Vec<CategorySpend> = by_category
        .into_iter()
        .map(|(category, amount)| CategorySpend {
            category: category.to_string(),
            amount: round_cents(amount),
        })
        .collect();
    out.sort_by(|a, b| b.amount.partial_cmp(&a.amount).unwrap_or(std::cmp::Ordering::Equal));
    out
}

fn merchant_totals(
    rows: &[&CategorizedTransaction],
    privacy: bool,
    limit: usize,
) -> Vec<MerchantSpend> {
    let mut by_merchant: BTreeMap<&str, f64> = BTreeMap::new();
    for tx in rows {
        *by_merchant.entry(tx.merchant.as_str()).or_default() += tx.amount;
    }
    let mut out: Vec<MerchantSpend> = by_merchant
        .into_iter()
        .map(|(merchant, amount)| MerchantSpend {
            merchant: if privacy {
                mask_merchant(merchant)
            } else {
                merchant.to_string()
            },
            amount: round_cents(amount),
        })
        .collect();
    out.sort_by(|a, b| b.amount.partial_cmp(&a.amount).unwrap_or(std::cmp::Ordering::Equal));
    out.truncate(limit);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(date: &str, merchant: &str, amount: f64) -> Transaction {
        Transaction {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            merchant: merchant.to_string(),
            amount,
        }
    }

    fn demo_ledger() -> Vec<Transaction> {
        vec![
            tx("2026-06-05", "STARBUCKS", 5.0),
            tx("2026-06-20", "TARGET", 40.0),
            tx("2026-07-03", "STARBUCKS", 6.0),
            tx("2026-07-04", "STARBUCKS", 4.0),
            tx("2026-07-10", "TARGET", 55.0),
            tx("2026-07-15", "PAYROLL", -1800.0),
        ]
    }

    #[test]
    fn test_summary_current_month_only() {
        let summary = spending_summary(&demo_ledger(), false);
        assert_eq!(summary.period.as_deref(), Some("2026-07"));
        assert_eq!(summary.total_expense_month, 65.0);
        assert_eq!(summary.by_category[0].category, "Shopping");
        assert_eq!(summary.by_category[0].amount, 55.0);
    }

    #[test]
    fn test_summary_empty_ledger() {
        let summary = spending_summary(&[], false);
        assert!(summary.period.is_none());
        assert_eq!(summary.total_expense_month, 0.0);
        assert!(summary.coffee.is_none());
    }

    #[test]
    fn test_summary_privacy_masks_merchants() {
        let summary = spending_summary(&demo_ledger(), true);
        assert!(summary
            .top_merchants
            .iter()
            .all(|m| m.merchant.starts_with("Merchant-")));
    }

    #[test]
    fn test_coffee_insight_message() {
        let (_, expense) = prepare(&demo_ledger());
        let insight = coffee_insight(&expense, "2026-07");
        assert_eq!(insight.coffee_spend, 10.0);
        assert!(insight.message.contains("$10.00"));
        assert!(insight.message.contains("2026-07"));
        // 10 * 0.6 * 12 = 72/yr
        assert!(insight.message.contains("$72"));
    }

    #[test]
    fn test_compose_context_populates_all_sections() {
        let ctx = compose_context(
            &demo_ledger(),
            1800.0,
            3000.0,
            10,
            false,
            &AnalyticsConfig::default(),
        );
        assert_eq!(ctx.period.as_deref(), Some("2026-07"));
        assert_eq!(ctx.expense_total, 65.0);
        assert!(!ctx.by_category.is_empty());
        assert!(!ctx.delta_categories.is_empty());
        assert!(ctx.coffee_msg.contains("coffee"));
        // Surplus 1735/mo over 10 months comfortably beats the goal.
        assert!(ctx.forecast.on_track);
        assert!(ctx.suggestions.is_empty());
    }

    #[test]
    fn test_compose_context_empty_ledger_is_neutral() {
        let ctx = compose_context(&[], 1800.0, 3000.0, 10, false, &AnalyticsConfig::default());
        assert!(ctx.period.is_none());
        assert_eq!(ctx.anomaly_count, 0);
        assert!(ctx.by_category.is_empty());
    }

    #[test]
    fn test_compare_report_deltas_and_totals() {
        let report = compare_report(
            &demo_ledger(),
            1800.0,
            3000.0,
            10,
            &AnalyticsConfig::default(),
        );
        assert_eq!(report.period.as_deref(), Some("2026-07"));
        assert_eq!(report.this_month_total, 65.0);
        assert_eq!(report.prev_month_total, 45.0);
        assert_eq!(report.delta_overall, 20.0);
        assert!(!report.categories.is_empty());
    }

    #[test]
    fn test_cancel_draft_masks_but_keeps_raw() {
        let draft = cancel_draft("NETFLIX", 15.487);
        assert!(draft.merchant.starts_with("Merchant-"));
        assert_eq!(draft.raw_merchant, "NETFLIX");
        assert_eq!(draft.charge, 15.49);
        assert!(draft.email.contains("NETFLIX Support"));
    }
}
