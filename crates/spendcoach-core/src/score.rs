//! Financial health scoring
//!
//! Blends savings rate, spending volatility, recurring burden, and anomaly
//! hygiene into a single 0-100 score. Each component is normalized to
//! [0, 1] and weighted; weights sum to 1 so the score is bounded.

use crate::anomalies::{detect_anomalies, AnomalyConfig};
use crate::models::{CategorizedTransaction, HealthScore, Signal};
use crate::months::{latest_month, month_key, monthly_totals};
use crate::subscriptions::{detect_subscriptions, SubscriptionConfig};

const WEIGHT_SAVINGS: f64 = 0.55;
const WEIGHT_VOLATILITY: f64 = 0.15;
const WEIGHT_RECURRING: f64 = 0.20;
const WEIGHT_ANOMALY: f64 = 0.10;

/// Number of trailing months used for the volatility component.
const VOLATILITY_WINDOW: usize = 6;

/// Compute the blended health score for an expense ledger.
///
/// With no data this returns a neutral 50 and an explanatory message
/// instead of failing.
pub fn health_score(
    expense: &[CategorizedTransaction],
    income_monthly: f64,
    sub_config: &SubscriptionConfig,
    anomaly_config: &AnomalyConfig,
) -> HealthScore {
    let current = match latest_month(expense) {
        Some(m) => m,
        None => {
            return HealthScore {
                score: 50,
                period: None,
                signals: Vec::new(),
                explain: Some("No data - neutral score.".to_string()),
            }
        }
    };

    let current_total: f64 = expense
        .iter()
        .filter(|tx| month_key(tx.date) == current)
        .map(|tx| tx.amount)
        .sum();

    let savings_rate = if income_monthly <= 0.0 {
        0.0
    } else {
        ((income_monthly - current_total) / income_monthly).clamp(0.0, 1.0)
    };

    // Volatility: population stddev / mean of the trailing month totals.
    let totals = monthly_totals(expense);
    let last: Vec<f64> = totals
        .values()
        .rev()
        .take(VOLATILITY_WINDOW)
        .copied()
        .collect();
    let mut volatility = 0.0;
    if last.len() >= 2 {
        let mean = last.iter().sum::<f64>() / last.len() as f64;
        if mean > 1e-6 {
            let variance =
                last.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / last.len() as f64;
            volatility = variance.sqrt() / mean;
        }
    }

    let subs = detect_subscriptions(expense, sub_config);
    let recurring_in_current: f64 = subs
        .iter()
        .filter(|s| s.active_in(&current))
        .map(|s| s.charge)
        .sum();
    let recurring_ratio = if current_total <= 0.0 {
        0.0
    } else {
        (recurring_in_current / current_total).min(1.0)
    };

    let tx_in_current = expense
        .iter()
        .filter(|tx| month_key(tx.date) == current)
        .count();
    let anomalies_in_current = detect_anomalies(expense, anomaly_config)
        .iter()
        .filter(|a| month_key(a.date) == current)
        .count();
    let anomaly_rate = if tx_in_current == 0 {
        0.0
    } else {
        (anomalies_in_current as f64 / tx_in_current as f64).min(1.0)
    };

    let raw = WEIGHT_SAVINGS * savings_rate
        + WEIGHT_VOLATILITY * (1.0 - volatility.min(1.0))
        + WEIGHT_RECURRING * (1.0 - recurring_ratio)
        + WEIGHT_ANOMALY * (1.0 - anomaly_rate);
    let score = (100.0 * raw).round() as i64;

    let signals = vec![
        Signal {
            name: "Savings Rate".to_string(),
            value: (100.0 * savings_rate).round() as i64,
            hint: "Aim for 20%+ of income.".to_string(),
        },
        Signal {
            name: "Volatility".to_string(),
            value: (100.0 * (1.0 - volatility.min(1.0))).round() as i64,
            hint: "Flatter is better.".to_string(),
        },
        Signal {
            name: "Recurring Burden".to_string(),
            value: (100.0 * (1.0 - recurring_ratio)).round() as i64,
            hint: "Trim subscriptions.".to_string(),
        },
        Signal {
            name: "Anomaly Hygiene".to_string(),
            value: (100.0 * (1.0 - anomaly_rate)).round() as i64,
            hint: "Review outliers.".to_string(),
        },
    ];

    HealthScore {
        score,
        period: Some(current),
        signals,
        explain: None,
    }
}
