//! Per-merchant anomaly scoring
//!
//! Flags expenses whose amount is statistically unusual for their merchant,
//! using a population z-score. Merchants with invariant charges (stddev 0)
//! never produce false positives: their z-scores are defined as 0.

use std::collections::HashMap;

use crate::error::Result;
use crate::models::{Anomaly, CategorizedTransaction};

/// Pluggable model-based anomaly detector.
///
/// The built-in z-score path never depends on this: callers hold an
/// `Option<Box<dyn AnomalyModel>>` and report "not available" when none is
/// configured, so core logic never special-cases a missing model.
pub trait AnomalyModel: Send + Sync {
    fn name(&self) -> &str;
    fn detect(&self, expense: &[CategorizedTransaction]) -> Result<Vec<Anomaly>>;
}

/// Anomaly scoring thresholds.
///
/// The default z-score cutoff is a tuning choice carried from the source
/// heuristics, hence configurable.
#[derive(Debug, Clone)]
pub struct AnomalyConfig {
    /// Minimum |z-score| for a transaction to be flagged.
    pub z_threshold: f64,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self { z_threshold: 2.5 }
    }
}

/// Score every expense against its merchant's distribution and return the
/// flagged outliers, sorted by date descending then z-score descending.
///
/// An empty expense ledger yields an empty result.
pub fn detect_anomalies(
    expense: &[CategorizedTransaction],
    config: &AnomalyConfig,
) -> Vec<Anomaly> {
    if expense.is_empty() {
        return Vec::new();
    }

    let mut by_merchant: HashMap<&str, Vec<f64>> = HashMap::new();
    for tx in expense {
        by_merchant.entry(&tx.merchant).or_default().push(tx.amount);
    }

    let stats: HashMap<&str, (f64, f64)> = by_merchant
        .into_iter()
        .map(|(merchant, amounts)| (merchant, mean_and_population_stddev(&amounts)))
        .collect();

    let mut flagged: Vec<Anomaly> = expense
        .iter()
        .filter_map(|tx| {
            let (mean, stddev) = stats[tx.merchant.as_str()];
            let z = if stddev == 0.0 {
                0.0
            } else {
                (tx.amount - mean) / stddev
            };
            (z.abs() >= config.z_threshold).then(|| Anomaly {
                date: tx.date,
                merchant: tx.merchant.clone(),
                amount: tx.amount,
                z_score: z,
            })
        })
        .collect();

    flagged.sort_by(|a, b| {
        b.date.cmp(&a.date).then(
            b.z_score
                .partial_cmp(&a.z_score)
                .unwrap_or(std::cmp::Ordering::Equal),
        )
    });
    flagged
}

fn mean_and_population_stddev(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(date: &str, merchant: &str, amount: f64) -> CategorizedTransaction {
        CategorizedTransaction {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            merchant: merchant.to_string(),
            amount,
            category: "Other".to_string(),
        }
    }

    #[test]
    fn test_constant_amounts_never_flagged() {
        let expense: Vec<_> = (1..=6)
            .map(|day| tx(&format!("2026-07-{:02}", day), "NETFLIX", 15.49))
            .collect();
        let anomalies = detect_anomalies(&expense, &AnomalyConfig::default());
        assert!(anomalies.is_empty());
    }

    #[test]
    fn test_large_outlier_is_flagged() {
        let mut expense: Vec<_> = (1..=10)
            .map(|day| tx(&format!("2026-07-{:02}", day), "UBER", 16.0))
            .collect();
        expense.push(tx("2026-07-20", "UBER", 120.0));
        let anomalies = detect_anomalies(&expense, &AnomalyConfig::default());
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].amount, 120.0);
        assert!(anomalies[0].z_score > 2.5);
    }

    #[test]
    fn test_sorted_date_desc_then_z_desc() {
        let mut expense: Vec<_> = (1..=15)
            .map(|day| tx(&format!("2026-06-{:02}", day), "TARGET", 30.0))
            .collect();
        expense.push(tx("2026-06-20", "TARGET", 450.0));
        expense.push(tx("2026-07-05", "TARGET", 440.0));
        let anomalies = detect_anomalies(&expense, &AnomalyConfig::default());
        assert_eq!(anomalies.len(), 2);
        assert!(anomalies[0].date > anomalies[1].date);
    }

    #[test]
    fn test_empty_ledger_empty_result() {
        assert!(detect_anomalies(&[], &AnomalyConfig::default()).is_empty());
    }

    #[test]
    fn test_threshold_is_configurable() {
        let mut expense: Vec<_> = (1..=10)
            .map(|day| tx(&format!("2026-07-{:02}", day), "UBER", 16.0))
            .collect();
        expense.push(tx("2026-07-20", "UBER", 30.0));
        let strict = AnomalyConfig { z_threshold: 10.0 };
        assert!(detect_anomalies(&expense, &strict).is_empty());
    }
}
