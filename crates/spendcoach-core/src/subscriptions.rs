//! Recurring-charge (subscription) detection
//!
//! A subscription is a merchant whose per-month median charge recurs in at
//! least two distinct months at a similar amount. The clusterer is a simple
//! greedy bucketer: it walks a merchant's monthly medians in chronological
//! order and places each into the first open bucket whose running reference
//! value it matches, within an absolute or relative tolerance. The dual
//! tolerance handles both sub-$2 charges and large ones.

use std::collections::HashMap;

use tracing::warn;

use crate::models::{round_cents, CategorizedTransaction, SubscriptionCluster};
use crate::months::month_key;

/// Detection thresholds.
///
/// The defaults are heuristic tuning choices, not derived invariants, so
/// they are parameters rather than hard constants.
#[derive(Debug, Clone)]
pub struct SubscriptionConfig {
    /// Absolute amount tolerance for placing a charge in a bucket.
    pub abs_tolerance: f64,
    /// Relative amount tolerance (fraction of the bucket reference).
    pub rel_tolerance: f64,
    /// Minimum distinct months for a bucket to qualify as recurring.
    pub min_months: usize,
}

impl Default for SubscriptionConfig {
    fn default() -> Self {
        Self {
            abs_tolerance: 2.0,
            rel_tolerance: 0.10,
            min_months: 2,
        }
    }
}

/// Detect recurring charge clusters in an expense ledger.
///
/// Never fails: empty input yields an empty list, and unexpected shapes
/// inside the clusterer are logged and downgraded to an empty result.
pub fn detect_subscriptions(
    expense: &[CategorizedTransaction],
    config: &SubscriptionConfig,
) -> Vec<SubscriptionCluster> {
    if expense.is_empty() {
        return Vec::new();
    }

    // Median charge per (merchant, month).
    let mut amounts: HashMap<(String, String), Vec<f64>> = HashMap::new();
    for tx in expense {
        if !tx.amount.is_finite() {
            warn!(merchant = %tx.merchant, "skipping non-finite amount in subscription detection");
            continue;
        }
        amounts
            .entry((tx.merchant.clone(), month_key(tx.date)))
            .or_default()
            .push(tx.amount);
    }

    // Per merchant: (month, median) pairs in chronological order.
    let mut per_merchant: HashMap<String, Vec<(String, f64)>> = HashMap::new();
    for ((merchant, month), values) in amounts {
        let med = median(&values);
        per_merchant.entry(merchant).or_default().push((month, med));
    }

    let mut clusters = Vec::new();
    for (merchant, mut monthly) in per_merchant {
        monthly.sort_by(|a, b| a.0.cmp(&b.0));

        let mut buckets: Vec<Bucket> = Vec::new();
        for (month, amount) in monthly {
            let placed = buckets.iter_mut().find(|b| b.accepts(amount, config));
            match placed {
                Some(bucket) => bucket.push(month, amount),
                None => buckets.push(Bucket::new(month, amount)),
            }
        }

        for bucket in buckets {
            let mut months: Vec<String> = bucket.months;
            months.sort();
            months.dedup();
            if months.len() >= config.min_months {
                clusters.push(SubscriptionCluster {
                    merchant: merchant.clone(),
                    charge: round_cents(median(&bucket.amounts)),
                    count: months.len(),
                    months,
                });
            }
        }
    }

    clusters.sort_by(|a, b| b.count.cmp(&a.count).then(a.merchant.cmp(&b.merchant)));
    clusters
}

/// An open charge bucket with a running reference value.
struct Bucket {
    reference: f64,
    months: Vec<String>,
    amounts: Vec<f64>,
}

impl Bucket {
    fn new(month: String, amount: f64) -> Self {
        Self {
            reference: amount,
            months: vec![month],
            amounts: vec![amount],
        }
    }

    fn accepts(&self, amount: f64, config: &SubscriptionConfig) -> bool {
        let diff = (amount - self.reference).abs();
        diff <= config.abs_tolerance
            || (self.reference > 0.0 && diff / self.reference <= config.rel_tolerance)
    }

    fn push(&mut self, month: String, amount: f64) {
        self.months.push(month);
        self.amounts.push(amount);
        // Reference follows the median of members so far, which keeps the
        // bucket stable against a single drifting charge.
        self.reference = median(&self.amounts);
    }
}

/// Median of a non-empty slice. Returns 0 for an empty slice.
fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
