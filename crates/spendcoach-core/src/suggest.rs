//! Greedy cut suggestions
//!
//! Ranks current-month categories by spend and proposes trims from the
//! biggest levers first until the monthly gap is covered. This favors a
//! few larger asks over many tiny ones; the policy knobs live in
//! [`SuggestionConfig`] so the preference can be tuned.

use std::collections::BTreeMap;

use crate::models::{round_cents, CategorizedTransaction, Suggestion};
use crate::months::{latest_month, month_key};

/// Allocation policy for cut suggestions.
#[derive(Debug, Clone)]
pub struct SuggestionConfig {
    /// Category spend at or above this gets the larger trim percentage.
    pub big_category_floor: f64,
    /// Trim fraction for big categories.
    pub big_cut_pct: f64,
    /// Trim fraction for everything else.
    pub small_cut_pct: f64,
    /// Cuts below this are not worth asking for and are skipped.
    pub min_cut: f64,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            big_category_floor: 200.0,
            big_cut_pct: 0.20,
            small_cut_pct: 0.10,
            min_cut: 5.0,
        }
    }
}

/// Propose category-level cuts covering `needed_per_month`.
///
/// Returns an empty list when nothing is needed or there is no data.
/// Suggestions are ordered by category spend descending.
pub fn suggest_cuts(
    expense: &[CategorizedTransaction],
    needed_per_month: f64,
    config: &SuggestionConfig,
) -> Vec<Suggestion> {
    if needed_per_month <= 0.0 || expense.is_empty() {
        return Vec::new();
    }

    let current = match latest_month(expense) {
        Some(m) => m,
        None => return Vec::new(),
    };

    let mut by_category: BTreeMap<String, f64> = BTreeMap::new();
    for tx in expense {
        if month_key(tx.date) == current {
            *by_category.entry(tx.category.clone()).or_default() += tx.amount;
        }
    }

    let mut ranked: Vec<(String, f64)> = by_category.into_iter().collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut remaining = needed_per_month;
    let mut suggestions = Vec::new();
    for (category, spend) in ranked {
        if remaining <= 0.0 {
            break;
        }
        let pct = if spend >= config.big_category_floor {
            config.big_cut_pct
        } else {
            config.small_cut_pct
        };
        let cut = (spend * pct).min(remaining);
        if cut >= config.min_cut {
            suggestions.push(Suggestion {
                category,
                current: round_cents(spend),
                suggested_cut: round_cents(cut),
            });
            remaining -= cut;
        }
    }
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(category: &str, amount: f64) -> CategorizedTransaction {
        CategorizedTransaction {
            date: NaiveDate::from_ymd_opt(2026, 7, 10).unwrap(),
            merchant: "TEST".to_string(),
            amount,
            category: category.to_string(),
        }
    }

    #[test]
    fn test_greedy_allocation_with_minimum_boundary() {
        // Dining 300 -> 20% = 60, capped at 70 remaining -> 60.
        // Coffee 50 -> 10% = 5, exactly at the minimum, must be included.
        let expense = vec![tx("Dining", 300.0), tx("Coffee", 50.0)];
        let suggestions = suggest_cuts(&expense, 70.0, &SuggestionConfig::default());

        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].category, "Dining");
        assert_eq!(suggestions[0].suggested_cut, 60.0);
        assert_eq!(suggestions[1].category, "Coffee");
        assert_eq!(suggestions[1].suggested_cut, 5.0);
    }

    #[test]
    fn test_no_need_no_suggestions() {
        let expense = vec![tx("Dining", 300.0)];
        assert!(suggest_cuts(&expense, 0.0, &SuggestionConfig::default()).is_empty());
        assert!(suggest_cuts(&expense, -10.0, &SuggestionConfig::default()).is_empty());
        assert!(suggest_cuts(&[], 50.0, &SuggestionConfig::default()).is_empty());
    }

    #[test]
    fn test_cut_capped_at_remaining_need() {
        let expense = vec![tx("Rent", 1500.0)];
        let suggestions = suggest_cuts(&expense, 40.0, &SuggestionConfig::default());
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].suggested_cut, 40.0);
    }

    #[test]
    fn test_tiny_cut_skipped() {
        // Coffee 30 -> 10% = 3, below the $5 minimum.
        let expense = vec![tx("Coffee", 30.0)];
        let suggestions = suggest_cuts(&expense, 100.0, &SuggestionConfig::default());
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_only_current_month_considered() {
        let mut old = tx("Dining", 900.0);
        old.date = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        let expense = vec![old, tx("Coffee", 80.0)];
        let suggestions = suggest_cuts(&expense, 50.0, &SuggestionConfig::default());
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].category, "Coffee");
        assert_eq!(suggestions[0].suggested_cut, 8.0);
    }
}
