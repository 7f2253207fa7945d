//! Synthetic demo transactions
//!
//! Generates ~n days of plausible spending for the demo dataset: daily-ish
//! coffee and rideshare, weekly groceries, monthly subscriptions and rent,
//! twice-monthly payroll, plus two injected anomalies so the anomaly table
//! has something to show. Seeded, so a given seed reproduces the dataset.

use chrono::{Duration, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{round_cents, Transaction};

/// Default number of days of history to generate.
pub const DEFAULT_DAYS: u32 = 90;

/// Default generator seed.
pub const DEFAULT_SEED: u64 = 7;

/// (merchant, average amount, roughly-monthly frequency). A negative
/// average marks income and the sign is preserved on the samples.
const MERCHANTS: &[(&str, f64, u32)] = &[
    ("STARBUCKS", 4.5, 10),
    ("PEET COFFEE", 5.5, 6),
    ("SAFEWAY", 65.0, 14),
    ("TRADER JOE'S", 45.0, 10),
    ("UBEREATS", 28.0, 8),
    ("Local Pizza", 18.0, 6),
    ("UBER", 16.0, 10),
    ("CHEVRON", 52.0, 5),
    ("NETFLIX", 15.49, 1),
    ("SPOTIFY", 9.99, 1),
    ("T-MOBILE", 70.0, 1),
    ("APARTMENTS LLC RENT", 1500.0, 1),
    ("AMAZON", 32.0, 12),
    ("TARGET", 28.0, 8),
    ("PAYROLL", -1800.0, 2),
];

/// Generate sample transactions ending today.
pub fn generate_sample_transactions(n_days: u32, seed: u64) -> Vec<Transaction> {
    generate_ending_at(Utc::now().date_naive(), n_days, seed)
}

/// Generate sample transactions ending at a fixed date (used by tests for
/// reproducible month boundaries).
pub fn generate_ending_at(today: NaiveDate, n_days: u32, seed: u64) -> Vec<Transaction> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rows = Vec::new();

    for offset in 0..n_days {
        let date = today - Duration::days(offset as i64);
        for &(merchant, avg, freq) in MERCHANTS {
            // Rough monthly-to-daily probability, capped below certainty.
            let p = (freq as f64 / 30.0).min(0.9);
            if rng.gen::<f64>() < p {
                let mu = avg.abs();
                let sigma = (mu * 0.15).max(1.0);
                let magnitude = (mu + sigma * approx_standard_normal(&mut rng)).max(1.0);
                let amount = if avg < 0.0 { -magnitude } else { magnitude };
                rows.push(Transaction {
                    date,
                    merchant: merchant.to_string(),
                    amount: round_cents(amount),
                });
            }
        }
    }

    // Two planted anomalies so the outlier views are never empty.
    rows.push(Transaction {
        date: today - Duration::days(7),
        merchant: "TARGET".to_string(),
        amount: 450.0,
    });
    rows.push(Transaction {
        date: today - Duration::days(22),
        merchant: "UBER".to_string(),
        amount: 120.0,
    });

    rows.sort_by_key(|tx| tx.date);
    rows
}

/// Irwin-Hall approximation: the sum of 12 uniforms minus 6 is close enough
/// to a standard normal for jittering demo amounts.
fn approx_standard_normal(rng: &mut StdRng) -> f64 {
    (0..12).map(|_| rng.gen::<f64>()).sum::<f64>() - 6.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_reproduces_dataset() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();
        let a = generate_ending_at(today, 30, 7);
        let b = generate_ending_at(today, 30, 7);
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();
        let a = generate_ending_at(today, 30, 7);
        let b = generate_ending_at(today, 30, 8);
        assert_ne!(a, b);
    }

    #[test]
    fn test_contains_income_and_anomalies() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();
        let rows = generate_ending_at(today, 90, 7);

        assert!(rows.iter().any(|tx| tx.merchant == "PAYROLL" && tx.amount < 0.0));
        assert!(rows
            .iter()
            .any(|tx| tx.merchant == "TARGET" && tx.amount == 450.0));
        assert!(rows
            .iter()
            .any(|tx| tx.merchant == "UBER" && tx.amount == 120.0));
    }

    #[test]
    fn test_dates_span_window_and_sorted() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();
        let rows = generate_ending_at(today, 90, 7);
        assert!(rows.windows(2).all(|w| w[0].date <= w[1].date));
        assert!(rows.iter().all(|tx| tx.date <= today));
        assert!(rows
            .iter()
            .all(|tx| tx.date > today - Duration::days(91)));
    }
}
