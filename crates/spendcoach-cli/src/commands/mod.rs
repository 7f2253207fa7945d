//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `reports` - Analytics reports (summary, subscriptions, anomalies, score)
//! - `forecast` - Savings-goal forecast with cut suggestions
//! - `sample` - Synthetic dataset generation
//! - `serve` - Web server command

pub mod forecast;
pub mod reports;
pub mod sample;
pub mod serve;

// Re-export command functions for main.rs
pub use forecast::*;
pub use reports::*;
pub use sample::*;
pub use serve::*;

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};

use spendcoach_core::sample::{generate_sample_transactions, DEFAULT_DAYS, DEFAULT_SEED};
use spendcoach_core::{import, Transaction};

/// Load the dataset to analyze: a CSV file when given, otherwise the
/// deterministic sample dataset.
pub fn load_transactions(file: Option<&Path>) -> Result<Vec<Transaction>> {
    match file {
        Some(path) => {
            let reader = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            let parsed = import::parse_dataset(reader)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            if parsed.skipped > 0 {
                tracing::warn!(skipped = parsed.skipped, "some rows could not be parsed");
            }
            Ok(parsed.transactions)
        }
        None => Ok(generate_sample_transactions(DEFAULT_DAYS, DEFAULT_SEED)),
    }
}

/// Truncate a string to a maximum length in characters, adding "..." if
/// truncated. Counts chars rather than bytes so multi-byte merchant names
/// never split mid-character.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
