//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Spendcoach - Understand your spending and hit your savings goal
#[derive(Parser)]
#[command(name = "spendcoach")]
#[command(about = "Transaction analytics and budgeting coach", long_about = None)]
#[command(version)]
pub struct Cli {
    /// CSV file with date, merchant, amount columns
    /// (omit to analyze a generated sample dataset)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Replace merchant names with privacy-masked aliases in output
    #[arg(long, global = true)]
    pub privacy: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Allowed CORS origin (repeatable)
        #[arg(long)]
        origin: Vec<String>,

        /// Skip the PII scan on uploads (demo escape hatch)
        #[arg(long)]
        skip_pii_scan: bool,
    },

    /// Current-month spending summary by category and merchant
    Summary,

    /// Detected recurring charges
    Subscriptions,

    /// Unusual charges flagged per merchant
    Anomalies {
        /// Z-score threshold for flagging
        #[arg(long, default_value = "2.5")]
        threshold: f64,
    },

    /// Blended 0-100 financial health score
    Score {
        /// Monthly take-home income
        #[arg(long, default_value = "1800")]
        income: f64,
    },

    /// Savings-goal forecast with cut suggestions
    Forecast {
        /// Monthly take-home income
        #[arg(long, default_value = "1800")]
        income: f64,

        /// Savings goal amount
        #[arg(long, default_value = "3000")]
        goal: f64,

        /// Months to reach the goal
        #[arg(long, default_value = "10")]
        months: u32,
    },

    /// Generate a synthetic sample dataset
    Sample {
        /// Days of history to generate
        #[arg(long, default_value = "90")]
        days: u32,

        /// RNG seed (same seed, same dataset)
        #[arg(long, default_value = "7")]
        seed: u64,

        /// Write CSV here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}
