//! Spendcoach CLI - Transaction analytics and budgeting coach
//!
//! Usage:
//!   spendcoach summary --file tx.csv     Current-month spending breakdown
//!   spendcoach subscriptions             Recurring charges (sample data)
//!   spendcoach forecast --goal 3000      Savings-goal projection
//!   spendcoach serve --port 8000         Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Serve {
            port,
            host,
            origin,
            skip_pii_scan,
        } => commands::cmd_serve(&host, port, origin, skip_pii_scan).await,
        Commands::Summary => {
            let rows = commands::load_transactions(cli.file.as_deref())?;
            commands::cmd_summary(&rows, cli.privacy)
        }
        Commands::Subscriptions => {
            let rows = commands::load_transactions(cli.file.as_deref())?;
            commands::cmd_subscriptions(&rows, cli.privacy)
        }
        Commands::Anomalies { threshold } => {
            let rows = commands::load_transactions(cli.file.as_deref())?;
            commands::cmd_anomalies(&rows, threshold, cli.privacy)
        }
        Commands::Score { income } => {
            let rows = commands::load_transactions(cli.file.as_deref())?;
            commands::cmd_score(&rows, income)
        }
        Commands::Forecast {
            income,
            goal,
            months,
        } => {
            let rows = commands::load_transactions(cli.file.as_deref())?;
            commands::cmd_forecast(&rows, income, goal, months)
        }
        Commands::Sample { days, seed, out } => commands::cmd_sample(days, seed, out.as_deref()),
    }
}
