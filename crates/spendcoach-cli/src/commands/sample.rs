//! Synthetic dataset generation command

use std::path::Path;

use anyhow::{Context, Result};

use spendcoach_core::sample::generate_sample_transactions;
use spendcoach_core::Transaction;

pub fn cmd_sample(days: u32, seed: u64, out: Option<&Path>) -> Result<()> {
    let rows = generate_sample_transactions(days, seed);

    match out {
        Some(path) => {
            write_csv(&rows, path)?;
            println!(
                "✅ Wrote {} transactions ({} days, seed {}) to {}",
                rows.len(),
                days,
                seed,
                path.display()
            );
        }
        None => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            write_rows(&mut wtr, &rows)?;
        }
    }

    Ok(())
}

fn write_csv(rows: &[Transaction], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_rows(&mut wtr, rows)?;
    Ok(())
}

fn write_rows<W: std::io::Write>(wtr: &mut csv::Writer<W>, rows: &[Transaction]) -> Result<()> {
    wtr.write_record(["date", "merchant", "amount"])?;
    for tx in rows {
        wtr.write_record([
            tx.date.format("%Y-%m-%d").to_string(),
            tx.merchant.clone(),
            format!("{:.2}", tx.amount),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
