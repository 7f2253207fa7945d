//! CSV dataset parsing
//!
//! Uploaded datasets must carry `date`, `merchant`, and `amount` columns
//! (header match is case-insensitive; extra columns are ignored). Rows that
//! fail to parse are skipped and counted rather than failing the upload,
//! but a dataset with no required columns or no usable rows is rejected.

use std::io::Read;

use chrono::NaiveDate;
use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::Transaction;

/// Outcome of parsing an uploaded dataset.
#[derive(Debug)]
pub struct ParsedDataset {
    pub transactions: Vec<Transaction>,
    /// Rows dropped for unparseable date/amount or empty merchant.
    pub skipped: usize,
}

/// Parse a CSV dataset into transactions.
pub fn parse_dataset<R: Read>(reader: R) -> Result<ParsedDataset> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    };

    let (date_col, merchant_col, amount_col) = match (find("date"), find("merchant"), find("amount"))
    {
        (Some(d), Some(m), Some(a)) => (d, m, a),
        _ => {
            return Err(Error::InvalidData(
                "CSV must include columns: date, merchant, amount".to_string(),
            ))
        }
    };

    let mut transactions = Vec::new();
    let mut skipped = 0;
    for result in rdr.records() {
        let record = result?;
        let parsed = (|| {
            let date = parse_date(record.get(date_col)?)?;
            let merchant = record.get(merchant_col)?.trim();
            if merchant.is_empty() {
                return None;
            }
            let amount = parse_amount(record.get(amount_col)?)?;
            Some(Transaction {
                date,
                merchant: merchant.to_string(),
                amount,
            })
        })();

        match parsed {
            Some(tx) => transactions.push(tx),
            None => skipped += 1,
        }
    }

    if transactions.is_empty() {
        return Err(Error::InvalidData("No valid rows in dataset.".to_string()));
    }

    debug!(
        rows = transactions.len(),
        skipped, "parsed uploaded dataset"
    );
    Ok(ParsedDataset {
        transactions,
        skipped,
    })
}

/// Parse a date in ISO (`2026-07-15`) or US (`07/15/2026`) format.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%m/%d/%Y"))
        .ok()
}

/// Parse an amount, tolerating `$` signs, thousands separators, and
/// parenthesized negatives.
fn parse_amount(s: &str) -> Option<f64> {
    let s = s.trim();
    let negative = s.starts_with('(') && s.ends_with(')');
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    let value: f64 = cleaned.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(if negative { -value.abs() } else { value })
}
