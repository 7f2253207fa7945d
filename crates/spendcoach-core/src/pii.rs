//! PII scanning for uploaded datasets
//!
//! Scans the free-text columns of an uploaded CSV for SSN-like and credit
//! card-like values before the data is accepted. The `date` and `amount`
//! columns are skipped to avoid false positives, and card-number candidates
//! must pass a Luhn check.

use std::io::Read;
use std::sync::OnceLock;

use csv::ReaderBuilder;
use regex::Regex;

use crate::error::Result;

/// Cap on rows scanned per column.
const MAX_SCAN_ROWS: usize = 2000;

fn ssn_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(?:00[1-9]|0[1-9]\d|[1-578]\d{2}|6[0-57-9]\d|66[0-57-9])-(?:0[1-9]|[1-9]\d)-(?:000[1-9]|00[1-9]\d|0[1-9]\d{2}|[1-9]\d{3})\b")
            .expect("SSN regex is valid")
    })
}

/// Scan CSV columns for PII-like values.
///
/// Returns the sorted list of flagged column names; empty means clean.
pub fn scan_columns<R: Read>(reader: R) -> Result<Vec<String>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();

    let scan_cols: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| {
            let lower = h.trim().to_lowercase();
            lower != "date" && lower != "amount"
        })
        .map(|(i, h)| (i, h.to_string()))
        .collect();

    let mut flagged = Vec::new();
    let mut rows_seen = 0;
    let mut remaining: Vec<(usize, String)> = scan_cols;

    for result in rdr.records() {
        if rows_seen >= MAX_SCAN_ROWS || remaining.is_empty() {
            break;
        }
        rows_seen += 1;
        let record = result?;

        remaining.retain(|(idx, name)| {
            let value = record.get(*idx).unwrap_or("").trim();
            if value.is_empty() {
                return true;
            }
            if is_pii_like(value) {
                flagged.push(name.clone());
                return false; // column flagged, stop scanning it
            }
            true
        });
    }

    flagged.sort();
    Ok(flagged)
}

fn is_pii_like(value: &str) -> bool {
    if ssn_regex().is_match(value) {
        return true;
    }
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
    (13..=16).contains(&digits.len()) && luhn_ok(&digits)
}

/// Luhn checksum over a digit string.
fn luhn_ok(digits: &str) -> bool {
    let mut total = 0u32;
    let mut double = false;
    for ch in digits.chars().rev() {
        let mut d = match ch.to_digit(10) {
            Some(d) => d,
            None => return false,
        };
        if double {
            d *= 2;
            if d > 9 {
                d -= 9;
            }
        }
        total += d;
        double = !double;
    }
    total % 10 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luhn_accepts_valid_card_number() {
        // Standard test card number.
        assert!(luhn_ok("4111111111111111"));
        assert!(!luhn_ok("4111111111111112"));
    }

    #[test]
    fn test_clean_dataset_passes() {
        let csv = "date,merchant,amount\n2026-07-01,STARBUCKS,4.50\n";
        assert!(scan_columns(csv.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_ssn_in_column_flagged() {
        let csv = "date,merchant,amount,note\n\
                   2026-07-01,STARBUCKS,4.50,ssn 123-45-6789\n";
        let flagged = scan_columns(csv.as_bytes()).unwrap();
        assert_eq!(flagged, vec!["note"]);
    }

    #[test]
    fn test_card_number_flagged_only_if_luhn_valid() {
        let valid = "date,merchant,amount\n2026-07-01,card 4111111111111111,4.50\n";
        let invalid = "date,merchant,amount\n2026-07-01,ref 4111111111111112,4.50\n";
        assert_eq!(scan_columns(valid.as_bytes()).unwrap(), vec!["merchant"]);
        assert!(scan_columns(invalid.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_date_and_amount_columns_skipped() {
        // Amounts with many digits must not trip the card detector.
        let csv = "date,merchant,amount\n2026-07-01,SHOP,1234567890123.45\n";
        assert!(scan_columns(csv.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_ssn_area_numbers_ignored() {
        // 000, 666, and 9xx area numbers are not valid SSNs.
        for bad in ["000-12-3456", "666-12-3456", "912-12-3456"] {
            let csv = format!("date,merchant,amount,note\n2026-07-01,SHOP,1.0,{}\n", bad);
            assert!(scan_columns(csv.as_bytes()).unwrap().is_empty(), "{}", bad);
        }
    }

    #[test]
    fn test_ssn_areas_around_666_still_flagged() {
        // Only the literal 666 area is excluded; its neighbors are valid.
        for valid in ["660-12-3456", "661-12-3456", "667-12-3456", "669-12-3456"] {
            let csv = format!("date,merchant,amount,note\n2026-07-01,SHOP,1.0,{}\n", valid);
            assert_eq!(scan_columns(csv.as_bytes()).unwrap(), vec!["note"], "{}", valid);
        }
    }
}
