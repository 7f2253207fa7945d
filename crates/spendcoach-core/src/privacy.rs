//! Privacy masking for merchant names
//!
//! Demo privacy toggle: merchant names are replaced with a stable
//! pseudonym derived from a SHA-256 hash, so the same merchant always maps
//! to the same mask within and across requests.

use sha2::{Digest, Sha256};

/// Stable pseudonym for a merchant name.
pub fn mask_merchant(merchant: &str) -> String {
    let digest = Sha256::digest(merchant.as_bytes());
    let short = &hex::encode(digest)[..6];
    format!("Merchant-{}", short.to_uppercase())
}
