//! Versioned in-memory ledger store
//!
//! The current dataset is a single immutable snapshot behind an `RwLock`.
//! Readers clone the `Arc` and compute over a consistent snapshot; replace,
//! reset, and clear install a whole new snapshot and bump the version
//! counter under the write lock, so two writers can never interleave and a
//! reader never observes a partial dataset.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::{Error, Result};
use crate::models::Transaction;

/// An immutable snapshot of the transaction table.
///
/// Consumers must treat a snapshot as stale once the store's version moves
/// past the snapshot's.
#[derive(Debug)]
pub struct Ledger {
    pub version: u64,
    pub last_updated: DateTime<Utc>,
    pub transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// Shared handle to the current ledger snapshot.
pub struct LedgerStore {
    current: RwLock<Arc<Ledger>>,
}

impl LedgerStore {
    /// Create a store seeded with an initial dataset (version 1).
    pub fn new(transactions: Vec<Transaction>) -> Self {
        let transactions = normalize(transactions);
        Self {
            current: RwLock::new(Arc::new(Ledger {
                version: 1,
                last_updated: Utc::now(),
                transactions,
            })),
        }
    }

    /// The current snapshot. Cheap: clones an `Arc`.
    pub fn snapshot(&self) -> Arc<Ledger> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Replace the dataset wholesale.
    ///
    /// Rows with non-finite amounts are dropped. An empty or all-invalid
    /// dataset is rejected with `Error::InvalidData` and the current
    /// snapshot is left unchanged.
    pub fn replace(&self, transactions: Vec<Transaction>) -> Result<Arc<Ledger>> {
        if transactions.is_empty() {
            return Err(Error::InvalidData("Empty dataset.".to_string()));
        }
        let transactions = normalize(transactions);
        if transactions.is_empty() {
            return Err(Error::InvalidData(
                "No valid rows in dataset.".to_string(),
            ));
        }
        Ok(self.install(transactions))
    }

    /// Drop all data, installing an empty snapshot. The version still bumps
    /// so consumers notice the change.
    pub fn clear(&self) -> Arc<Ledger> {
        self.install(Vec::new())
    }

    fn install(&self, transactions: Vec<Transaction>) -> Arc<Ledger> {
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let next = Arc::new(Ledger {
            version: guard.version + 1,
            last_updated: Utc::now(),
            transactions,
        });
        *guard = next.clone();
        info!(version = next.version, rows = next.len(), "ledger replaced");
        next
    }
}

/// Drop rows with non-finite amounts and sort by date.
fn normalize(mut transactions: Vec<Transaction>) -> Vec<Transaction> {
    transactions.retain(|tx| tx.amount.is_finite() && !tx.merchant.is_empty());
    transactions.sort_by_key(|tx| tx.date);
    transactions
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(date: &str, amount: f64) -> Transaction {
        Transaction {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            merchant: "TEST".to_string(),
            amount,
        }
    }

    #[test]
    fn test_replace_bumps_version() {
        let store = LedgerStore::new(vec![tx("2026-07-01", 10.0)]);
        assert_eq!(store.snapshot().version, 1);

        store.replace(vec![tx("2026-07-02", 20.0)]).unwrap();
        let snap = store.snapshot();
        assert_eq!(snap.version, 2);
        assert_eq!(snap.len(), 1);
    }

    #[test]
    fn test_replace_rejects_empty_and_keeps_snapshot() {
        let store = LedgerStore::new(vec![tx("2026-07-01", 10.0)]);
        let err = store.replace(Vec::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));

        let snap = store.snapshot();
        assert_eq!(snap.version, 1);
        assert_eq!(snap.len(), 1);
    }

    #[test]
    fn test_replace_drops_non_finite_rows() {
        let store = LedgerStore::new(Vec::new());
        store
            .replace(vec![tx("2026-07-01", f64::NAN), tx("2026-07-02", 5.0)])
            .unwrap();
        assert_eq!(store.snapshot().len(), 1);
    }

    #[test]
    fn test_replace_all_invalid_is_rejected() {
        let store = LedgerStore::new(Vec::new());
        let err = store
            .replace(vec![tx("2026-07-01", f64::INFINITY)])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn test_clear_installs_empty_snapshot() {
        let store = LedgerStore::new(vec![tx("2026-07-01", 10.0)]);
        store.clear();
        let snap = store.snapshot();
        assert_eq!(snap.version, 2);
        assert!(snap.is_empty());
    }

    #[test]
    fn test_snapshot_is_stable_across_replace() {
        let store = LedgerStore::new(vec![tx("2026-07-01", 10.0)]);
        let before = store.snapshot();
        store.replace(vec![tx("2026-07-02", 20.0)]).unwrap();
        // The old snapshot is unchanged; only its version marks it stale.
        assert_eq!(before.version, 1);
        assert_eq!(before.transactions[0].amount, 10.0);
    }

    #[test]
    fn test_transactions_sorted_by_date() {
        let store = LedgerStore::new(vec![tx("2026-07-05", 2.0), tx("2026-07-01", 1.0)]);
        let snap = store.snapshot();
        assert!(snap.transactions[0].date < snap.transactions[1].date);
    }
}
