//! Merchant-text categorization and income/expense split
//!
//! Categories come from a fixed, ordered keyword table. Order matters:
//! when a merchant matches keywords from two categories, the earlier entry
//! in the table wins.

use crate::models::{CategorizedTransaction, Transaction};

/// Fallback category when no keyword matches.
pub const OTHER_CATEGORY: &str = "Other";

/// Category assigned to inbound money (payroll, refunds, credits).
pub const INCOME_CATEGORY: &str = "Income";

/// Category used by the coffee insight.
pub const COFFEE_CATEGORY: &str = "Coffee";

/// Ordered (category, keywords) table. First match wins.
///
/// Keywords are matched as substrings of the upper-cased merchant text.
pub const CATEGORY_RULES: &[(&str, &[&str])] = &[
    ("Coffee", &["STARBUCKS", "PEET", "COFFEE", "DUTCH BROS"]),
    (
        "Groceries",
        &[
            "SAFEWAY",
            "WHOLE FOODS",
            "TRADER JOE",
            "KROGER",
            "RALPHS",
            "SPROUTS",
        ],
    ),
    (
        "Dining",
        &[
            "UBEREATS",
            "DOORDASH",
            "GRUBHUB",
            "RESTAURANT",
            "DINER",
            "PIZZA",
        ],
    ),
    (
        "Transport",
        &["UBER", "LYFT", "SHELL", "CHEVRON", "EXXON", "BP", "GAS"],
    ),
    (
        "Shopping",
        &["AMAZON", "TARGET", "WALMART", "BEST BUY", "APPLE", "NIKE"],
    ),
    (
        "Entertainment",
        &["SPOTIFY", "NETFLIX", "HULU", "DISNEY", "YOUTUBE PREMIUM"],
    ),
    (
        "Utilities",
        &[
            "COMCAST", "XFINITY", "AT&T", "T-MOBILE", "VERIZON", "PG&E", "WATER",
        ],
    ),
    ("Rent", &["APARTMENTS", "RENT", "PROPERTY MGMT"]),
    (
        "Income",
        &[
            "PAYROLL",
            "DIRECT DEPOSIT",
            "VENMO CREDIT",
            "ZELLE CREDIT",
            "REFUND",
        ],
    ),
];

/// Assign a category to a single merchant string.
///
/// Total and deterministic: the same merchant text always yields the same
/// category.
pub fn categorize_merchant(merchant: &str) -> &'static str {
    let upper = merchant.to_uppercase();
    for (category, keywords) in CATEGORY_RULES {
        if keywords.iter().any(|k| upper.contains(k)) {
            return category;
        }
    }
    OTHER_CATEGORY
}

/// Categorize every transaction in the ledger.
pub fn categorize(transactions: &[Transaction]) -> Vec<CategorizedTransaction> {
    transactions
        .iter()
        .map(|tx| CategorizedTransaction {
            date: tx.date,
            merchant: tx.merchant.clone(),
            amount: tx.amount,
            category: categorize_merchant(&tx.merchant).to_string(),
        })
        .collect()
}

/// Partition categorized transactions into income and expense sub-ledgers.
///
/// A transaction is income iff its amount is negative or its category is
/// "Income". Both outputs carry absolute amounts; the sign is discarded
/// here and callers must not rely on it.
pub fn split_income_expense(
    transactions: Vec<CategorizedTransaction>,
) -> (Vec<CategorizedTransaction>, Vec<CategorizedTransaction>) {
    let mut income = Vec::new();
    let mut expense = Vec::new();
    for mut tx in transactions {
        let is_income = tx.amount < 0.0 || tx.category == INCOME_CATEGORY;
        tx.amount = tx.amount.abs();
        if is_income {
            income.push(tx);
        } else {
            expense.push(tx);
        }
    }
    (income, expense)
}
