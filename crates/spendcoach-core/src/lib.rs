//! Spendcoach Core Library
//!
//! Transaction analytics engine for the spendcoach budgeting coach:
//! - Keyword categorization and income/expense split
//! - Calendar-month bucketing with dense, gap-filled series
//! - Recurring-charge (subscription) detection
//! - Per-merchant anomaly scoring
//! - Goal forecasting, what-if simulation, and greedy cut suggestions
//! - Trend and month-over-month comparison aggregation
//! - Blended financial health score
//! - Context assembly for the optional narration layer
//!
//! Every analytic is a pure function over an immutable ledger snapshot;
//! the only shared state is the versioned snapshot in [`ledger::LedgerStore`].

pub mod anomalies;
pub mod categorize;
pub mod context;
pub mod error;
pub mod forecast;
pub mod import;
pub mod ledger;
pub mod models;
pub mod months;
pub mod narrate;
pub mod pii;
pub mod privacy;
pub mod sample;
pub mod score;
pub mod subscriptions;
pub mod suggest;
pub mod trends;

pub use anomalies::{detect_anomalies, AnomalyConfig, AnomalyModel};
pub use categorize::{categorize, categorize_merchant, split_income_expense};
pub use context::{
    cancel_draft, coffee_insight, compare_report, compose_context, prepare, spending_summary,
    AnalyticsConfig,
};
pub use error::{Error, Result};
pub use forecast::{goal_forecast, what_if};
pub use ledger::{Ledger, LedgerStore};
pub use models::{
    Anomaly, CancelDraft, CategorizedTransaction, CategoryDelta, CategorySpend, CoachContext,
    CoffeeInsight, CompareReport, ForecastResult, HealthScore, MerchantSpend, Signal,
    SpendingSummary, SubscriptionCluster, Suggestion, Transaction, TrendsReport, WhatIfResult,
};
pub use narrate::{rule_based_answer, rule_based_nudges, Narrator, OpenAiNarrator};
pub use score::health_score;
pub use subscriptions::{detect_subscriptions, SubscriptionConfig};
pub use suggest::{suggest_cuts, SuggestionConfig};
pub use trends::{compare_months, spending_trends};
