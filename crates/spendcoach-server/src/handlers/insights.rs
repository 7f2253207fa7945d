//! Analytics endpoints: summary, subscriptions, anomalies, forecast,
//! trends, compare, score, what-if

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{AppError, AppState};
use spendcoach_core::privacy::mask_merchant;
use spendcoach_core::{
    compare_report, context, detect_anomalies, detect_subscriptions, goal_forecast, health_score,
    spending_summary, spending_trends, Anomaly, CompareReport, ForecastResult, HealthScore,
    SpendingSummary, SubscriptionCluster, TrendsReport, WhatIfResult,
};

use super::data::PrivacyQuery;

const DEFAULT_INCOME_MONTHLY: f64 = 1800.0;
const DEFAULT_GOAL_AMOUNT: f64 = 3000.0;
const DEFAULT_MONTHS_TO_GOAL: u32 = 10;
const DEFAULT_TRENDS_MONTHS: usize = 6;

#[derive(Debug, Deserialize)]
pub struct GoalQuery {
    pub income_monthly: Option<f64>,
    pub goal_amount: Option<f64>,
    pub months_to_goal: Option<u32>,
    #[serde(default)]
    pub privacy: bool,
}

impl GoalQuery {
    pub(crate) fn income(&self) -> f64 {
        self.income_monthly.unwrap_or(DEFAULT_INCOME_MONTHLY)
    }

    pub(crate) fn goal(&self) -> f64 {
        self.goal_amount.unwrap_or(DEFAULT_GOAL_AMOUNT)
    }

    pub(crate) fn months(&self) -> u32 {
        self.months_to_goal.unwrap_or(DEFAULT_MONTHS_TO_GOAL)
    }
}

/// GET /api/summary - Current-month spend broken down by category and merchant
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PrivacyQuery>,
) -> Json<SpendingSummary> {
    let snap = state.store.snapshot();
    Json(spending_summary(&snap.transactions, params.privacy))
}

/// GET /api/subscriptions - Detected recurring charges
pub async fn get_subscriptions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PrivacyQuery>,
) -> Json<Vec<SubscriptionCluster>> {
    let snap = state.store.snapshot();
    let (_, expense) = context::prepare(&snap.transactions);
    let mut subs = detect_subscriptions(&expense, &state.analytics.subscriptions);
    if params.privacy {
        for sub in &mut subs {
            sub.merchant = mask_merchant(&sub.merchant);
        }
    }
    Json(subs)
}

/// GET /api/anomalies - Per-merchant z-score outliers
pub async fn get_anomalies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PrivacyQuery>,
) -> Json<Vec<Anomaly>> {
    let snap = state.store.snapshot();
    let (_, expense) = context::prepare(&snap.transactions);
    let mut anomalies = detect_anomalies(&expense, &state.analytics.anomalies);
    if params.privacy {
        for a in &mut anomalies {
            a.merchant = mask_merchant(&a.merchant);
        }
    }
    Json(anomalies)
}

/// GET /api/anomalies_ml - Model-based anomaly detection, when a model is
/// configured
pub async fn get_anomalies_ml(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let Some(model) = &state.anomaly_model else {
        return Ok(Json(json!({
            "available": false,
            "reason": "No anomaly model configured; use /api/anomalies for the statistical detector.",
        })));
    };

    let snap = state.store.snapshot();
    let (_, expense) = context::prepare(&snap.transactions);
    let anomalies = model.detect(&expense)?;
    Ok(Json(json!({
        "available": true,
        "model": model.name(),
        "anomalies": anomalies,
    })))
}

/// GET /api/forecast - Savings-goal projection for the current month
pub async fn get_forecast(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GoalQuery>,
) -> Json<ForecastResult> {
    let snap = state.store.snapshot();
    let (_, expense) = context::prepare(&snap.transactions);

    // Forecast against the latest month's spend, zero when the ledger is empty.
    let expense_monthly = spendcoach_core::months::latest_month(&expense)
        .map(|current| {
            expense
                .iter()
                .filter(|tx| spendcoach_core::months::month_key(tx.date) == current)
                .map(|tx| tx.amount)
                .sum()
        })
        .unwrap_or(0.0);

    Json(goal_forecast(
        params.income(),
        expense_monthly,
        params.goal(),
        params.months(),
    ))
}

#[derive(Debug, Deserialize)]
pub struct TrendsQuery {
    pub months: Option<usize>,
}

/// GET /api/trends - Dense month-by-month totals and per-category series
pub async fn get_trends(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TrendsQuery>,
) -> Json<TrendsReport> {
    let months = params.months.unwrap_or(DEFAULT_TRENDS_MONTHS).clamp(2, 24);
    let snap = state.store.snapshot();
    let (_, expense) = context::prepare(&snap.transactions);
    Json(spending_trends(&expense, months))
}

/// GET /api/compare - This month vs last month plus gap-closing suggestions
pub async fn get_compare(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GoalQuery>,
) -> Json<CompareReport> {
    let snap = state.store.snapshot();
    Json(compare_report(
        &snap.transactions,
        params.income(),
        params.goal(),
        params.months(),
        &state.analytics,
    ))
}

/// GET /api/score - Blended 0-100 financial health score
pub async fn get_score(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GoalQuery>,
) -> Json<HealthScore> {
    let snap = state.store.snapshot();
    let (_, expense) = context::prepare(&snap.transactions);
    Json(health_score(
        &expense,
        params.income(),
        &state.analytics.subscriptions,
        &state.analytics.anomalies,
    ))
}

/// POST /api/whatif - Re-forecast with hypothetical per-category cuts
pub async fn what_if(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GoalQuery>,
    Json(cuts): Json<BTreeMap<String, f64>>,
) -> Json<WhatIfResult> {
    let snap = state.store.snapshot();
    let (_, expense) = context::prepare(&snap.transactions);
    Json(spendcoach_core::what_if(
        &expense,
        &cuts,
        params.income(),
        params.goal(),
        params.months(),
    ))
}
