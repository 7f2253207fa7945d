//! Dataset lifecycle handlers: health, upload, reset, clear, transactions

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{AppError, AppState};
use spendcoach_core::privacy::mask_merchant;
use spendcoach_core::sample::{generate_sample_transactions, DEFAULT_DAYS, DEFAULT_SEED};
use spendcoach_core::{import, pii, Error, Transaction};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub records: usize,
    pub version: u64,
    pub last_updated: String,
}

/// GET /api/health - Dataset liveness and version info
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let snap = state.store.snapshot();
    Json(HealthResponse {
        status: "ok",
        records: snap.len(),
        version: snap.version,
        last_updated: snap.last_updated.to_rfc3339(),
    })
}

#[derive(Serialize)]
pub struct ReplaceResponse {
    pub ok: bool,
    pub rows: usize,
    pub skipped: usize,
    pub version: u64,
}

/// POST /api/upload - Replace the dataset from a CSV request body
///
/// The upload is rejected (and the current dataset left unchanged) when the
/// CSV lacks the required columns, has no usable rows, or appears to
/// contain PII.
pub async fn upload_csv(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<ReplaceResponse>, AppError> {
    if !state.config.skip_pii_scan {
        let flagged = pii::scan_columns(body.as_bytes())
            .map_err(|e| AppError::bad_request(&format!("Failed to parse CSV: {e}")))?;
        if !flagged.is_empty() {
            let err = Error::PiiDetected(flagged);
            return Err(AppError::bad_request(&format!(
                "Upload blocked: {err}. Remove sensitive data before uploading."
            )));
        }
    }

    let parsed = import::parse_dataset(body.as_bytes()).map_err(|e| match e {
        Error::InvalidData(msg) => AppError::bad_request(&msg),
        other => AppError::from(other),
    })?;
    let rows = parsed.transactions.len();
    let snap = state.store.replace(parsed.transactions).map_err(|e| match e {
        Error::InvalidData(msg) => AppError::bad_request(&msg),
        other => AppError::from(other),
    })?;

    info!(rows, skipped = parsed.skipped, version = snap.version, "dataset uploaded");
    Ok(Json(ReplaceResponse {
        ok: true,
        rows,
        skipped: parsed.skipped,
        version: snap.version,
    }))
}

/// POST /api/reset - Restore the generated sample dataset
pub async fn reset_to_sample(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ReplaceResponse>, AppError> {
    let rows = generate_sample_transactions(DEFAULT_DAYS, DEFAULT_SEED);
    let count = rows.len();
    let snap = state.store.replace(rows).map_err(anyhow::Error::from)?;
    Ok(Json(ReplaceResponse {
        ok: true,
        rows: count,
        skipped: 0,
        version: snap.version,
    }))
}

/// POST /api/clear - Drop all data from memory (demo privacy control)
pub async fn clear_data(State(state): State<Arc<AppState>>) -> Json<ReplaceResponse> {
    let snap = state.store.clear();
    Json(ReplaceResponse {
        ok: true,
        rows: 0,
        skipped: 0,
        version: snap.version,
    })
}

#[derive(Debug, Deserialize)]
pub struct PrivacyQuery {
    #[serde(default)]
    pub privacy: bool,
}

/// GET /api/transactions - The raw dataset, optionally privacy-masked
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PrivacyQuery>,
) -> Json<Vec<Transaction>> {
    let snap = state.store.snapshot();
    let mut rows = snap.transactions.clone();
    if params.privacy {
        for tx in &mut rows {
            tx.merchant = mask_merchant(&tx.merchant);
        }
    }
    Json(rows)
}
