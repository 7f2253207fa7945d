//! Coaching endpoints: narrated nudges, free-form questions, cancel drafts

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::{AppError, AppState};
use spendcoach_core::{
    cancel_draft, compose_context, rule_based_answer, rule_based_nudges, CancelDraft,
};

use super::insights::GoalQuery;

/// GET /api/coach - Nudges grounded in the full analytics context
///
/// When a narrator backend is configured its text is returned as
/// `llm_note`; the rule-based nudges are always included so the client
/// degrades gracefully.
pub async fn get_coach(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GoalQuery>,
) -> Json<Value> {
    let snap = state.store.snapshot();
    let ctx = compose_context(
        &snap.transactions,
        params.income(),
        params.goal(),
        params.months(),
        params.privacy,
        &state.analytics,
    );

    let llm_note = match &state.narrator {
        Some(narrator) => match narrator.narrate(&ctx).await {
            Ok(text) => Some(text),
            Err(err) => {
                warn!(error = %err, "narrator failed, falling back to rules");
                None
            }
        },
        None => None,
    };
    let nudges = rule_based_nudges(&ctx);

    Json(json!({
        "llm_note": llm_note,
        "nudges": nudges,
        "context": ctx,
    }))
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

/// POST /api/ask - Answer a free-form question about the dataset
pub async fn ask(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GoalQuery>,
    Json(req): Json<AskRequest>,
) -> Result<Json<Value>, AppError> {
    let question = req.question.trim();
    if question.is_empty() {
        return Err(AppError::bad_request("Question must not be empty"));
    }

    let snap = state.store.snapshot();
    let ctx = compose_context(
        &snap.transactions,
        params.income(),
        params.goal(),
        params.months(),
        params.privacy,
        &state.analytics,
    );

    if let Some(narrator) = &state.narrator {
        match narrator.answer(question, &ctx).await {
            Ok(text) => {
                return Ok(Json(json!({ "answer": text, "source": "llm" })));
            }
            Err(err) => {
                warn!(error = %err, "narrator failed, falling back to rules");
            }
        }
    }

    let answer = rule_based_answer(question, &ctx);
    Ok(Json(json!({ "answer": answer, "source": "rule" })))
}

#[derive(Debug, Deserialize)]
pub struct CancelQuery {
    pub merchant: String,
    /// Most recent charge amount; zero when the caller doesn't know it.
    #[serde(default)]
    pub charge: f64,
}

/// GET /api/cancel_draft - Email template for cancelling a recurring charge
pub async fn get_cancel_draft(Query(params): Query<CancelQuery>) -> Json<CancelDraft> {
    Json(cancel_draft(&params.merchant, params.charge))
}
