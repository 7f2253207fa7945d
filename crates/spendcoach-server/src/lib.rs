//! Spendcoach Web Server
//!
//! Axum-based REST API over the spendcoach analytics engine. The server is
//! thin glue: every endpoint reads a ledger snapshot, runs one or more pure
//! analytics, and returns plain structured data. Dataset replacement
//! (upload/reset/clear) goes through the single writer path in the core
//! ledger store.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use spendcoach_core::anomalies::AnomalyModel;
use spendcoach_core::narrate::{self, Narrator};
use spendcoach_core::sample::{generate_sample_transactions, DEFAULT_DAYS, DEFAULT_SEED};
use spendcoach_core::{AnalyticsConfig, LedgerStore};

mod handlers;


/// Maximum dataset upload size (10 MB).
pub const MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only).
    pub allowed_origins: Vec<String>,
    /// Skip the PII scan on upload (demo escape hatch).
    pub skip_pii_scan: bool,
}

/// Shared application state
pub struct AppState {
    pub store: LedgerStore,
    pub config: ServerConfig,
    pub analytics: AnalyticsConfig,
    /// Optional narration backend; `None` falls back to rule-based nudges.
    pub narrator: Option<Box<dyn Narrator>>,
    /// Optional model-based anomaly detector.
    pub anomaly_model: Option<Box<dyn AnomalyModel>>,
}

/// Create the application router, seeding the ledger with sample data.
pub fn create_router(config: ServerConfig) -> Router {
    let store = LedgerStore::new(generate_sample_transactions(DEFAULT_DAYS, DEFAULT_SEED));
    create_router_with_store(store, config)
}

/// Create the application router over an existing ledger store (for tests).
pub fn create_router_with_store(store: LedgerStore, config: ServerConfig) -> Router {
    let narrator = narrate::from_env();
    if narrator.is_some() {
        info!("narrator backend configured");
    } else {
        info!("narrator not configured (set OPENAI_API_KEY to enable coaching text)");
    }

    let state = Arc::new(AppState {
        store,
        config: config.clone(),
        analytics: AnalyticsConfig::default(),
        narrator,
        anomaly_model: None,
    });

    let api_routes = Router::new()
        // Dataset lifecycle
        .route("/health", get(handlers::health))
        .route(
            "/upload",
            post(handlers::upload_csv).layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE)),
        )
        .route("/reset", post(handlers::reset_to_sample))
        .route("/clear", post(handlers::clear_data))
        .route("/transactions", get(handlers::list_transactions))
        // Analytics
        .route("/summary", get(handlers::get_summary))
        .route("/subscriptions", get(handlers::get_subscriptions))
        .route("/anomalies", get(handlers::get_anomalies))
        .route("/anomalies_ml", get(handlers::get_anomalies_ml))
        .route("/forecast", get(handlers::get_forecast))
        .route("/trends", get(handlers::get_trends))
        .route("/compare", get(handlers::get_compare))
        .route("/score", get(handlers::get_score))
        .route("/whatif", post(handlers::what_if))
        // Coaching
        .route("/coach", get(handlers::get_coach))
        .route("/ask", post(handlers::ask))
        .route("/cancel_draft", get(handlers::get_cancel_draft));

    let cors = if config.allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    };

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Start the server
pub async fn serve(host: &str, port: u16, config: ServerConfig) -> anyhow::Result<()> {
    let app = create_router(config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "An internal error occurred".to_string(),
            internal: Some(err),
        }
    }
}
