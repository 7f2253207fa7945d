//! Error types for spendcoach

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Possible PII detected in columns: {0:?}")]
    PiiDetected(Vec<String>),

    #[error("Narration error: {0}")]
    Narration(String),
}

pub type Result<T> = std::result::Result<T, Error>;
