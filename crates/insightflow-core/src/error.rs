//! Error types for InsightFlow

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Subject must not be empty")]
    EmptyInput,

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("Insight contract violation: {0}")]
    ContractViolation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
