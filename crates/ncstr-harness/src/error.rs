//! Error type shared by the harness library and CLI.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing input '{0}'")]
    MissingInput(String),
    #[error("input '{key}': {reason}")]
    InvalidInput { key: String, reason: String },
    #[error("unsupported function '{0}'")]
    UnsupportedFunction(String),
    #[error("unsupported mode '{0}' (expected strict or hardened)")]
    UnsupportedMode(String),
    #[error("no fixture files found in {0}")]
    NoFixtures(String),
}
