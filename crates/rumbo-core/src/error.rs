use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RumboError {
    #[error("failed to load tolerance profile from {path}: {reason}")]
    ToleranceLoad { path: PathBuf, reason: String },

    #[error("invalid tolerance profile: {0}")]
    ToleranceInvalid(String),

    #[error("invalid segment scale: {0}")]
    InvalidScale(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
