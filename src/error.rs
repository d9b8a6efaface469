use thiserror::Error;

/// Errors surfaced by the scoring engine and its loading helpers
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("at least 2 samples are required for scoring, got {found}")]
    InsufficientData { found: usize },

    #[error("sample {index} has a non-finite foodRemaining value ({value})")]
    InvalidSample { index: usize, value: f64 },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid csv: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, ScoringError>;
