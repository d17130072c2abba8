//! Error taxonomy for the analysis pipeline.

use thiserror::Error;

/// Failures surfaced by the core. None of these are retried.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Raw capture had an odd number of bytes; samples are two bytes wide.
    #[error("cannot decode samples: odd byte length {len}")]
    OddLength { len: usize },

    /// Min, max, mean and histograms are undefined for an empty series.
    #[error("sample series is empty")]
    EmptySeries,

    #[error("invalid bit width: {0}")]
    InvalidBitWidth(u32),

    #[error("invalid analysis config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
