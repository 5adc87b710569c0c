//! Error types for clip ingestion. Runtime paths (missing clip, missing bone) are
//! silent no-ops and never surface here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipError {
    #[error("clip json parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("track '{track}' has {values} values for {keys} keys (stride {stride})")]
    ValueCount {
        track: String,
        keys: usize,
        values: usize,
        stride: usize,
    },
    #[error("track '{0}' has non-numeric values")]
    NonNumeric(String),
    #[error("track '{0}' key times must be finite and non-decreasing")]
    KeyTimes(String),
    #[error("clip '{0}' duration must be finite and >= 0")]
    Duration(String),
    #[error("clip '{0}' is not one of Standing, Typing, Falling")]
    UnknownClip(String),
    #[error("clip '{0}' is already loaded")]
    AlreadyLoaded(String),
}
