//! Error types for tagdive

use thiserror::Error;

/// Errors that can occur during deployment analysis.
///
/// Zero dives detected is not an error: the pipeline returns an analysis with
/// empty collections so callers can distinguish "bad input" (an `Err` here)
/// from "no dives found".
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Channel length mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Missing required channel: {0}")]
    MissingChannel(String),

    #[error("Sampling rate mismatch: {0}")]
    SamplingRateMismatch(String),

    #[error("Failed to parse recording: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Encoding error: {0}")]
    EncodingError(String),
}
