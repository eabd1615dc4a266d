use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScoringError>;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("Invalid measurement: {0}")]
    InvalidMeasurement(String),

    #[error("Missing field '{0}' in raw data")]
    MissingField(&'static str),

    #[error("No valid time recorded")]
    NoTime,

    #[error("Target count must be at least 1")]
    InvalidTargetCount,

    #[error("Malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}
