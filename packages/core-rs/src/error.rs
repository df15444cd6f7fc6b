use crate::types::FactorKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RiskError {
    #[error("invalid {factor} sub-score {value}: expected a finite number in [0, 10]")]
    InvalidFactorInput { factor: FactorKind, value: f64 },
    #[error("location {0} not supported")]
    UnsupportedLocation(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RiskError>;

/// Raised when a bare sub-score is deserialised outside [0, 10].
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("sub-score {0} is outside [0, 10]")]
pub struct SubScoreRangeError(pub f64);
