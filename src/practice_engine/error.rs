//! Error types for the practice engine.

use thiserror::Error;

use crate::practice_engine::models::OperationKind;

pub type Result<T> = std::result::Result<T, PracticeError>;

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum PracticeError {
    /// The parameters admit no valid question; pick different ones.
    #[error("{kind} cannot be generated with these settings: {reason}")]
    ConfigurationInfeasible { kind: OperationKind, reason: String },

    #[error("{name} must be between {min} and {max} (got {value})")]
    ParameterOutOfRange { name: &'static str, value: f64, min: f64, max: f64 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// User-facing validation message, e.g. a missing participant name.
    #[error("{0}")]
    Validation(String),

    #[error("a session is already running")]
    SessionActive,
}

impl From<serde_json::Error> for PracticeError {
    fn from(err: serde_json::Error) -> Self {
        PracticeError::InvalidConfig(err.to_string())
    }
}
