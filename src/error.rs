//! Error taxonomy for the reconciliation workflow.
//!
//! Gateway failures are transport-level; the loader and linker translate them
//! into [`MissionError`] so callers only ever see workflow classifications.
use thiserror::Error;

/// Failure reported by a [`crate::gateway::DataGateway`] implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("request to {table} failed: {message}")]
    Transport { table: String, message: String },
    /// The backend answered with a non-success status.
    #[error("{table}: {message} (HTTP {status})")]
    Status {
        table: String,
        status: u16,
        message: String,
    },
    /// The response body did not have the expected shape.
    #[error("unexpected response from {table}: {message}")]
    Decode { table: String, message: String },
}

impl GatewayError {
    /// Backend-facing message, without the table prefix added by `Display`.
    pub fn message(&self) -> &str {
        match self {
            GatewayError::Transport { message, .. }
            | GatewayError::Status { message, .. }
            | GatewayError::Decode { message, .. } => message,
        }
    }
}

/// Classification surfaced to the user for every workflow failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MissionError {
    #[error("{0}")]
    DataAccess(String),
    #[error("{0}")]
    Validation(String),
    #[error("Asset with the provided SKU not found.")]
    AssetNotFound(String),
    #[error("{0}")]
    LinkWriteFailed(String),
    #[error("cannot {event} while {state}")]
    InvalidTransition {
        event: &'static str,
        state: &'static str,
    },
}

impl MissionError {
    /// Stable label used in notifications and `--json` output.
    pub fn classification(&self) -> &'static str {
        match self {
            MissionError::DataAccess(_) => "DataAccessError",
            MissionError::Validation(_) => "ValidationError",
            MissionError::AssetNotFound(_) => "AssetNotFound",
            MissionError::LinkWriteFailed(_) => "LinkWriteFailed",
            MissionError::InvalidTransition { .. } => "InvalidTransition",
        }
    }
}

impl From<GatewayError> for MissionError {
    fn from(err: GatewayError) -> Self {
        MissionError::DataAccess(err.message().to_string())
    }
}
