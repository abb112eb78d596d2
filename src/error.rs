//! Error types for authprobe

use thiserror::Error;

/// How a failure should be counted in the run report.
///
/// Contract failures mean the service broke its documented behavior;
/// infrastructure failures mean the harness could not complete the check
/// (connection refused, unreadable fixture file) and say nothing about the
/// service's contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    Contract,
    Infrastructure,
}

/// The main error type for probe operations
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Connection, DNS, or timeout failure before a response was observed.
    #[error("transport failure at {endpoint}: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response did not match the expected contract.
    #[error("contract violation at {endpoint}: {detail}")]
    Contract { endpoint: String, detail: String },

    /// Sign-in did not yield a usable session cookie. Counted as a contract
    /// violation against the sign-in step, not swallowed.
    #[error("no usable session cookie from {endpoint}: {reason}")]
    MissingSession { endpoint: String, reason: String },

    /// Harness-side failure, e.g. an unreadable avatar fixture file.
    #[error("fixture error: {0}")]
    Fixture(String),
}

impl ProbeError {
    pub fn class(&self) -> FailureClass {
        match self {
            ProbeError::Contract { .. } | ProbeError::MissingSession { .. } => {
                FailureClass::Contract
            }
            ProbeError::Transport { .. } | ProbeError::Fixture(_) => FailureClass::Infrastructure,
        }
    }

    /// The endpoint the failure was observed at, when one applies.
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            ProbeError::Transport { endpoint, .. }
            | ProbeError::Contract { endpoint, .. }
            | ProbeError::MissingSession { endpoint, .. } => Some(endpoint),
            ProbeError::Fixture(_) => None,
        }
    }
}

/// Result type alias for probe operations
pub type Result<T> = std::result::Result<T, ProbeError>;
