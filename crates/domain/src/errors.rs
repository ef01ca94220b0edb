//! Error types used throughout the API clients

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Veyra API clients
///
/// The variants map onto the failure classes a caller can act on:
/// configuration and validation errors never reach the network, transport
/// errors wrap the underlying cause, and `Api` carries the HTTP status of
/// an unexpected response. `EmptyResult` is a sentinel, not a failure - a
/// search that matched nothing returns it so callers can tell "no matches"
/// apart from a broken transport.
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum VeyraError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("hostname already exists")]
    HostnameAlreadyExists,

    #[error("empty result")]
    EmptyResult,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl VeyraError {
    /// HTTP status of the remote response, when this error carries one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for Veyra client operations
pub type Result<T> = std::result::Result<T, VeyraError>;
