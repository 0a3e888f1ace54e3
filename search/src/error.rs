//! Error types for query providers.

use thiserror::Error;

/// Failure of a single query.
///
/// Never escapes the engine: a failed query for the current epoch empties the
/// result list and is logged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The request never produced a response.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("Search backend returned status {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },

    /// The response body could not be interpreted as items.
    #[error("Malformed search response: {0}")]
    Decode(String),

    /// Provider-specific failure.
    #[error("Query failed: {0}")]
    Provider(String),
}

impl From<reqwest::Error> for QueryError {
    fn from(error: reqwest::Error) -> Self {
        if let Some(status) = error.status() {
            Self::Status {
                status: status.as_u16(),
            }
        } else if error.is_decode() {
            Self::Decode(error.to_string())
        } else {
            Self::Transport(error.to_string())
        }
    }
}
