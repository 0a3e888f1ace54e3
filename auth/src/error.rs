//! Error types for session operations.

use thiserror::Error;

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Failures surfaced by the session manager and its providers.
///
/// Verification and refresh never return these; they fold every failure into
/// `false` (and a logout for refresh). Login, registration and profile
/// updates return them to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    // ═══════════════════════════════════════════════════════════
    // Server answers
    // ═══════════════════════════════════════════════════════════

    /// The server refused the request.
    ///
    /// `message` comes from the response body when it carries one and is
    /// meant for display.
    #[error("{message}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Server-provided explanation
        message: String,
    },

    /// The server answered successfully but with a body we cannot use.
    #[error("Unexpected response from server: {0}")]
    InvalidResponse(String),

    /// The server issued a token whose claims cannot be read.
    #[error("Received a malformed token")]
    MalformedToken,

    // ═══════════════════════════════════════════════════════════
    // Session
    // ═══════════════════════════════════════════════════════════

    /// The operation needs a logged-in session.
    #[error("Not signed in")]
    NotAuthenticated,

    /// The session expired and could not be refreshed.
    #[error("Session has expired")]
    SessionExpired,

    // ═══════════════════════════════════════════════════════════
    // System
    // ═══════════════════════════════════════════════════════════

    /// The request never reached the server or the response was cut off.
    #[error("Network error: {0}")]
    Network(String),

    /// Reading or writing the persisted session failed.
    #[error("Session storage error: {0}")]
    Storage(String),
}

impl AuthError {
    /// Whether the server rejected the caller's input or credentials (4xx).
    ///
    /// # Examples
    ///
    /// ```
    /// use cinelog_auth::AuthError;
    ///
    /// let error = AuthError::Rejected { status: 401, message: "Invalid password".into() };
    /// assert!(error.is_client_error());
    /// assert!(!AuthError::Network("timed out".into()).is_client_error());
    /// ```
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Rejected { status, .. } if *status >= 400 && *status < 500)
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::InvalidResponse(error.to_string())
        } else {
            Self::Network(error.to_string())
        }
    }
}

impl From<std::io::Error> for AuthError {
    fn from(error: std::io::Error) -> Self {
        Self::Storage(error.to_string())
    }
}
