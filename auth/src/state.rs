//! Session state types.
//!
//! All types are `Clone` and serializable; [`PersistedSession`] is the exact
//! shape written to session storage.

use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════
// Identity
// ═══════════════════════════════════════════════════════════════════════

/// The signed-in user as described by the token (or by the profile endpoint
/// after an update).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClaims {
    /// User id.
    pub id: String,

    /// Display name.
    #[serde(alias = "userName")]
    pub username: String,

    /// Email address.
    pub email: String,

    /// Role name (e.g. `"User"`, `"Admin"`).
    #[serde(default)]
    pub role: String,

    /// Whether the user is muted by moderation.
    #[serde(default, alias = "isMuted")]
    pub is_muted: bool,

    /// Token expiry, seconds since the Unix epoch.
    #[serde(default)]
    pub exp: i64,

    /// Whether the email address has been confirmed.
    #[serde(default, alias = "emailConfirmed")]
    pub email_confirmed: bool,
}

/// Access token and refresh token issued together.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token.
    #[serde(alias = "token", alias = "accessToken")]
    pub jwt: String,

    /// Opaque refresh token.
    #[serde(alias = "refreshToken")]
    pub refresh: String,
}

impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("jwt", &"<redacted>")
            .field("refresh", &"<redacted>")
            .finish()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Session
// ═══════════════════════════════════════════════════════════════════════

/// In-memory session.
///
/// Starts empty, is hydrated from storage, and is reset to empty by logout.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// JWT access token.
    pub token: Option<String>,

    /// Refresh token.
    pub refresh_token: Option<String>,

    /// Signed-in user.
    pub user: Option<UserClaims>,

    /// Whether the session holds a usable login.
    pub is_authenticated: bool,

    /// Message of the last failed login, registration or profile update.
    pub error: Option<String>,
}

impl Session {
    /// Session established from a freshly issued token pair.
    #[must_use]
    pub fn authenticated(pair: TokenPair, user: UserClaims) -> Self {
        Self {
            token: Some(pair.jwt),
            refresh_token: Some(pair.refresh),
            user: Some(user),
            is_authenticated: true,
            error: None,
        }
    }

    /// The part of the session that is persisted.
    #[must_use]
    pub fn to_persisted(&self) -> PersistedSession {
        PersistedSession {
            user: self.user.clone(),
            token: self.token.clone(),
            refresh_token: self.refresh_token.clone(),
            is_authenticated: self.is_authenticated,
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("has_token", &self.token.is_some())
            .field("has_refresh_token", &self.refresh_token.is_some())
            .field("user", &self.user)
            .field("is_authenticated", &self.is_authenticated)
            .field("error", &self.error)
            .finish()
    }
}

/// Stored form of a session (the `"user-data"` slot).
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    /// Signed-in user.
    #[serde(default)]
    pub user: Option<UserClaims>,

    /// JWT access token.
    #[serde(default)]
    pub token: Option<String>,

    /// Refresh token.
    #[serde(default)]
    pub refresh_token: Option<String>,

    /// Whether the session holds a usable login.
    #[serde(default)]
    pub is_authenticated: bool,
}

impl std::fmt::Debug for PersistedSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistedSession")
            .field("user", &self.user)
            .field("has_token", &self.token.is_some())
            .field("is_authenticated", &self.is_authenticated)
            .finish_non_exhaustive()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Requests
// ═══════════════════════════════════════════════════════════════════════

/// Email and password login.
#[derive(Clone, Serialize)]
pub struct Credentials {
    /// Email address.
    pub email: String,

    /// Password.
    pub password: String,
}

impl Credentials {
    /// Create credentials.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// ID token obtained from Google Sign-In, exchanged for our own tokens.
#[derive(Clone, Serialize)]
pub struct GoogleCredential {
    /// Google ID token.
    pub credential: String,
}

impl std::fmt::Debug for GoogleCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleCredential").finish_non_exhaustive()
    }
}

/// New account registration.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationRequest {
    /// Desired display name.
    pub username: String,

    /// Email address.
    pub email: String,

    /// Password.
    pub password: String,
}

impl std::fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Partial profile update; absent fields are left unchanged by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// New email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// New biography.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,

    /// New avatar URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}
