//! Session providers.
//!
//! Traits for the session manager's external dependencies, plus the
//! production implementations:
//!
//! - [`AuthApi`]: the account endpoints ([`HttpAuthApi`])
//! - [`SessionStorage`]: the persisted `"user-data"` slot ([`FileStorage`], [`MemoryStorage`])

use crate::error::Result;
use crate::state::{
    Credentials, GoogleCredential, PersistedSession, ProfileUpdate, RegistrationRequest,
    TokenPair, UserClaims,
};
use std::future::Future;

pub mod http;
pub mod storage;

pub use http::HttpAuthApi;
pub use storage::{FileStorage, MemoryStorage};

/// Account endpoints of the backend.
///
/// Only the contract is fixed here; payload shapes belong to the implementation.
pub trait AuthApi: Send + Sync + 'static {
    /// Exchange email and password for tokens.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Rejected`](crate::AuthError::Rejected) for bad
    /// credentials, or a network error.
    fn login(&self, credentials: &Credentials) -> impl Future<Output = Result<TokenPair>> + Send;

    /// Exchange a Google ID token for tokens.
    ///
    /// # Errors
    ///
    /// Returns an error if the credential is refused or the request fails.
    fn login_google(
        &self,
        credential: &GoogleCredential,
    ) -> impl Future<Output = Result<TokenPair>> + Send;

    /// Create an account. Does not sign in.
    ///
    /// # Errors
    ///
    /// Returns an error if the registration is refused (e.g. email taken).
    fn register(&self, request: &RegistrationRequest) -> impl Future<Output = Result<()>> + Send;

    /// Exchange a refresh token for a new token pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the refresh token is unknown, expired or revoked.
    fn refresh(&self, refresh_token: &str) -> impl Future<Output = Result<TokenPair>> + Send;

    /// Apply a partial profile update and return the full updated user.
    ///
    /// # Errors
    ///
    /// Returns an error if the update is refused or the request fails.
    fn update_profile(
        &self,
        token: &str,
        update: &ProfileUpdate,
    ) -> impl Future<Output = Result<UserClaims>> + Send;
}

/// Persisted session slot.
///
/// Read once when a manager is created, written after every change.
/// Synchronous: the slot is small and local.
pub trait SessionStorage: Send + Sync + 'static {
    /// Read the stored session, `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Storage`](crate::AuthError::Storage) if the slot
    /// exists but cannot be read.
    fn load(&self) -> Result<Option<PersistedSession>>;

    /// Overwrite the stored session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Storage`](crate::AuthError::Storage) on write failure.
    fn save(&self, session: &PersistedSession) -> Result<()>;

    /// Remove the stored session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Storage`](crate::AuthError::Storage) on failure.
    fn clear(&self) -> Result<()>;
}
