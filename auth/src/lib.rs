//! # Cinelog Sessions
//!
//! JWT session management for Cinelog clients: sign-in, persisted sessions,
//! and token verification that refreshes at most once no matter how many
//! requests ask for it at the same time.
//!
//! ## Features
//!
//! - **Claims decoding**: read the user from a JWT payload without verifying it
//! - **Persistence**: the session survives restarts in a `"user-data"` slot
//! - **Single-flight refresh**: concurrent verifications share one refresh
//! - **Fail-closed**: a session that cannot be refreshed is signed out
//! - **Testable**: endpoints, storage and clock are injected
//!
//! ## Architecture
//!
//! ```text
//! SessionManager ──▶ AuthApi         (login, refresh, profile endpoints)
//!        │
//!        ├────────▶ SessionStorage  (persisted session slot)
//!        └────────▶ Clock           (token expiry)
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use cinelog_auth::{Credentials, SessionConfig, SessionManager};
//!
//! let config = SessionConfig::from_env()?;
//! let sessions = SessionManager::from_config(&config, reqwest::Client::new());
//!
//! sessions.login(Credentials::new("ripley@nostromo.io", "hunter2")).await?;
//!
//! // Before every authenticated request
//! let request = sessions.authorize(client.get(url)).await?;
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

// Public modules
pub mod claims;
pub mod config;
pub mod error;
pub mod manager;
pub mod providers;
pub mod state;

// Mock implementations for testing
#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

// Re-export main types for convenience
pub use claims::{decode_claims, expires_at, is_token_expired};
pub use config::{ConfigError, SessionConfig};
pub use error::{AuthError, Result};
pub use manager::SessionManager;
pub use providers::{AuthApi, FileStorage, HttpAuthApi, MemoryStorage, SessionStorage};
pub use state::{
    Credentials, GoogleCredential, PersistedSession, ProfileUpdate, RegistrationRequest, Session,
    TokenPair, UserClaims,
};
