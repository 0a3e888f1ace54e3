//! Session configuration.
//!
//! Endpoint locations and the storage slot. Values come from the application
//! (or the environment via [`SessionConfig::from_env`]), not from constants
//! scattered through the code.

use std::path::PathBuf;
use thiserror::Error;

/// Environment variable holding the API base URL.
pub const ENV_API_URL: &str = "CINELOG_API_URL";

/// Environment variable holding the session storage directory.
pub const ENV_STORAGE_DIR: &str = "CINELOG_STORAGE_DIR";

/// Name of the persisted session slot.
pub const DEFAULT_STORAGE_KEY: &str = "user-data";

/// Invalid configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The API base URL is not an absolute http(s) URL.
    #[error("Invalid API base URL {value:?}: {reason}")]
    InvalidApiUrl {
        /// Offending value
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// A setting is present but empty.
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Session manager configuration.
///
/// # Examples
///
/// ```
/// use cinelog_auth::SessionConfig;
///
/// let config = SessionConfig::new("https://api.cinelog.app")
///     .with_storage_dir("/tmp/cinelog");
///
/// assert_eq!(config.endpoint(&config.refresh_path), "https://api.cinelog.app/auth/refresh-token");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// API base URL, without trailing slash.
    pub api_base_url: String,

    /// Email/password login path.
    pub login_path: String,

    /// Google login path.
    pub google_login_path: String,

    /// Registration path.
    pub register_path: String,

    /// Token refresh path.
    pub refresh_path: String,

    /// Profile update path.
    pub profile_path: String,

    /// Name of the persisted slot.
    ///
    /// Default: `"user-data"`
    pub storage_key: String,

    /// Directory holding the persisted slot.
    ///
    /// Default: `.cinelog` in the working directory
    pub storage_dir: PathBuf,
}

impl SessionConfig {
    /// Configuration for the API at `api_base_url` with the default paths.
    #[must_use]
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            login_path: "/auth/login".to_string(),
            google_login_path: "/auth/google-login".to_string(),
            register_path: "/auth/register".to_string(),
            refresh_path: "/auth/refresh-token".to_string(),
            profile_path: "/users/profile".to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            storage_dir: PathBuf::from(".cinelog"),
        }
    }

    /// Read configuration from `CINELOG_API_URL` and `CINELOG_STORAGE_DIR`.
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`SessionConfig::from_env`], reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL) {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(dir) = lookup(ENV_STORAGE_DIR) {
            if dir.trim().is_empty() {
                return Err(ConfigError::Empty(ENV_STORAGE_DIR));
            }
            config.storage_dir = PathBuf::from(dir);
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that the base URL is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiUrl`] if it is not an absolute http(s) URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidApiUrl {
            value: self.api_base_url.clone(),
            reason,
        };

        let url = reqwest::Url::parse(&self.api_base_url).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {}", url.scheme())));
        }
        if self.storage_key.is_empty() {
            return Err(ConfigError::Empty("storage key"));
        }
        Ok(())
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.api_base_url)
    }

    /// Set the storage directory.
    #[must_use]
    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = dir.into();
        self
    }

    /// Set the storage slot name.
    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new("http://localhost:5000/api")
    }
}
