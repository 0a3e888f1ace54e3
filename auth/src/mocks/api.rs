//! Mock account endpoints for testing.

use crate::claims::decode_claims;
use crate::error::{AuthError, Result};
use crate::providers::AuthApi;
use crate::state::{
    Credentials, GoogleCredential, ProfileUpdate, RegistrationRequest, TokenPair, UserClaims,
};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

#[derive(Debug, Default)]
struct Inner {
    accounts: HashMap<String, (String, TokenPair)>,
    google: HashMap<String, TokenPair>,
    refreshes: HashMap<String, TokenPair>,
    refresh_latency: Duration,
    profile_failure: Option<AuthError>,
    registrations: Vec<RegistrationRequest>,
    login_calls: usize,
    refresh_calls: usize,
}

/// Mock account endpoints.
///
/// Answers from scripted accounts and refresh tokens and counts calls.
/// Clones share scripts and counters.
#[derive(Debug, Clone, Default)]
pub struct MockAuthApi {
    inner: Arc<Mutex<Inner>>,
}

fn rejected(status: u16, message: &str) -> AuthError {
    AuthError::Rejected {
        status,
        message: message.to_string(),
    }
}

impl MockAuthApi {
    /// Create a mock with no accounts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Accept `email`/`password`, answering with `tokens`.
    #[must_use]
    pub fn with_account(self, email: &str, password: &str, tokens: TokenPair) -> Self {
        self.lock()
            .accounts
            .insert(email.to_string(), (password.to_string(), tokens));
        self
    }

    /// Accept the Google ID token `credential`, answering with `tokens`.
    #[must_use]
    pub fn with_google(self, credential: &str, tokens: TokenPair) -> Self {
        self.lock().google.insert(credential.to_string(), tokens);
        self
    }

    /// Accept `refresh_token` once, answering with `tokens`.
    #[must_use]
    pub fn with_refresh(self, refresh_token: &str, tokens: TokenPair) -> Self {
        self.lock()
            .refreshes
            .insert(refresh_token.to_string(), tokens);
        self
    }

    /// Delay every refresh answer.
    #[must_use]
    pub fn with_refresh_latency(self, latency: Duration) -> Self {
        self.lock().refresh_latency = latency;
        self
    }

    /// Make profile updates fail with `error`.
    #[must_use]
    pub fn with_profile_failure(self, error: AuthError) -> Self {
        self.lock().profile_failure = Some(error);
        self
    }

    /// Number of login attempts (password and Google).
    #[must_use]
    pub fn login_calls(&self) -> usize {
        self.lock().login_calls
    }

    /// Number of refresh attempts.
    #[must_use]
    pub fn refresh_calls(&self) -> usize {
        self.lock().refresh_calls
    }

    /// Accepted registrations.
    #[must_use]
    pub fn registrations(&self) -> Vec<RegistrationRequest> {
        self.lock().registrations.clone()
    }
}

impl AuthApi for MockAuthApi {
    fn login(&self, credentials: &Credentials) -> impl Future<Output = Result<TokenPair>> + Send {
        let mut inner = self.lock();
        inner.login_calls += 1;
        let outcome = match inner.accounts.get(&credentials.email) {
            Some((password, tokens)) if *password == credentials.password => Ok(tokens.clone()),
            _ => Err(rejected(401, "Invalid email or password")),
        };
        std::future::ready(outcome)
    }

    fn login_google(
        &self,
        credential: &GoogleCredential,
    ) -> impl Future<Output = Result<TokenPair>> + Send {
        let mut inner = self.lock();
        inner.login_calls += 1;
        let outcome = inner
            .google
            .get(&credential.credential)
            .cloned()
            .ok_or_else(|| rejected(401, "Google sign-in failed"));
        std::future::ready(outcome)
    }

    fn register(&self, request: &RegistrationRequest) -> impl Future<Output = Result<()>> + Send {
        let mut inner = self.lock();
        let taken = inner.accounts.contains_key(&request.email)
            || inner.registrations.iter().any(|r| r.email == request.email);
        let outcome = if taken {
            Err(rejected(409, "Email already registered"))
        } else {
            inner.registrations.push(request.clone());
            Ok(())
        };
        std::future::ready(outcome)
    }

    fn refresh(&self, refresh_token: &str) -> impl Future<Output = Result<TokenPair>> + Send {
        let (outcome, latency) = {
            let mut inner = self.lock();
            inner.refresh_calls += 1;
            let outcome = inner
                .refreshes
                .remove(refresh_token)
                .ok_or_else(|| rejected(401, "Invalid refresh token"));
            (outcome, inner.refresh_latency)
        };

        async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            outcome
        }
    }

    fn update_profile(
        &self,
        token: &str,
        update: &ProfileUpdate,
    ) -> impl Future<Output = Result<UserClaims>> + Send {
        let outcome = match self.lock().profile_failure.clone() {
            Some(error) => Err(error),
            None => decode_claims(token)
                .map(|mut user| {
                    if let Some(username) = &update.username {
                        user.username.clone_from(username);
                    }
                    if let Some(email) = &update.email {
                        user.email.clone_from(email);
                        user.email_confirmed = false;
                    }
                    user
                })
                .ok_or_else(|| rejected(401, "Unauthorized")),
        };
        std::future::ready(outcome)
    }
}
