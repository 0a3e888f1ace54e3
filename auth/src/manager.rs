//! Session manager.
//!
//! Owns the process-wide [`Session`], keeps it in sync with session storage,
//! and coalesces concurrent token verification into one refresh attempt.

use crate::claims::{decode_claims, is_token_expired};
use crate::config::SessionConfig;
use crate::error::{AuthError, Result};
use crate::providers::{AuthApi, FileStorage, HttpAuthApi, SessionStorage};
use crate::state::{
    Credentials, GoogleCredential, PersistedSession, ProfileUpdate, RegistrationRequest, Session,
    TokenPair, UserClaims,
};
use cinelog_core::environment::{Clock, SystemClock};
use futures::future::{BoxFuture, FutureExt, Shared, WeakShared};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Verification shared by every caller that arrives while it runs.
type Verification = Shared<BoxFuture<'static, bool>>;

/// The running verification, held weakly so that it is dropped once every
/// caller has given up on it.
struct InFlight {
    id: u64,
    verification: WeakShared<BoxFuture<'static, bool>>,
}

struct Inner<A, S, C> {
    api: A,
    storage: S,
    clock: C,
    session: RwLock<Session>,
    /// Advanced under the session write lock by every sign-in and sign-out.
    generation: AtomicU64,
    in_flight: Mutex<Option<InFlight>>,
    next_verification: AtomicU64,
}

/// Clears the in-flight slot when its verification settles or is dropped.
struct InFlightGuard<A, S, C> {
    inner: Arc<Inner<A, S, C>>,
    id: u64,
}

impl<A, S, C> Drop for InFlightGuard<A, S, C> {
    fn drop(&mut self) {
        let mut slot = self
            .inner
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if slot.as_ref().is_some_and(|running| running.id == self.id) {
            slot.take();
        }
    }
}

/// Authenticated session handle.
///
/// Construct one per application and pass clones down; clones share the
/// session, the storage slot and the in-flight verification.
///
/// - `login`, `login_google`, `refresh_access_token` and `update_profile`
///   persist the session after a successful change.
/// - `logout` (explicit, or after a failed refresh) resets every field and
///   clears storage.
/// - [`verify_token`](Self::verify_token) is single-flight: callers that
///   arrive while a verification is running await the same outcome.
///
/// The refresh call has no timeout. A refresh endpoint that never answers
/// keeps every coalesced `verify_token` caller waiting.
///
/// # Examples
///
/// ```
/// use cinelog_auth::SessionManager;
/// use cinelog_auth::mocks::MockAuthApi;
/// use cinelog_auth::providers::MemoryStorage;
///
/// # tokio_test::block_on(async {
/// let manager = SessionManager::new(MockAuthApi::new(), MemoryStorage::new());
///
/// assert!(!manager.is_authenticated());
/// assert!(!manager.verify_token().await);
/// # });
/// ```
pub struct SessionManager<A, S, C = SystemClock> {
    inner: Arc<Inner<A, S, C>>,
}

impl<A, S, C> Clone for SessionManager<A, S, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A, S, C> std::fmt::Debug for SessionManager<A, S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let session = self
            .inner
            .session
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("SessionManager")
            .field("session", &*session)
            .finish_non_exhaustive()
    }
}

impl SessionManager<HttpAuthApi, FileStorage> {
    /// Manager talking to the configured API and persisting to the
    /// configured storage slot.
    #[must_use]
    pub fn from_config(config: &SessionConfig, client: reqwest::Client) -> Self {
        Self::new(
            HttpAuthApi::new(client, config.clone()),
            FileStorage::new(&config.storage_dir, &config.storage_key),
        )
    }
}

impl<A: AuthApi, S: SessionStorage> SessionManager<A, S> {
    /// Create a manager using the system clock, hydrated from `storage`.
    #[must_use]
    pub fn new(api: A, storage: S) -> Self {
        Self::with_clock(api, storage, SystemClock)
    }
}

impl<A, S, C> SessionManager<A, S, C>
where
    A: AuthApi,
    S: SessionStorage,
    C: Clock + 'static,
{
    /// Create a manager reading time from `clock`, hydrated from `storage`.
    ///
    /// An unreadable slot is logged and treated as empty.
    #[must_use]
    pub fn with_clock(api: A, storage: S, clock: C) -> Self {
        let session = hydrate(&storage);
        Self {
            inner: Arc::new(Inner {
                api,
                storage,
                clock,
                session: RwLock::new(session),
                generation: AtomicU64::new(0),
                in_flight: Mutex::new(None),
                next_verification: AtomicU64::new(0),
            }),
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Sign-in
    // ═══════════════════════════════════════════════════════════════════

    /// Sign in with email and password.
    ///
    /// On success the session holds the new tokens and the decoded user.
    ///
    /// # Errors
    ///
    /// Returns the endpoint's error, or [`AuthError::MalformedToken`] if the
    /// issued token cannot be decoded. The message is recorded in
    /// [`last_error`](Self::last_error); the current session is left as is.
    #[tracing::instrument(skip_all)]
    pub async fn login(&self, credentials: Credentials) -> Result<UserClaims> {
        let outcome = self.inner.api.login(&credentials).await;
        self.complete_sign_in(outcome)
    }

    /// Sign in with a Google ID token.
    ///
    /// # Errors
    ///
    /// Same as [`login`](Self::login).
    #[tracing::instrument(skip_all)]
    pub async fn login_google(&self, credential: GoogleCredential) -> Result<UserClaims> {
        let outcome = self.inner.api.login_google(&credential).await;
        self.complete_sign_in(outcome)
    }

    /// Create an account. Does not sign in.
    ///
    /// # Errors
    ///
    /// Returns the endpoint's error, also recorded in
    /// [`last_error`](Self::last_error).
    #[tracing::instrument(skip_all, fields(username = %request.username))]
    pub async fn register(&self, request: RegistrationRequest) -> Result<()> {
        match self.inner.api.register(&request).await {
            Ok(()) => {
                self.write().error = None;
                tracing::info!("Account registered");
                Ok(())
            },
            Err(error) => Err(self.record_failure(error)),
        }
    }

    fn complete_sign_in(&self, outcome: Result<TokenPair>) -> Result<UserClaims> {
        let pair = outcome.map_err(|error| self.record_failure(error))?;
        let user = decode_claims(&pair.jwt)
            .ok_or_else(|| self.record_failure(AuthError::MalformedToken))?;

        self.establish(pair, user.clone());
        tracing::info!(user_id = %user.id, "Signed in");
        Ok(user)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Verification
    // ═══════════════════════════════════════════════════════════════════

    /// Whether the session holds a usable access token, refreshing it if it
    /// has expired.
    ///
    /// Concurrent callers share one verification: at most one refresh
    /// request is in flight, and every caller gets its result. The slot is
    /// cleared once the verification settles, so a later call starts afresh.
    /// If every caller gives up before it settles, the attempt is dropped
    /// with them.
    pub async fn verify_token(&self) -> bool {
        let verification = {
            let mut slot = self.lock_in_flight();
            let running = slot
                .as_ref()
                .and_then(|running| running.verification.upgrade());
            if let Some(running) = running {
                tracing::trace!("Joining in-flight verification");
                running
            } else {
                let (verification, in_flight) = self.start_verification();
                *slot = in_flight;
                verification
            }
        };

        verification.await
    }

    fn start_verification(&self) -> (Verification, Option<InFlight>) {
        let id = self.inner.next_verification.fetch_add(1, Ordering::Relaxed);
        let manager = self.clone();
        let guard = InFlightGuard {
            inner: Arc::clone(&self.inner),
            id,
        };

        let verification = async move {
            let _guard = guard;
            manager.check_or_refresh().await
        }
        .boxed()
        .shared();

        let in_flight = verification
            .downgrade()
            .map(|verification| InFlight { id, verification });
        (verification, in_flight)
    }

    async fn check_or_refresh(&self) -> bool {
        let token = self.read().token.clone();
        let Some(token) = token else {
            return false;
        };

        if !is_token_expired(&token, self.inner.clock.now()) {
            return true;
        }

        tracing::debug!("Access token expired");
        self.refresh_access_token().await
    }

    /// Exchange the refresh token for a new token pair.
    ///
    /// Any failure (no refresh token, endpoint error, undecodable new token)
    /// signs the user out and returns `false`. If the user signs out or in
    /// again while the request is pending, its answer is discarded and the
    /// newer session is left alone.
    #[tracing::instrument(skip_all)]
    pub async fn refresh_access_token(&self) -> bool {
        let (refresh_token, generation) = {
            let session = self.read();
            (session.refresh_token.clone(), self.generation())
        };
        let Some(refresh_token) = refresh_token else {
            tracing::debug!("No refresh token, signing out");
            self.logout_if_current(generation);
            return false;
        };

        let pair = match self.inner.api.refresh(&refresh_token).await {
            Ok(pair) => pair,
            Err(error) => {
                tracing::warn!(%error, "Token refresh failed, signing out");
                self.logout_if_current(generation);
                return false;
            },
        };

        let Some(user) = decode_claims(&pair.jwt) else {
            tracing::warn!("Refresh returned a malformed token, signing out");
            self.logout_if_current(generation);
            return false;
        };

        if !self.renew(pair, user, generation) {
            tracing::debug!("Session changed during refresh, discarding new tokens");
            return false;
        }
        tracing::debug!("Access token refreshed");
        true
    }

    /// A verified access token for an outgoing request.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotAuthenticated`] without a session, or
    /// [`AuthError::SessionExpired`] if it could not be refreshed.
    pub async fn bearer_token(&self) -> Result<String> {
        if self.read().token.is_none() {
            return Err(AuthError::NotAuthenticated);
        }
        if !self.verify_token().await {
            return Err(AuthError::SessionExpired);
        }
        self.read().token.clone().ok_or(AuthError::SessionExpired)
    }

    /// Attach a verified bearer token to `request`.
    ///
    /// # Errors
    ///
    /// Same as [`bearer_token`](Self::bearer_token).
    pub async fn authorize(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder> {
        let token = self.bearer_token().await?;
        Ok(request.bearer_auth(token))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Session changes
    // ═══════════════════════════════════════════════════════════════════

    /// Sign out: reset every session field and clear storage.
    ///
    /// Idempotent. A refresh or profile update still pending when this runs
    /// cannot sign the user back in.
    pub fn logout(&self) {
        self.reset(&mut self.write());
        tracing::debug!("Signed out");
    }

    fn logout_if_current(&self, generation: u64) {
        let mut session = self.write();
        if self.generation() == generation {
            self.reset(&mut session);
            tracing::debug!("Signed out");
        }
    }

    fn reset(&self, session: &mut Session) {
        *session = Session::default();
        self.inner.generation.fetch_add(1, Ordering::Relaxed);
        if let Err(error) = self.inner.storage.clear() {
            tracing::warn!(%error, "Failed to clear persisted session");
        }
    }

    /// Update the signed-in user's profile.
    ///
    /// The stored user is replaced by the server's answer as a whole.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotAuthenticated`] without a session (or if the
    /// user signed out while the request was pending), or the endpoint's
    /// error (recorded in [`last_error`](Self::last_error); tokens are left
    /// untouched).
    #[tracing::instrument(skip_all)]
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<UserClaims> {
        let (token, generation) = {
            let session = self.read();
            (session.token.clone(), self.generation())
        };
        let Some(token) = token else {
            return Err(AuthError::NotAuthenticated);
        };

        match self.inner.api.update_profile(&token, &update).await {
            Ok(user) => {
                {
                    let mut session = self.write();
                    if self.generation() != generation {
                        return Err(AuthError::NotAuthenticated);
                    }
                    session.user = Some(user.clone());
                    session.error = None;
                    self.persist(&session.to_persisted());
                }
                tracing::info!(user_id = %user.id, "Profile updated");
                Ok(user)
            },
            Err(error) => Err(self.record_failure(error)),
        }
    }

    /// Replace the session with a new sign-in.
    fn establish(&self, pair: TokenPair, user: UserClaims) {
        let mut session = self.write();
        *session = Session::authenticated(pair, user);
        self.inner.generation.fetch_add(1, Ordering::Relaxed);
        self.persist(&session.to_persisted());
    }

    /// Store refreshed tokens, unless the session changed since `generation`.
    fn renew(&self, pair: TokenPair, user: UserClaims, generation: u64) -> bool {
        let mut session = self.write();
        if self.generation() != generation {
            return false;
        }
        *session = Session::authenticated(pair, user);
        self.persist(&session.to_persisted());
        true
    }

    fn generation(&self) -> u64 {
        self.inner.generation.load(Ordering::Relaxed)
    }

    fn persist(&self, persisted: &PersistedSession) {
        if let Err(error) = self.inner.storage.save(persisted) {
            tracing::warn!(%error, "Failed to persist session");
        }
    }

    fn record_failure(&self, error: AuthError) -> AuthError {
        tracing::warn!(%error, "Session request failed");
        self.write().error = Some(error.to_string());
        error
    }

    // ═══════════════════════════════════════════════════════════════════
    // Reads
    // ═══════════════════════════════════════════════════════════════════

    /// Copy of the current session.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.read().clone()
    }

    /// Whether a user is signed in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated
    }

    /// The signed-in user.
    #[must_use]
    pub fn user(&self) -> Option<UserClaims> {
        self.read().user.clone()
    }

    /// Message of the last failed sign-in, registration or profile update.
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.read().error.clone()
    }

    /// Whether a verification is currently running.
    ///
    /// Turns `false` once the attempt settles or every caller awaiting it
    /// has been dropped.
    #[must_use]
    pub fn is_verifying(&self) -> bool {
        self.lock_in_flight().is_some()
    }

    fn read(&self) -> RwLockReadGuard<'_, Session> {
        self.inner
            .session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Session> {
        self.inner
            .session
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_in_flight(&self) -> MutexGuard<'_, Option<InFlight>> {
        self.inner
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Session restored from storage.
///
/// A stored token without a stored user is decoded; a stored flag without a
/// token does not count as signed in.
fn hydrate<S: SessionStorage>(storage: &S) -> Session {
    match storage.load() {
        Ok(Some(persisted)) => {
            let user = persisted
                .user
                .or_else(|| persisted.token.as_deref().and_then(decode_claims));
            let is_authenticated = persisted.is_authenticated && persisted.token.is_some();
            tracing::debug!(is_authenticated, "Restored persisted session");
            Session {
                token: persisted.token,
                refresh_token: persisted.refresh_token,
                user,
                is_authenticated,
                error: None,
            }
        },
        Ok(None) => Session::default(),
        Err(error) => {
            tracing::warn!(%error, "Ignoring unreadable persisted session");
            Session::default()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;
    use crate::mocks::{MockAuthApi, issue_token, user_claims};
    use crate::providers::MemoryStorage;
    use chrono::Duration;
    use cinelog_testing::{FixedClock, test_clock, test_epoch};

    fn pair(id: &str, ttl: Duration, refresh: &str) -> TokenPair {
        TokenPair {
            jwt: issue_token(&user_claims(id, test_epoch(), ttl)),
            refresh: refresh.to_string(),
        }
    }

    fn manager(
        api: MockAuthApi,
        storage: MemoryStorage,
    ) -> SessionManager<MockAuthApi, MemoryStorage, FixedClock> {
        SessionManager::with_clock(api, storage, test_clock())
    }

    #[tokio::test]
    async fn login_establishes_and_persists_session() {
        let api =
            MockAuthApi::new().with_account("a@b.c", "pw", pair("7", Duration::hours(1), "r1"));
        let storage = MemoryStorage::new();
        let manager = manager(api, storage.clone());

        let user = manager.login(Credentials::new("a@b.c", "pw")).await.unwrap();

        assert_eq!(user.id, "7");
        assert!(manager.is_authenticated());
        assert_eq!(manager.user(), Some(user.clone()));

        let stored = storage.stored().unwrap();
        assert!(stored.is_authenticated);
        assert_eq!(stored.refresh_token.as_deref(), Some("r1"));
        assert_eq!(stored.user, Some(user));
    }

    #[tokio::test]
    async fn failed_login_records_error_without_touching_session() {
        let api =
            MockAuthApi::new().with_account("a@b.c", "pw", pair("7", Duration::hours(1), "r1"));
        let manager = manager(api, MemoryStorage::new());

        let result = manager.login(Credentials::new("a@b.c", "wrong")).await;

        assert!(matches!(result, Err(AuthError::Rejected { status: 401, .. })));
        assert!(!manager.is_authenticated());
        assert_eq!(manager.snapshot().token, None);
        assert_eq!(manager.last_error().as_deref(), Some("Invalid email or password"));
    }

    #[tokio::test]
    async fn malformed_issued_token_is_an_error() {
        let api = MockAuthApi::new().with_account(
            "a@b.c",
            "pw",
            TokenPair {
                jwt: "not-a-jwt".into(),
                refresh: "r1".into(),
            },
        );
        let manager = manager(api, MemoryStorage::new());

        let result = manager.login(Credentials::new("a@b.c", "pw")).await;

        assert_eq!(result, Err(AuthError::MalformedToken));
        assert!(!manager.is_authenticated());
        assert!(manager.last_error().is_some());
    }

    #[tokio::test]
    async fn successful_login_clears_previous_error() {
        let api =
            MockAuthApi::new().with_account("a@b.c", "pw", pair("7", Duration::hours(1), "r1"));
        let manager = manager(api, MemoryStorage::new());

        let _ = manager.login(Credentials::new("a@b.c", "nope")).await;
        assert!(manager.last_error().is_some());

        manager.login(Credentials::new("a@b.c", "pw")).await.unwrap();
        assert_eq!(manager.last_error(), None);
    }

    #[tokio::test]
    async fn google_login_uses_credential() {
        let api =
            MockAuthApi::new().with_google("google-id-token", pair("9", Duration::hours(1), "r9"));
        let manager = manager(api.clone(), MemoryStorage::new());

        let user = manager
            .login_google(GoogleCredential {
                credential: "google-id-token".into(),
            })
            .await
            .unwrap();

        assert_eq!(user.id, "9");
        assert_eq!(api.login_calls(), 1);
    }

    #[tokio::test]
    async fn register_does_not_sign_in() {
        let api =
            MockAuthApi::new().with_account("taken@b.c", "pw", pair("1", Duration::hours(1), "r"));
        let manager = manager(api.clone(), MemoryStorage::new());

        let request = RegistrationRequest {
            username: "dallas".into(),
            email: "dallas@nostromo.io".into(),
            password: "pw".into(),
        };
        manager.register(request.clone()).await.unwrap();

        assert!(!manager.is_authenticated());
        assert_eq!(api.registrations(), vec![request]);

        let duplicate = RegistrationRequest {
            username: "other".into(),
            email: "taken@b.c".into(),
            password: "pw".into(),
        };
        let result = manager.register(duplicate).await;
        assert!(matches!(result, Err(AuthError::Rejected { status: 409, .. })));
        assert_eq!(manager.last_error().as_deref(), Some("Email already registered"));
    }

    #[tokio::test]
    async fn valid_token_verifies_without_refresh() {
        let api =
            MockAuthApi::new().with_account("a@b.c", "pw", pair("7", Duration::hours(1), "r1"));
        let manager = manager(api.clone(), MemoryStorage::new());
        manager.login(Credentials::new("a@b.c", "pw")).await.unwrap();

        assert!(manager.verify_token().await);
        assert_eq!(api.refresh_calls(), 0);
        assert!(!manager.is_verifying());
    }

    #[tokio::test]
    async fn no_token_fails_verification() {
        let api = MockAuthApi::new();
        let manager = manager(api.clone(), MemoryStorage::new());

        assert!(!manager.verify_token().await);
        assert_eq!(api.refresh_calls(), 0);
        assert_eq!(
            manager.bearer_token().await,
            Err(AuthError::NotAuthenticated)
        );
    }

    #[tokio::test]
    async fn refresh_with_malformed_token_signs_out() {
        let api = MockAuthApi::new()
            .with_account("a@b.c", "pw", pair("7", Duration::hours(1), "r1"))
            .with_refresh(
                "r1",
                TokenPair {
                    jwt: "garbage".into(),
                    refresh: "r2".into(),
                },
            );
        let storage = MemoryStorage::new();
        let manager = manager(api, storage.clone());
        manager.login(Credentials::new("a@b.c", "pw")).await.unwrap();

        assert!(!manager.refresh_access_token().await);
        assert_eq!(manager.snapshot(), Session::default());
        assert_eq!(storage.stored(), None);
    }

    #[tokio::test]
    async fn profile_update_replaces_user() {
        let api =
            MockAuthApi::new().with_account("a@b.c", "pw", pair("7", Duration::hours(1), "r1"));
        let storage = MemoryStorage::new();
        let manager = manager(api, storage.clone());
        let before = manager.login(Credentials::new("a@b.c", "pw")).await.unwrap();

        let user = manager
            .update_profile(ProfileUpdate {
                username: Some("ellen".into()),
                ..ProfileUpdate::default()
            })
            .await
            .unwrap();

        assert_eq!(user.username, "ellen");
        assert_eq!(user.id, before.id);
        assert_eq!(manager.user(), Some(user.clone()));
        assert_eq!(storage.stored().and_then(|s| s.user), Some(user));
    }

    #[tokio::test]
    async fn failed_profile_update_keeps_tokens() {
        let api = MockAuthApi::new()
            .with_account("a@b.c", "pw", pair("7", Duration::hours(1), "r1"))
            .with_profile_failure(AuthError::Rejected {
                status: 400,
                message: "Username taken".into(),
            });
        let manager = manager(api, MemoryStorage::new());
        manager.login(Credentials::new("a@b.c", "pw")).await.unwrap();
        let before = manager.snapshot();

        let result = manager.update_profile(ProfileUpdate::default()).await;

        assert!(result.is_err());
        assert_eq!(manager.last_error().as_deref(), Some("Username taken"));
        assert_eq!(manager.snapshot().token, before.token);
        assert_eq!(manager.user(), before.user);
        assert!(manager.is_authenticated());
    }

    #[tokio::test]
    async fn profile_update_requires_session() {
        let manager = manager(MockAuthApi::new(), MemoryStorage::new());
        let result = manager.update_profile(ProfileUpdate::default()).await;
        assert_eq!(result, Err(AuthError::NotAuthenticated));
    }

    #[tokio::test]
    async fn logout_is_idempotent() {
        let api =
            MockAuthApi::new().with_account("a@b.c", "pw", pair("7", Duration::hours(1), "r1"));
        let storage = MemoryStorage::new();
        let manager = manager(api, storage.clone());
        manager.login(Credentials::new("a@b.c", "pw")).await.unwrap();

        manager.logout();
        manager.logout();

        assert_eq!(manager.snapshot(), Session::default());
        assert_eq!(storage.stored(), None);
    }

    #[test]
    fn hydrates_from_storage() {
        let token = issue_token(&user_claims("3", test_epoch(), Duration::hours(1)));
        let storage = MemoryStorage::with_session(PersistedSession {
            user: None,
            token: Some(token),
            refresh_token: Some("r3".into()),
            is_authenticated: true,
        });

        let manager = manager(MockAuthApi::new(), storage);

        assert!(manager.is_authenticated());
        assert_eq!(manager.user().map(|u| u.id), Some("3".to_string()));
    }

    #[test]
    fn flag_without_token_is_not_signed_in() {
        let storage = MemoryStorage::with_session(PersistedSession {
            is_authenticated: true,
            ..PersistedSession::default()
        });

        let manager = manager(MockAuthApi::new(), storage);
        assert!(!manager.is_authenticated());
    }

    #[test]
    fn clones_share_session() {
        let manager = manager(MockAuthApi::new(), MemoryStorage::new());
        let other = manager.clone();

        other.write().error = Some("boom".into());
        assert_eq!(manager.last_error().as_deref(), Some("boom"));
        assert!(!format!("{manager:?}").is_empty());
    }
}
