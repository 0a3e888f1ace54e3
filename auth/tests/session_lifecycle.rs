//! Session lifecycle tests.
//!
//! Sign-in, restart, expiry and refresh against mock endpoints, with a
//! manual clock deciding when tokens expire.

#![allow(clippy::unwrap_used)] // Test code

use chrono::Duration;
use cinelog_auth::mocks::{MockAuthApi, issue_raw_token, issue_token, user_claims};
use cinelog_auth::{
    AuthError, Credentials, FileStorage, MemoryStorage, Session, SessionManager, TokenPair,
    decode_claims, is_token_expired,
};
use cinelog_core::environment::Clock;
use cinelog_testing::{ManualClock, test_epoch};
use futures::future::join_all;
use std::time::Duration as StdDuration;

const EMAIL: &str = "ripley@nostromo.io";
const PASSWORD: &str = "hunter2";

fn tokens(id: &str, issued_at: chrono::DateTime<chrono::Utc>, refresh: &str) -> TokenPair {
    TokenPair {
        jwt: issue_token(&user_claims(id, issued_at, Duration::minutes(15))),
        refresh: refresh.to_string(),
    }
}

async fn signed_in(
    api: MockAuthApi,
    storage: MemoryStorage,
    clock: ManualClock,
) -> SessionManager<MockAuthApi, MemoryStorage, ManualClock> {
    cinelog_testing::init_test_tracing();
    let manager = SessionManager::with_clock(api, storage, clock);
    manager
        .login(Credentials::new(EMAIL, PASSWORD))
        .await
        .unwrap();
    manager
}

// ═══════════════════════════════════════════════════════════════════════
// Single-flight verification
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn concurrent_verifications_share_one_refresh() {
    let clock = ManualClock::new(test_epoch());
    let renewed = test_epoch() + Duration::hours(1);
    let api = MockAuthApi::new()
        .with_account(EMAIL, PASSWORD, tokens("7", test_epoch(), "r1"))
        .with_refresh("r1", tokens("7", renewed, "r2"))
        .with_refresh_latency(StdDuration::from_millis(50));
    let manager = signed_in(api.clone(), MemoryStorage::new(), clock.clone()).await;

    clock.advance(Duration::minutes(30));

    let outcomes = join_all((0..8).map(|_| {
        let manager = manager.clone();
        tokio::spawn(async move { manager.verify_token().await })
    }))
    .await;

    let outcomes: Vec<bool> = outcomes.into_iter().map(Result::unwrap).collect();
    assert_eq!(outcomes, vec![true; 8]);
    assert_eq!(api.refresh_calls(), 1);
    assert_eq!(manager.snapshot().refresh_token.as_deref(), Some("r2"));
    assert!(!manager.is_verifying());
}

#[tokio::test]
async fn concurrent_callers_all_see_failed_refresh() {
    let clock = ManualClock::new(test_epoch());
    let api = MockAuthApi::new()
        .with_account(EMAIL, PASSWORD, tokens("7", test_epoch(), "r1"))
        .with_refresh_latency(StdDuration::from_millis(30));
    let manager = signed_in(api.clone(), MemoryStorage::new(), clock.clone()).await;

    clock.advance(Duration::hours(1));

    let (a, b, c) = tokio::join!(
        manager.verify_token(),
        manager.verify_token(),
        manager.verify_token()
    );

    assert_eq!((a, b, c), (false, false, false));
    assert_eq!(api.refresh_calls(), 1);
}

#[tokio::test]
async fn settled_verification_allows_a_new_attempt() {
    let clock = ManualClock::new(test_epoch());
    let first = test_epoch() + Duration::minutes(30);
    let second = test_epoch() + Duration::minutes(60);
    let api = MockAuthApi::new()
        .with_account(EMAIL, PASSWORD, tokens("7", test_epoch(), "r1"))
        .with_refresh("r1", tokens("7", first, "r2"))
        .with_refresh("r2", tokens("7", second, "r3"));
    let manager = signed_in(api.clone(), MemoryStorage::new(), clock.clone()).await;

    clock.advance(Duration::minutes(20));
    assert!(manager.verify_token().await);
    assert!(manager.verify_token().await);
    assert_eq!(api.refresh_calls(), 1);

    clock.advance(Duration::minutes(30));
    assert!(manager.verify_token().await);
    assert_eq!(api.refresh_calls(), 2);
    assert_eq!(manager.snapshot().refresh_token.as_deref(), Some("r3"));
}

#[tokio::test]
async fn abandoned_verification_frees_the_slot() {
    let clock = ManualClock::new(test_epoch());
    let api = MockAuthApi::new()
        .with_account(EMAIL, PASSWORD, tokens("7", test_epoch(), "r1"))
        .with_refresh("r1", tokens("7", test_epoch() + Duration::hours(1), "r2"))
        .with_refresh_latency(StdDuration::from_millis(100));
    let manager = signed_in(api.clone(), MemoryStorage::new(), clock.clone()).await;

    clock.advance(Duration::minutes(30));

    let abandoned =
        tokio::time::timeout(StdDuration::from_millis(10), manager.verify_token()).await;
    assert!(abandoned.is_err());
    assert!(!manager.is_verifying());

    // A fresh attempt goes back to the endpoint; "r1" was spent by the first.
    assert!(!manager.verify_token().await);
    assert_eq!(api.refresh_calls(), 2);
    assert!(!manager.is_verifying());
}

// ═══════════════════════════════════════════════════════════════════════
// Session changes during refresh
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn logout_during_refresh_stays_signed_out() {
    let clock = ManualClock::new(test_epoch());
    let storage = MemoryStorage::new();
    let api = MockAuthApi::new()
        .with_account(EMAIL, PASSWORD, tokens("7", test_epoch(), "r1"))
        .with_refresh("r1", tokens("7", test_epoch() + Duration::hours(1), "r2"))
        .with_refresh_latency(StdDuration::from_millis(100));
    let manager = signed_in(api.clone(), storage.clone(), clock.clone()).await;

    clock.advance(Duration::minutes(30));

    let verifying = tokio::spawn({
        let manager = manager.clone();
        async move { manager.verify_token().await }
    });
    tokio::time::sleep(StdDuration::from_millis(20)).await;
    manager.logout();

    assert!(!verifying.await.unwrap());
    assert_eq!(api.refresh_calls(), 1);
    assert!(!manager.is_authenticated());
    assert_eq!(manager.snapshot(), Session::default());
    assert_eq!(storage.stored(), None);
}

#[tokio::test]
async fn sign_in_during_refresh_keeps_the_new_session() {
    let clock = ManualClock::new(test_epoch());
    let storage = MemoryStorage::new();
    let later = test_epoch() + Duration::minutes(30);
    let api = MockAuthApi::new()
        .with_account(EMAIL, PASSWORD, tokens("7", test_epoch(), "r1"))
        .with_account("dallas@nostromo.io", PASSWORD, tokens("8", later, "r8"))
        .with_refresh("r1", tokens("7", later, "r2"))
        .with_refresh_latency(StdDuration::from_millis(100));
    let manager = signed_in(api.clone(), storage.clone(), clock.clone()).await;

    clock.advance(Duration::minutes(30));

    let verifying = tokio::spawn({
        let manager = manager.clone();
        async move { manager.verify_token().await }
    });
    tokio::time::sleep(StdDuration::from_millis(20)).await;
    manager.logout();
    let dallas = manager
        .login(Credentials::new("dallas@nostromo.io", PASSWORD))
        .await
        .unwrap();

    assert!(!verifying.await.unwrap());
    assert!(manager.is_authenticated());
    assert_eq!(manager.user(), Some(dallas));
    assert_eq!(manager.snapshot().refresh_token.as_deref(), Some("r8"));
    assert_eq!(storage.stored().and_then(|s| s.refresh_token).as_deref(), Some("r8"));
}

// ═══════════════════════════════════════════════════════════════════════
// Expiry
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn expired_token_with_failed_refresh_resets_session() {
    let clock = ManualClock::new(test_epoch());
    let storage = MemoryStorage::new();
    let api = MockAuthApi::new().with_account(EMAIL, PASSWORD, tokens("7", test_epoch(), "r1"));
    let manager = signed_in(api.clone(), storage.clone(), clock.clone()).await;
    assert!(storage.stored().is_some());

    clock.advance(Duration::minutes(15));

    assert!(!manager.verify_token().await);
    assert_eq!(api.refresh_calls(), 1);

    let session = manager.snapshot();
    assert!(!session.is_authenticated);
    assert_eq!(session.token, None);
    assert_eq!(session.user, None);
    assert_eq!(session, Session::default());
    assert_eq!(storage.stored(), None);
}

#[tokio::test]
async fn expired_token_is_refreshed_transparently() {
    let clock = ManualClock::new(test_epoch());
    let renewed = test_epoch() + Duration::hours(2);
    let api = MockAuthApi::new()
        .with_account(EMAIL, PASSWORD, tokens("7", test_epoch(), "r1"))
        .with_refresh("r1", tokens("7", renewed, "r2"));
    let storage = MemoryStorage::new();
    let manager = signed_in(api, storage.clone(), clock.clone()).await;

    clock.advance(Duration::hours(2));
    let token = manager.bearer_token().await.unwrap();

    assert!(!is_token_expired(&token, clock.now()));
    assert_eq!(
        decode_claims(&token).map(|user| user.exp),
        Some((renewed + Duration::minutes(15)).timestamp())
    );
    assert_eq!(storage.stored().and_then(|s| s.token), Some(token));
}

#[tokio::test]
async fn unrefreshable_session_reports_expiry() {
    let clock = ManualClock::new(test_epoch());
    let api = MockAuthApi::new().with_account(EMAIL, PASSWORD, tokens("7", test_epoch(), "r1"));
    let manager = signed_in(api, MemoryStorage::new(), clock.clone()).await;

    clock.advance(Duration::days(1));

    let request = reqwest::Client::new().get("http://localhost/api/diary");
    let result = manager.authorize(request).await;

    assert!(matches!(result, Err(AuthError::SessionExpired)));
    assert!(!manager.is_authenticated());
}

#[tokio::test]
async fn token_without_expiry_is_refreshed() {
    let clock = ManualClock::new(test_epoch());
    let undated = issue_raw_token(&serde_json::json!({ "sub": "7" }));
    let api = MockAuthApi::new()
        .with_account(EMAIL, PASSWORD, tokens("7", test_epoch(), "r1"))
        .with_refresh(
            "r1",
            TokenPair {
                jwt: undated,
                refresh: "r2".into(),
            },
        )
        .with_refresh("r2", tokens("7", test_epoch() + Duration::hours(1), "r3"));
    let manager = signed_in(api.clone(), MemoryStorage::new(), clock.clone()).await;

    clock.advance(Duration::minutes(20));
    assert!(manager.verify_token().await);
    assert_eq!(manager.user().map(|user| user.exp), Some(0));

    assert!(manager.verify_token().await);
    assert_eq!(api.refresh_calls(), 2);
}

// ═══════════════════════════════════════════════════════════════════════
// Persistence
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let clock = ManualClock::new(test_epoch());
    let api = MockAuthApi::new().with_account(EMAIL, PASSWORD, tokens("7", test_epoch(), "r1"));

    let first = SessionManager::with_clock(
        api.clone(),
        FileStorage::new(dir.path(), "user-data"),
        clock.clone(),
    );
    let user = first
        .login(Credentials::new(EMAIL, PASSWORD))
        .await
        .unwrap();
    drop(first);

    let restarted = SessionManager::with_clock(
        api.clone(),
        FileStorage::new(dir.path(), "user-data"),
        clock,
    );

    assert!(restarted.is_authenticated());
    assert_eq!(restarted.user(), Some(user));
    assert!(restarted.verify_token().await);
    assert_eq!(api.refresh_calls(), 0);
}

#[tokio::test]
async fn logout_clears_persisted_slot() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path(), "user-data");
    let api = MockAuthApi::new().with_account(EMAIL, PASSWORD, tokens("7", test_epoch(), "r1"));
    let manager = SessionManager::with_clock(api, storage.clone(), ManualClock::new(test_epoch()));

    manager
        .login(Credentials::new(EMAIL, PASSWORD))
        .await
        .unwrap();
    assert!(storage.path().exists());

    manager.logout();
    assert!(!storage.path().exists());
    assert!(!manager.verify_token().await);
}

#[test]
fn corrupt_slot_starts_signed_out() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path(), "user-data");
    std::fs::write(storage.path(), "{ broken").unwrap();

    let manager = SessionManager::new(MockAuthApi::new(), storage);

    assert!(!manager.is_authenticated());
    assert!(!tokio_test::block_on(manager.verify_token()));
}
