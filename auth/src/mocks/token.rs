//! Unsigned test tokens.

use crate::claims::{
    CLAIM_EMAIL, CLAIM_EMAIL_CONFIRMED, CLAIM_EXP, CLAIM_ID, CLAIM_IS_MUTED, CLAIM_NAME,
    CLAIM_ROLE,
};
use crate::state::UserClaims;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};

/// Build a JWT carrying `claims` under the issuer's claim URIs.
///
/// The signature segment is a fixed placeholder.
#[must_use]
pub fn issue_token(claims: &UserClaims) -> String {
    let flag = |value: bool| if value { "True" } else { "False" };

    issue_raw_token(&serde_json::json!({
        CLAIM_ID: claims.id,
        CLAIM_NAME: claims.username,
        CLAIM_EMAIL: claims.email,
        CLAIM_ROLE: claims.role,
        CLAIM_IS_MUTED: flag(claims.is_muted),
        CLAIM_EMAIL_CONFIRMED: flag(claims.email_confirmed),
        CLAIM_EXP: claims.exp,
    }))
}

/// Build a JWT with an arbitrary JSON payload.
#[must_use]
pub fn issue_raw_token(payload: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(payload.to_string());
    let signature = URL_SAFE_NO_PAD.encode(b"unsigned-test-signature");
    format!("{header}.{payload}.{signature}")
}

/// Claims for a regular user whose token expires `ttl` after `now`.
#[must_use]
pub fn user_claims(id: &str, now: DateTime<Utc>, ttl: Duration) -> UserClaims {
    UserClaims {
        id: id.to_string(),
        username: format!("user-{id}"),
        email: format!("user-{id}@cinelog.test"),
        role: "User".to_string(),
        is_muted: false,
        exp: (now + ttl).timestamp(),
        email_confirmed: true,
    }
}
