//! JWT claims extraction.
//!
//! Reads the payload segment of a JWT and maps the issuer's claim URIs onto
//! [`UserClaims`]. The signature is **not** checked: the server is the trust
//! boundary and these claims are only used for display and expiry checks.

use crate::state::UserClaims;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Claim carrying the user id.
pub const CLAIM_ID: &str = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/nameidentifier";

/// Claim carrying the display name.
pub const CLAIM_NAME: &str = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/name";

/// Claim carrying the email address.
pub const CLAIM_EMAIL: &str = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/emailaddress";

/// Claim carrying the role.
pub const CLAIM_ROLE: &str = "http://schemas.microsoft.com/ws/2008/06/identity/claims/role";

/// Moderation flag, `"True"` when muted.
pub const CLAIM_IS_MUTED: &str = "IsMuted";

/// Email confirmation flag, `"True"` when confirmed.
pub const CLAIM_EMAIL_CONFIRMED: &str = "EmailConfirmed";

/// Standard expiry claim (seconds since epoch).
pub const CLAIM_EXP: &str = "exp";

/// Decode the claims of `token`.
///
/// Returns `None` if the token does not have three segments or its payload is
/// not base64url-encoded JSON object. Missing string claims decode as empty
/// strings and a missing `exp` as `0`, which makes the token expired.
///
/// # Examples
///
/// ```
/// use cinelog_auth::claims::decode_claims;
///
/// assert!(decode_claims("not-a-jwt").is_none());
/// ```
#[must_use]
pub fn decode_claims(token: &str) -> Option<UserClaims> {
    let payload = payload(token)?;

    Some(UserClaims {
        id: string_claim(&payload, CLAIM_ID),
        username: string_claim(&payload, CLAIM_NAME),
        email: string_claim(&payload, CLAIM_EMAIL),
        role: string_claim(&payload, CLAIM_ROLE),
        is_muted: flag_claim(&payload, CLAIM_IS_MUTED),
        exp: exp_claim(&payload).unwrap_or(0),
        email_confirmed: flag_claim(&payload, CLAIM_EMAIL_CONFIRMED),
    })
}

/// Whether `token` is expired at `now`.
///
/// Expired means `exp <= now`. A token that cannot be decoded is expired.
#[must_use]
pub fn is_token_expired(token: &str, now: DateTime<Utc>) -> bool {
    decode_claims(token).is_none_or(|claims| claims.exp <= now.timestamp())
}

/// Expiry instant of `token`, if it decodes and carries a valid `exp`.
#[must_use]
pub fn expires_at(token: &str) -> Option<DateTime<Utc>> {
    let exp = exp_claim(&payload(token)?)?;
    DateTime::from_timestamp(exp, 0)
}

fn payload(token: &str) -> Option<Map<String, Value>> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) =
        (segments.next(), segments.next(), segments.next(), segments.next())
    else {
        return None;
    };

    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    match serde_json::from_slice(&bytes).ok()? {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

fn string_claim(payload: &Map<String, Value>, claim: &str) -> String {
    match payload.get(claim) {
        Some(Value::String(value)) => value.clone(),
        // Multi-role tokens carry an array; the first role is the primary one.
        Some(Value::Array(values)) => values
            .first()
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        Some(Value::Number(value)) => value.to_string(),
        _ => String::new(),
    }
}

fn flag_claim(payload: &Map<String, Value>, claim: &str) -> bool {
    payload.get(claim).and_then(Value::as_str) == Some("True")
}

#[allow(clippy::cast_possible_truncation)] // exp as float is whole seconds
fn exp_claim(payload: &Map<String, Value>) -> Option<i64> {
    match payload.get(CLAIM_EXP)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}
