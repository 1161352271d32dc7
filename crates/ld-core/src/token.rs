//! Session token codec.
//!
//! The bearer token is the standard base64 encoding of `"{admin_id}:{millis}"`.
//! It is deliberately unsigned, matching the system this replaces; the token
//! carries no expiry of its own and relies on the cookie's Max-Age. A session
//! decoded here is only trusted once the id resolves to a stored admin
//! account (see `ld-services`).

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed session token")]
    Malformed,
}

/// The decoded, not-yet-verified contents of a bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionToken {
    pub admin_id: i64,
    pub issued_at_millis: i64,
}

/// Encode an admin id and issue instant into an opaque bearer string.
pub fn encode(admin_id: i64, issued_at: DateTime<Utc>) -> String {
    BASE64.encode(format!("{}:{}", admin_id, issued_at.timestamp_millis()))
}

/// Decode a bearer string. Fails with [`TokenError::Malformed`] unless the
/// payload splits on `:` into exactly two components, the first a positive
/// integer id and the second an integer millisecond timestamp.
pub fn decode(token: &str) -> Result<SessionToken, TokenError> {
    let raw = BASE64.decode(token).map_err(|_| TokenError::Malformed)?;
    let raw = String::from_utf8(raw).map_err(|_| TokenError::Malformed)?;

    let mut parts = raw.split(':');
    let (id, millis) = match (parts.next(), parts.next(), parts.next()) {
        (Some(id), Some(millis), None) => (id, millis),
        _ => return Err(TokenError::Malformed),
    };

    let admin_id: i64 = id.parse().map_err(|_| TokenError::Malformed)?;
    if admin_id <= 0 {
        return Err(TokenError::Malformed);
    }
    let issued_at_millis: i64 = millis.parse().map_err(|_| TokenError::Malformed)?;

    Ok(SessionToken {
        admin_id,
        issued_at_millis,
    })
}
