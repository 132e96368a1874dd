//! Signed access token encoding and verification.
//!
//! # Responsibility
//! - Encode/verify the fixed bearer-token format the edge hands around.
//!
//! # Invariants
//! - Token layout is `hex(payload) "." hex(sha256(secret || payload))`
//!   where payload is `<user_id>:<expires_epoch_s>`.
//! - Verification rejects malformed input, bad signatures and expired
//!   payloads, in that order.

use crate::model::user::UserId;
use sha2::{Digest, Sha256};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Token verification errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Structure or encoding is not a valid token.
    Malformed,
    /// Signature does not match the payload.
    BadSignature,
    /// Payload is valid but past its expiry time.
    Expired,
}

impl Display for TokenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed => write!(f, "token is malformed"),
            Self::BadSignature => write!(f, "token signature mismatch"),
            Self::Expired => write!(f, "token is expired"),
        }
    }
}

impl Error for TokenError {}

/// Issues a signed token for the user, valid for `ttl_secs` from `now`.
pub fn issue(secret: &[u8], user_id: UserId, ttl_secs: u64, now_epoch_s: u64) -> String {
    let payload = format!("{user_id}:{}", now_epoch_s.saturating_add(ttl_secs));
    let signature = sign(secret, payload.as_bytes());
    format!("{}.{signature}", hex::encode(payload.as_bytes()))
}

/// Verifies a token and returns the embedded user id.
pub fn verify(secret: &[u8], token: &str, now_epoch_s: u64) -> Result<UserId, TokenError> {
    let (payload_hex, signature) = token.split_once('.').ok_or(TokenError::Malformed)?;
    let payload_bytes = hex::decode(payload_hex).map_err(|_| TokenError::Malformed)?;

    if sign(secret, &payload_bytes) != signature {
        return Err(TokenError::BadSignature);
    }

    let payload = std::str::from_utf8(&payload_bytes).map_err(|_| TokenError::Malformed)?;
    let (user_text, expires_text) = payload.split_once(':').ok_or(TokenError::Malformed)?;
    let user_id = Uuid::parse_str(user_text).map_err(|_| TokenError::Malformed)?;
    let expires_epoch_s: u64 = expires_text.parse().map_err(|_| TokenError::Malformed)?;

    if now_epoch_s >= expires_epoch_s {
        return Err(TokenError::Expired);
    }

    Ok(user_id)
}

fn sign(secret: &[u8], payload: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret);
    hasher.update(payload);
    hex::encode(hasher.finalize())
}
