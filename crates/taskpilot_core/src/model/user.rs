//! User account model and caller identity.
//!
//! # Invariants
//! - `email` is unique across all users.
//! - `password_hash` never leaves the core; callers see `SafeUser`.

use crate::model::team::MemberId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a user account.
pub type UserId = Uuid;

/// Persisted user account record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    /// Salted hash in `v1$<salt_hex>$<digest_hex>` form.
    pub password_hash: String,
}

impl User {
    /// Creates a user record with a generated stable id.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }

    /// Projection safe to hand to external callers (no credentials).
    pub fn safe(&self) -> SafeUser {
        SafeUser {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Credential-free user projection returned by auth operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// Authenticated caller identity consumed by authorization gates.
///
/// `member_id` is the caller's team-member identity when the edge has
/// resolved one; token verification alone yields only the user id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub user_id: UserId,
    pub member_id: Option<MemberId>,
}

impl Caller {
    /// Caller known only by user account (no member identity resolved).
    pub fn user(user_id: UserId) -> Self {
        Self {
            user_id,
            member_id: None,
        }
    }

    /// Caller with a resolved team-member identity.
    pub fn with_member(user_id: UserId, member_id: MemberId) -> Self {
        Self {
            user_id,
            member_id: Some(member_id),
        }
    }
}
