//! Team and team-member models.
//!
//! # Responsibility
//! - Define the capacity-bounded member record consumed by the
//!   assignment engine.
//!
//! # Invariants
//! - `member_id` is stable and unique within its team.
//! - `capacity` is the maximum task count a member should carry;
//!   zero means the member accepts no assigned load.

use crate::model::user::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a team.
pub type TeamId = Uuid;

/// Stable identifier for a team member, unique within a team.
pub type MemberId = Uuid;

/// Default role label applied when none is supplied.
pub const DEFAULT_MEMBER_ROLE: &str = "member";

/// Persisted team record. Members are stored separately in insertion
/// order and loaded through the member directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub owner_id: UserId,
}

impl Team {
    /// Creates a team record with a generated stable id.
    pub fn new(name: impl Into<String>, owner_id: UserId) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            owner_id,
        }
    }
}

/// Capacity-bounded member record owned by exactly one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub member_id: MemberId,
    pub name: String,
    pub role: String,
    /// Max tasks this member should carry before counting as overloaded.
    pub capacity: u32,
}

impl Member {
    /// Creates a member with a generated id and the default role/capacity.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            member_id: Uuid::new_v4(),
            name: name.into(),
            role: DEFAULT_MEMBER_ROLE.to_string(),
            capacity: 0,
        }
    }

    /// Builder-style role override.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    /// Builder-style capacity override.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }
}

/// Optional-field patch for member edits.
///
/// Each field applies only when provided; absent fields retain the
/// existing value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberPatch {
    pub name: Option<String>,
    pub role: Option<String>,
    pub capacity: Option<u32>,
}

impl MemberPatch {
    /// Applies provided fields onto an existing member record.
    pub fn apply_to(&self, member: &mut Member) {
        if let Some(name) = &self.name {
            member.name = name.clone();
        }
        if let Some(role) = &self.role {
            member.role = role.clone();
        }
        if let Some(capacity) = self.capacity {
            member.capacity = capacity;
        }
    }
}
