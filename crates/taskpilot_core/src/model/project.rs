//! Project model.

use crate::model::team::TeamId;
use crate::model::user::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a project.
pub type ProjectId = Uuid;

/// Project record owned by one team, created by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: String,
    pub team_id: TeamId,
    pub created_by: UserId,
}

impl Project {
    /// Creates a project record with a generated stable id.
    pub fn new(name: impl Into<String>, team_id: TeamId, created_by: UserId) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            team_id,
            created_by,
        }
    }

    /// Builder-style description override.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
