//! Task model, assignment field and explicit patch structures.
//!
//! # Responsibility
//! - Define the task record with its nullable member assignment.
//! - Provide optional-field patch application with retain-if-absent
//!   semantics for partial updates.
//!
//! # Invariants
//! - Unassigned tasks carry `member_id = None` plus `UNASSIGNED_NAME`.
//! - High-priority tasks are pinned: rebalancing never moves them.

use crate::model::project::ProjectId;
use crate::model::team::{Member, MemberId};
use crate::model::user::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a task.
pub type TaskId = Uuid;

/// Sentinel display name for tasks without an assignee.
pub const UNASSIGNED_NAME: &str = "Unassigned";

/// Task priority tier. High-priority tasks are never rebalanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Done,
}

/// Assignment field: member identity plus cached display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub member_id: Option<MemberId>,
    pub name: String,
}

impl Assignment {
    /// The unassigned sentinel.
    pub fn unassigned() -> Self {
        Self {
            member_id: None,
            name: UNASSIGNED_NAME.to_string(),
        }
    }

    /// Assignment pointing at the given member.
    pub fn to_member(member: &Member) -> Self {
        Self {
            member_id: Some(member.member_id),
            name: member.name.clone(),
        }
    }

    /// Whether a member identity is present.
    pub fn is_assigned(&self) -> bool {
        self.member_id.is_some()
    }
}

impl Default for Assignment {
    fn default() -> Self {
        Self::unassigned()
    }
}

/// Persisted task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub project_id: ProjectId,
    pub title: String,
    pub description: String,
    pub assignment: Assignment,
    pub priority: Priority,
    pub status: TaskStatus,
    /// Original creator, when tracked. Feeds the authorization gate.
    pub created_by: Option<UserId>,
}

impl Task {
    /// Creates an unassigned task with default priority/status.
    pub fn new(project_id: ProjectId, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id,
            title: title.into(),
            description: String::new(),
            assignment: Assignment::unassigned(),
            priority: Priority::Low,
            status: TaskStatus::Pending,
            created_by: None,
        }
    }
}

/// Optional-field patch for the assignment sub-record.
///
/// Each field applies only when provided; absent fields retain the
/// existing value. Clearing an assignment is not expressible through a
/// patch; use an explicit reassignment instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentPatch {
    pub member_id: Option<MemberId>,
    pub name: Option<String>,
}

/// Optional-field patch for task updates.
///
/// Replaces the original duck-typed "whatever fields are present" merge
/// with defined per-field precedence: new value if provided, otherwise
/// the existing value is retained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub assignment: Option<AssignmentPatch>,
    pub priority: Option<Priority>,
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    /// Applies provided fields onto an existing task record.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(assignment) = &self.assignment {
            if let Some(member_id) = assignment.member_id {
                task.assignment.member_id = Some(member_id);
            }
            if let Some(name) = &assignment.name {
                task.assignment.name = name.clone();
            }
        }
    }
}
