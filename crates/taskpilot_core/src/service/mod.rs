//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep the external edge decoupled from storage details.
//!
//! # Invariants
//! - Services never bypass repository persistence contracts.
//! - Authorization-denied outcomes produce no side effects.

use crate::model::team::TeamId;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod assignment;
pub mod auth_service;
pub mod dashboard_service;
pub mod project_service;
pub mod task_service;
pub mod team_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Unified error taxonomy surfaced by use-case services.
///
/// No error kind is retried automatically; each carries enough context
/// for the edge to produce a response.
#[derive(Debug)]
pub enum ServiceError {
    /// Required input is missing or invalid.
    Validation(String),
    /// A referenced entity does not exist.
    NotFound { entity: &'static str, id: String },
    /// The caller fails every clause of the authorization gate.
    AuthorizationDenied(&'static str),
    /// A team has no members to choose an assignee from.
    NoMembersInTeam(TeamId),
    /// Underlying persistence or lookup failure.
    Store(RepoError),
}

impl ServiceError {
    /// Builds a not-found error for the given entity kind and id.
    pub fn not_found(entity: &'static str, id: impl Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(message) => write!(f, "{message}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::AuthorizationDenied(action) => write!(f, "not authorized to {action}"),
            Self::NoMembersInTeam(team_id) => {
                write!(f, "team has no members to assign: {team_id}")
            }
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            // Missing entities keep their taxonomy no matter which
            // layer noticed them first.
            RepoError::NotFound { entity, id } => Self::NotFound { entity, id },
            other => Self::Store(other),
        }
    }
}
