//! Project use-case service.

use crate::model::project::{Project, ProjectId};
use crate::model::team::TeamId;
use crate::model::user::UserId;
use crate::repo::project_repo::ProjectRepository;
use crate::repo::team_repo::TeamRepository;
use crate::service::{ServiceError, ServiceResult};
use uuid::Uuid;

/// Project use-cases over project and member directories.
pub struct ProjectService<P, M> {
    projects: P,
    teams: M,
}

impl<P, M> ProjectService<P, M>
where
    P: ProjectRepository,
    M: TeamRepository,
{
    pub fn new(projects: P, teams: M) -> Self {
        Self { projects, teams }
    }

    /// Creates a project under an existing team.
    ///
    /// # Errors
    /// - `Validation` when the name is blank.
    /// - `NotFound` when the team does not exist.
    pub fn create_project(
        &self,
        creator: UserId,
        team_id: TeamId,
        name: &str,
        description: &str,
    ) -> ServiceResult<Project> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::Validation(
                "project name must not be blank".to_string(),
            ));
        }

        if self.teams.get_team(team_id)?.is_none() {
            return Err(ServiceError::not_found("team", team_id));
        }

        let project = Project::new(name, team_id, creator).with_description(description);
        self.projects.create_project(&project)?;
        Ok(project)
    }

    /// Gets one project by id.
    pub fn get_project(&self, project_id: ProjectId) -> ServiceResult<Project> {
        self.projects
            .get_project(project_id)?
            .ok_or_else(|| ServiceError::not_found("project", project_id))
    }

    /// Lists projects under one team, in insertion order.
    pub fn list_by_team(&self, team_id: TeamId) -> ServiceResult<Vec<Project>> {
        Ok(self.projects.list_by_team(team_id)?)
    }

    /// Lists projects under every team the identity owns or belongs to.
    pub fn list_for_user(&self, identity: Uuid) -> ServiceResult<Vec<Project>> {
        Ok(self.projects.list_for_user(identity)?)
    }
}
