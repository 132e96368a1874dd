//! Task use-case service with mutation authorization gate.
//!
//! # Responsibility
//! - Create tasks with team-membership validation of the assignee.
//! - Apply explicit optional-field patches behind the authorization gate.
//!
//! # Invariants
//! - A denied mutation produces no side effects.
//! - New tasks default to unassigned/Low/Pending.

use crate::model::project::{Project, ProjectId};
use crate::model::task::{Assignment, Priority, Task, TaskId, TaskPatch, TaskStatus};
use crate::model::team::MemberId;
use crate::model::user::Caller;
use crate::repo::project_repo::ProjectRepository;
use crate::repo::task_repo::TaskRepository;
use crate::repo::team_repo::TeamRepository;
use crate::service::{ServiceError, ServiceResult};

/// Input for task creation. Optional fields fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    /// Requested assignee; must be a member of the project's team.
    pub assignee: Option<MemberId>,
    pub priority: Option<Priority>,
    pub status: Option<TaskStatus>,
}

/// Task use-cases over the task store, project and member directories.
pub struct TaskService<T, P, M> {
    tasks: T,
    projects: P,
    teams: M,
}

impl<T, P, M> TaskService<T, P, M>
where
    T: TaskRepository,
    P: ProjectRepository,
    M: TeamRepository,
{
    pub fn new(tasks: T, projects: P, teams: M) -> Self {
        Self {
            tasks,
            projects,
            teams,
        }
    }

    /// Creates a task under a project.
    ///
    /// # Errors
    /// - `Validation` when the title is blank or the requested assignee
    ///   is not a member of the project's team.
    /// - `NotFound` when the project does not exist.
    pub fn create_task(
        &self,
        caller: &Caller,
        project_id: ProjectId,
        request: NewTask,
    ) -> ServiceResult<Task> {
        if request.title.trim().is_empty() {
            return Err(ServiceError::Validation(
                "task title must not be blank".to_string(),
            ));
        }

        let project = self
            .projects
            .get_project(project_id)?
            .ok_or_else(|| ServiceError::not_found("project", project_id))?;

        let assignment = match request.assignee {
            Some(member_id) => {
                let members = self.teams.list_members(project.team_id)?;
                let member = members
                    .iter()
                    .find(|member| member.member_id == member_id)
                    .ok_or_else(|| {
                        ServiceError::Validation("member not in this team".to_string())
                    })?;
                Assignment::to_member(member)
            }
            None => Assignment::unassigned(),
        };

        let mut task = Task::new(project_id, request.title);
        if let Some(description) = request.description {
            task.description = description;
        }
        if let Some(priority) = request.priority {
            task.priority = priority;
        }
        if let Some(status) = request.status {
            task.status = status;
        }
        task.assignment = assignment;
        task.created_by = Some(caller.user_id);

        self.tasks.create_task(&task)?;
        Ok(task)
    }

    /// Applies a patch to an existing task behind the authorization gate.
    ///
    /// # Errors
    /// - `NotFound` for a missing task or a missing owning project.
    /// - `AuthorizationDenied` when the caller fails every gate clause;
    ///   nothing is persisted in that case.
    pub fn update_task(
        &self,
        caller: &Caller,
        task_id: TaskId,
        patch: &TaskPatch,
    ) -> ServiceResult<Task> {
        let mut task = self
            .tasks
            .get_task(task_id)?
            .ok_or_else(|| ServiceError::not_found("task", task_id))?;
        let project = self
            .projects
            .get_project(task.project_id)?
            .ok_or_else(|| ServiceError::not_found("project", task.project_id))?;

        if !can_modify_task(caller, &task, &project) {
            return Err(ServiceError::AuthorizationDenied("update this task"));
        }

        patch.apply_to(&mut task);
        self.tasks.update_task(&task)?;
        Ok(task)
    }

    /// Deletes a task behind the same authorization gate as updates.
    pub fn delete_task(&self, caller: &Caller, task_id: TaskId) -> ServiceResult<()> {
        let task = self
            .tasks
            .get_task(task_id)?
            .ok_or_else(|| ServiceError::not_found("task", task_id))?;
        let project = self
            .projects
            .get_project(task.project_id)?
            .ok_or_else(|| ServiceError::not_found("project", task.project_id))?;

        if !can_modify_task(caller, &task, &project) {
            return Err(ServiceError::AuthorizationDenied("delete this task"));
        }

        self.tasks.delete_task(task.id)?;
        Ok(())
    }

    /// Gets one task by id.
    pub fn get_task(&self, task_id: TaskId) -> ServiceResult<Task> {
        self.tasks
            .get_task(task_id)?
            .ok_or_else(|| ServiceError::not_found("task", task_id))
    }

    /// Lists tasks under one project, in insertion order.
    pub fn list_by_project(&self, project_id: ProjectId) -> ServiceResult<Vec<Task>> {
        Ok(self.tasks.list_by_project(project_id)?)
    }

    /// Lists tasks assigned to one member, in insertion order.
    pub fn list_by_member(&self, member_id: MemberId) -> ServiceResult<Vec<Task>> {
        Ok(self.tasks.list_by_member(member_id)?)
    }
}

/// Authorization gate for task mutation.
///
/// The caller may mutate when at least one holds:
/// - caller created the owning project,
/// - caller's member identity equals the task's current assignment,
/// - caller created the task (when tracked).
pub fn can_modify_task(caller: &Caller, task: &Task, project: &Project) -> bool {
    if project.created_by == caller.user_id {
        return true;
    }

    if let (Some(assigned), Some(member)) = (task.assignment.member_id, caller.member_id) {
        if assigned == member {
            return true;
        }
    }

    task.created_by == Some(caller.user_id)
}
