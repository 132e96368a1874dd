//! Core domain logic for taskpilot.
//! This crate is the single source of truth for business invariants:
//! teams with capacity-bounded members, projects, tasks, and the
//! capacity-aware assignment engine.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod token;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::activity::ActivityEntry;
pub use model::project::{Project, ProjectId};
pub use model::task::{
    Assignment, AssignmentPatch, Priority, Task, TaskId, TaskPatch, TaskStatus, UNASSIGNED_NAME,
};
pub use model::team::{Member, MemberId, MemberPatch, Team, TeamId, DEFAULT_MEMBER_ROLE};
pub use model::user::{Caller, SafeUser, User, UserId};
pub use repo::activity_repo::{ActivityRepository, SqliteActivityRepository};
pub use repo::project_repo::{ProjectRepository, SqliteProjectRepository};
pub use repo::task_repo::{SqliteTaskRepository, TaskRepository};
pub use repo::team_repo::{SqliteTeamRepository, TeamRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use service::assignment::{AssignmentService, RebalanceReport};
pub use service::auth_service::{AuthService, LoginOutcome, TOKEN_TTL_SECS};
pub use service::dashboard_service::{
    DashboardService, DashboardSummary, MemberSummary, ACTIVITY_FEED_LIMIT,
};
pub use service::project_service::ProjectService;
pub use service::task_service::{can_modify_task, NewTask, TaskService};
pub use service::team_service::{NewMember, TeamService, TeamView};
pub use service::{ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
