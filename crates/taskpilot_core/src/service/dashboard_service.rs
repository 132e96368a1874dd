//! Dashboard summary and activity feed projections.
//!
//! # Responsibility
//! - Derive per-member load/capacity summaries for a user's owned teams.
//! - Expose the recent slice of the activity log.
//!
//! # Invariants
//! - Summaries are computed from fresh store reads; nothing is cached.
//! - The total task count is global, matching per-member counts that
//!   are matched by raw member identity.

use crate::model::activity::ActivityEntry;
use crate::model::user::UserId;
use crate::repo::activity_repo::ActivityRepository;
use crate::repo::project_repo::ProjectRepository;
use crate::repo::task_repo::TaskRepository;
use crate::repo::team_repo::TeamRepository;
use crate::service::ServiceResult;
use serde::{Deserialize, Serialize};

/// Number of entries in the recent-activity feed.
pub const ACTIVITY_FEED_LIMIT: u32 = 10;

/// Load/capacity summary for one team member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSummary {
    pub member: String,
    pub tasks: u32,
    pub capacity: u32,
    pub overloaded: bool,
}

/// Dashboard summary for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_projects: u64,
    pub total_tasks: u64,
    pub team_summary: Vec<MemberSummary>,
}

/// Dashboard projections over the stores.
pub struct DashboardService<T, P, M, A> {
    tasks: T,
    projects: P,
    teams: M,
    activity: A,
}

impl<T, P, M, A> DashboardService<T, P, M, A>
where
    T: TaskRepository,
    P: ProjectRepository,
    M: TeamRepository,
    A: ActivityRepository,
{
    pub fn new(tasks: T, projects: P, teams: M, activity: A) -> Self {
        Self {
            tasks,
            projects,
            teams,
            activity,
        }
    }

    /// Builds the dashboard summary for one user's owned teams.
    pub fn summary(&self, user_id: UserId) -> ServiceResult<DashboardSummary> {
        let total_projects = self.projects.count_created_by(user_id)?;
        let tasks = self.tasks.list_all()?;
        let teams = self.teams.list_owned(user_id)?;

        let mut team_summary = Vec::new();
        for team in teams {
            for member in self.teams.list_members(team.id)? {
                let assigned = tasks
                    .iter()
                    .filter(|task| task.assignment.member_id == Some(member.member_id))
                    .count() as u32;
                team_summary.push(MemberSummary {
                    member: member.name,
                    tasks: assigned,
                    capacity: member.capacity,
                    overloaded: assigned > member.capacity,
                });
            }
        }

        Ok(DashboardSummary {
            total_projects,
            total_tasks: tasks.len() as u64,
            team_summary,
        })
    }

    /// Returns the most recent activity entries, newest first.
    pub fn recent_activity(&self) -> ServiceResult<Vec<ActivityEntry>> {
        Ok(self.activity.recent(ACTIVITY_FEED_LIMIT)?)
    }
}
