//! Capacity-aware assignment engine.
//!
//! # Responsibility
//! - Suggest the least-loaded member for new-task assignment.
//! - Rebalance overloaded members across every team, pinning
//!   High-priority tasks in place.
//!
//! # Invariants
//! - Load snapshots are recomputed from the stores on every call and
//!   never cached across requests.
//! - A member's in-memory load is bumped only after the corresponding
//!   assignment update has been persisted.
//! - Ties and target selection resolve in member-list order.

use crate::model::project::ProjectId;
use crate::model::task::{Assignment, Priority, Task};
use crate::model::team::{Member, MemberId, TeamId};
use crate::repo::activity_repo::ActivityRepository;
use crate::repo::project_repo::ProjectRepository;
use crate::repo::task_repo::TaskRepository;
use crate::repo::team_repo::TeamRepository;
use crate::service::{ServiceError, ServiceResult};
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Outcome of one full rebalancing pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebalanceReport {
    /// One human-readable line per persisted move, in move order.
    pub entries: Vec<String>,
}

/// Assignment engine over the task store, member directory and
/// activity recorder.
pub struct AssignmentService<T, M, P, A> {
    tasks: T,
    teams: M,
    projects: P,
    activity: A,
}

impl<T, M, P, A> AssignmentService<T, M, P, A>
where
    T: TaskRepository,
    M: TeamRepository,
    P: ProjectRepository,
    A: ActivityRepository,
{
    pub fn new(tasks: T, teams: M, projects: P, activity: A) -> Self {
        Self {
            tasks,
            teams,
            projects,
            activity,
        }
    }

    /// Picks the member with the fewest currently-assigned tasks across
    /// the team's projects.
    ///
    /// # Contract
    /// - Members with zero assigned tasks count at load 0.
    /// - Ties break in member-list order (first encountered wins).
    /// - Capacity is informational here: an already-full member can
    ///   still be returned.
    ///
    /// # Errors
    /// - `NotFound` when the team does not exist.
    /// - `NoMembersInTeam` when the team has zero members.
    pub fn suggest_assignee(&self, team_id: TeamId) -> ServiceResult<Member> {
        let team = self
            .teams
            .get_team(team_id)?
            .ok_or_else(|| ServiceError::not_found("team", team_id))?;
        let members = self.teams.list_members(team.id)?;
        let tasks = self.tasks.list_by_team(team.id)?;

        least_loaded(&members, &tasks)
            .cloned()
            .ok_or(ServiceError::NoMembersInTeam(team_id))
    }

    /// Same least-loaded selection, scoped to one project's tasks and
    /// the owning team's members.
    pub fn auto_assign_for_project(&self, project_id: ProjectId) -> ServiceResult<Member> {
        let project = self
            .projects
            .get_project(project_id)?
            .ok_or_else(|| ServiceError::not_found("project", project_id))?;
        let members = self.teams.list_members(project.team_id)?;
        let tasks = self.tasks.list_by_project(project_id)?;

        least_loaded(&members, &tasks)
            .cloned()
            .ok_or(ServiceError::NoMembersInTeam(project.team_id))
    }

    /// Scans every team and moves excess tasks off overloaded members
    /// onto under-capacity ones.
    ///
    /// # Contract
    /// - A member keeps its first `capacity` assigned tasks; only the
    ///   excess is eligible to move.
    /// - High-priority tasks are pinned and never moved.
    /// - Targets are chosen first-fit in member-list order, not
    ///   least-loaded-first.
    /// - A task with no valid target is skipped, not an error.
    /// - Tasks are matched to members by raw member identity across the
    ///   whole task set, not scoped to the team's projects (see
    ///   DESIGN.md).
    ///
    /// # Errors
    /// - `Store` on a persistence failure. Already-persisted moves stay
    ///   applied; entries collected so far are flushed to the activity
    ///   log best-effort before the error propagates.
    pub fn rebalance_all(&self) -> ServiceResult<RebalanceReport> {
        let all_tasks = self.tasks.list_all()?;
        let teams = self.teams.list_all()?;
        let team_count = teams.len();

        let mut entries = Vec::new();
        for team in teams {
            if let Err(err) = self.rebalance_team(team.id, &all_tasks, &mut entries) {
                if let Err(flush_err) = self.activity.append_many(&entries) {
                    warn!(
                        "event=rebalance module=assignment status=error detail=entry_flush_failed error={flush_err}"
                    );
                }
                return Err(err);
            }
        }

        self.activity.append_many(&entries)?;
        info!(
            "event=rebalance module=assignment status=ok teams={team_count} moves={}",
            entries.len()
        );

        Ok(RebalanceReport { entries })
    }

    fn rebalance_team(
        &self,
        team_id: TeamId,
        all_tasks: &[Task],
        entries: &mut Vec<String>,
    ) -> ServiceResult<()> {
        let members = self.teams.list_members(team_id)?;
        let mut loads: Vec<MemberLoad> = members.into_iter().map(MemberLoad::seed).collect();

        for task in all_tasks {
            if let Some(member_id) = task.assignment.member_id {
                if let Some(load) = loads.iter_mut().find(|load| load.member_id == member_id) {
                    load.assigned.push(task.clone());
                }
            }
        }

        for source in 0..loads.len() {
            let capacity = loads[source].capacity as usize;
            let assigned_count = loads[source].assigned.len();
            if assigned_count <= capacity {
                continue;
            }

            // The first `capacity` assigned tasks stay with the member;
            // only the excess slice is eligible, and pinned (High) tasks
            // within it stay put.
            let movable: Vec<Task> = loads[source].assigned[capacity..]
                .iter()
                .filter(|task| task.priority != Priority::High)
                .cloned()
                .collect();
            let source_name = loads[source].name.clone();

            for task in movable {
                let Some(target) = loads
                    .iter()
                    .position(|load| load.assigned.len() < load.capacity as usize)
                else {
                    // No under-capacity member; the task stays put.
                    continue;
                };

                let assignment = Assignment {
                    member_id: Some(loads[target].member_id),
                    name: loads[target].name.clone(),
                };
                self.tasks.update_assignment(task.id, &assignment)?;

                entries.push(format!(
                    "Task \"{}\" reassigned from {source_name} to {}.",
                    task.title, loads[target].name
                ));
                loads[target].assigned.push(task);
            }
        }

        Ok(())
    }
}

/// In-memory per-member load record for one rebalancing pass.
struct MemberLoad {
    member_id: MemberId,
    name: String,
    capacity: u32,
    assigned: Vec<Task>,
}

impl MemberLoad {
    fn seed(member: Member) -> Self {
        Self {
            member_id: member.member_id,
            name: member.name,
            capacity: member.capacity,
            assigned: Vec::new(),
        }
    }
}

/// Returns the member with the fewest assigned tasks.
///
/// Tasks assigned to identities outside `members` are ignored. Ties
/// break strictly in favor of the earlier list position.
pub(crate) fn least_loaded<'a>(members: &'a [Member], tasks: &[Task]) -> Option<&'a Member> {
    if members.is_empty() {
        return None;
    }

    let mut counts = vec![0usize; members.len()];
    for task in tasks {
        if let Some(member_id) = task.assignment.member_id {
            if let Some(position) = members
                .iter()
                .position(|member| member.member_id == member_id)
            {
                counts[position] += 1;
            }
        }
    }

    let mut best = 0;
    for (position, count) in counts.iter().enumerate().skip(1) {
        if *count < counts[best] {
            best = position;
        }
    }

    Some(&members[best])
}

#[cfg(test)]
mod tests {
    use super::least_loaded;
    use crate::model::task::{Assignment, Task};
    use crate::model::team::Member;
    use uuid::Uuid;

    fn assigned_task(member: &Member) -> Task {
        let mut task = Task::new(Uuid::new_v4(), "t");
        task.assignment = Assignment::to_member(member);
        task
    }

    #[test]
    fn empty_member_list_yields_none() {
        assert!(least_loaded(&[], &[]).is_none());
    }

    #[test]
    fn all_zero_loads_pick_first_member() {
        let members = vec![Member::new("a"), Member::new("b"), Member::new("c")];
        let picked = least_loaded(&members, &[]).unwrap();
        assert_eq!(picked.member_id, members[0].member_id);
    }

    #[test]
    fn ties_break_by_list_order() {
        let members = vec![Member::new("a"), Member::new("b"), Member::new("c")];
        // a carries one task; b and c tie at zero -> b wins.
        let tasks = vec![assigned_task(&members[0])];
        let picked = least_loaded(&members, &tasks).unwrap();
        assert_eq!(picked.member_id, members[1].member_id);
    }

    #[test]
    fn foreign_assignments_are_ignored() {
        let members = vec![Member::new("a"), Member::new("b")];
        let outsider = Member::new("outsider");
        let tasks = vec![
            assigned_task(&outsider),
            assigned_task(&outsider),
            assigned_task(&members[0]),
        ];
        let picked = least_loaded(&members, &tasks).unwrap();
        assert_eq!(picked.member_id, members[1].member_id);
    }
}
