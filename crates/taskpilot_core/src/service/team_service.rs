//! Team and member use-case service.
//!
//! # Responsibility
//! - Team creation/lookup and member add/edit/remove over the member
//!   directory.
//!
//! # Invariants
//! - New members get the default role and capacity 0 unless overridden.
//! - Member edits apply optional-field patches; absent fields are
//!   retained.

use crate::model::team::{Member, MemberId, MemberPatch, Team, TeamId};
use crate::model::user::UserId;
use crate::repo::team_repo::TeamRepository;
use crate::service::{ServiceError, ServiceResult};
use uuid::Uuid;

/// Input for adding a member to a team.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewMember {
    pub name: String,
    pub role: Option<String>,
    pub capacity: Option<u32>,
}

/// Team record together with its ordered member list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamView {
    pub team: Team,
    pub members: Vec<Member>,
}

/// Team/member use-cases over the member directory.
pub struct TeamService<M: TeamRepository> {
    teams: M,
}

impl<M: TeamRepository> TeamService<M> {
    pub fn new(teams: M) -> Self {
        Self { teams }
    }

    /// Creates a team owned by the caller.
    pub fn create_team(&self, owner: UserId, name: &str) -> ServiceResult<Team> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::Validation(
                "team name must not be blank".to_string(),
            ));
        }

        let team = Team::new(name, owner);
        self.teams.create_team(&team)?;
        Ok(team)
    }

    /// Gets one team with its members in insertion order.
    pub fn get_team(&self, team_id: TeamId) -> ServiceResult<TeamView> {
        let team = self
            .teams
            .get_team(team_id)?
            .ok_or_else(|| ServiceError::not_found("team", team_id))?;
        let members = self.teams.list_members(team.id)?;
        Ok(TeamView { team, members })
    }

    /// Lists teams the identity owns or belongs to as a member.
    pub fn list_teams(&self, identity: Uuid) -> ServiceResult<Vec<Team>> {
        Ok(self.teams.list_teams_for(identity)?)
    }

    /// Adds a member with a generated id and default role/capacity.
    pub fn add_member(&self, team_id: TeamId, request: NewMember) -> ServiceResult<Member> {
        if request.name.trim().is_empty() {
            return Err(ServiceError::Validation(
                "member name must not be blank".to_string(),
            ));
        }

        let mut member = Member::new(request.name);
        if let Some(role) = request.role {
            member = member.with_role(role);
        }
        if let Some(capacity) = request.capacity {
            member = member.with_capacity(capacity);
        }

        self.teams.add_member(team_id, &member)?;
        Ok(member)
    }

    /// Applies an optional-field patch to one member.
    pub fn edit_member(
        &self,
        team_id: TeamId,
        member_id: MemberId,
        patch: &MemberPatch,
    ) -> ServiceResult<Member> {
        let members = self.teams.list_members(team_id)?;
        let mut member = members
            .into_iter()
            .find(|member| member.member_id == member_id)
            .ok_or_else(|| ServiceError::not_found("member", member_id))?;

        patch.apply_to(&mut member);
        self.teams.update_member(team_id, &member)?;
        Ok(member)
    }

    /// Removes one member from a team.
    pub fn remove_member(&self, team_id: TeamId, member_id: MemberId) -> ServiceResult<()> {
        Ok(self.teams.remove_member(team_id, member_id)?)
    }
}
