//! Team/member directory contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist teams and their capacity-bounded members.
//! - Serve the member directory consumed by the assignment engine.
//!
//! # Invariants
//! - `list_members` returns members in insertion order; the assignment
//!   engine's tie-breaks depend on this ordering.
//! - Member ids are unique within a team (primary key).

use crate::model::team::{Member, MemberId, Team, TeamId};
use crate::repo::{parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const TEAM_SELECT_SQL: &str = "SELECT
    id,
    name,
    owner_id
FROM teams";

const MEMBER_SELECT_SQL: &str = "SELECT
    member_id,
    name,
    role,
    capacity
FROM team_members";

/// Repository interface for the team/member directory.
pub trait TeamRepository {
    fn create_team(&self, team: &Team) -> RepoResult<TeamId>;
    fn get_team(&self, id: TeamId) -> RepoResult<Option<Team>>;
    /// All teams in the system, in creation order.
    fn list_all(&self) -> RepoResult<Vec<Team>>;
    /// Teams the identity owns or belongs to as a member.
    fn list_teams_for(&self, identity: Uuid) -> RepoResult<Vec<Team>>;
    /// Teams owned by the given user only.
    fn list_owned(&self, owner: Uuid) -> RepoResult<Vec<Team>>;
    /// Members of one team, in insertion order.
    fn list_members(&self, team_id: TeamId) -> RepoResult<Vec<Member>>;
    fn add_member(&self, team_id: TeamId, member: &Member) -> RepoResult<MemberId>;
    fn update_member(&self, team_id: TeamId, member: &Member) -> RepoResult<()>;
    fn remove_member(&self, team_id: TeamId, member_id: MemberId) -> RepoResult<()>;
}

/// SQLite-backed team/member directory.
pub struct SqliteTeamRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTeamRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn team_exists(&self, team_id: TeamId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM teams WHERE id = ?1);",
            [team_id.to_string()],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

impl TeamRepository for SqliteTeamRepository<'_> {
    fn create_team(&self, team: &Team) -> RepoResult<TeamId> {
        self.conn.execute(
            "INSERT INTO teams (id, name, owner_id) VALUES (?1, ?2, ?3);",
            params![
                team.id.to_string(),
                team.name.as_str(),
                team.owner_id.to_string(),
            ],
        )?;

        Ok(team.id)
    }

    fn get_team(&self, id: TeamId) -> RepoResult<Option<Team>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TEAM_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_team_row(row)?));
        }

        Ok(None)
    }

    fn list_all(&self) -> RepoResult<Vec<Team>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TEAM_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut teams = Vec::new();
        while let Some(row) = rows.next()? {
            teams.push(parse_team_row(row)?);
        }

        Ok(teams)
    }

    fn list_teams_for(&self, identity: Uuid) -> RepoResult<Vec<Team>> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT t.id, t.name, t.owner_id
             FROM teams t
             LEFT JOIN team_members m ON m.team_id = t.id
             WHERE t.owner_id = ?1 OR m.member_id = ?1
             ORDER BY t.rowid ASC;",
        )?;
        let mut rows = stmt.query([identity.to_string()])?;
        let mut teams = Vec::new();
        while let Some(row) = rows.next()? {
            teams.push(parse_team_row(row)?);
        }

        Ok(teams)
    }

    fn list_owned(&self, owner: Uuid) -> RepoResult<Vec<Team>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TEAM_SELECT_SQL} WHERE owner_id = ?1 ORDER BY rowid ASC;"
        ))?;
        let mut rows = stmt.query([owner.to_string()])?;
        let mut teams = Vec::new();
        while let Some(row) = rows.next()? {
            teams.push(parse_team_row(row)?);
        }

        Ok(teams)
    }

    fn list_members(&self, team_id: TeamId) -> RepoResult<Vec<Member>> {
        let mut stmt = self.conn.prepare(&format!(
            "{MEMBER_SELECT_SQL} WHERE team_id = ?1 ORDER BY position ASC;"
        ))?;
        let mut rows = stmt.query([team_id.to_string()])?;
        let mut members = Vec::new();
        while let Some(row) = rows.next()? {
            members.push(parse_member_row(row)?);
        }

        Ok(members)
    }

    fn add_member(&self, team_id: TeamId, member: &Member) -> RepoResult<MemberId> {
        if !self.team_exists(team_id)? {
            return Err(RepoError::not_found("team", team_id));
        }

        self.conn.execute(
            "INSERT INTO team_members (member_id, team_id, name, role, capacity, position)
             VALUES (
                ?1, ?2, ?3, ?4, ?5,
                (SELECT COALESCE(MAX(position) + 1, 0) FROM team_members WHERE team_id = ?2)
             );",
            params![
                member.member_id.to_string(),
                team_id.to_string(),
                member.name.as_str(),
                member.role.as_str(),
                member.capacity,
            ],
        )?;

        Ok(member.member_id)
    }

    fn update_member(&self, team_id: TeamId, member: &Member) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE team_members
             SET name = ?1, role = ?2, capacity = ?3
             WHERE team_id = ?4 AND member_id = ?5;",
            params![
                member.name.as_str(),
                member.role.as_str(),
                member.capacity,
                team_id.to_string(),
                member.member_id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::not_found("member", member.member_id));
        }

        Ok(())
    }

    fn remove_member(&self, team_id: TeamId, member_id: MemberId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM team_members WHERE team_id = ?1 AND member_id = ?2;",
            params![team_id.to_string(), member_id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::not_found("member", member_id));
        }

        Ok(())
    }
}

fn parse_team_row(row: &Row<'_>) -> RepoResult<Team> {
    let id_text: String = row.get("id")?;
    let owner_text: String = row.get("owner_id")?;
    Ok(Team {
        id: parse_uuid(&id_text, "teams.id")?,
        name: row.get("name")?,
        owner_id: parse_uuid(&owner_text, "teams.owner_id")?,
    })
}

fn parse_member_row(row: &Row<'_>) -> RepoResult<Member> {
    let id_text: String = row.get("member_id")?;
    Ok(Member {
        member_id: parse_uuid(&id_text, "team_members.member_id")?,
        name: row.get("name")?,
        role: row.get("role")?,
        capacity: row.get("capacity")?,
    })
}
