//! Project repository contract and SQLite implementation.

use crate::model::project::{Project, ProjectId};
use crate::model::team::TeamId;
use crate::model::user::UserId;
use crate::repo::{parse_uuid, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const PROJECT_SELECT_SQL: &str = "SELECT
    id,
    name,
    description,
    team_id,
    created_by
FROM projects";

/// Repository interface for projects.
pub trait ProjectRepository {
    fn create_project(&self, project: &Project) -> RepoResult<ProjectId>;
    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>>;
    fn list_by_team(&self, team_id: TeamId) -> RepoResult<Vec<Project>>;
    /// Projects under all teams the identity owns or belongs to.
    fn list_for_user(&self, identity: Uuid) -> RepoResult<Vec<Project>>;
    fn count_created_by(&self, user_id: UserId) -> RepoResult<u64>;
}

/// SQLite-backed project repository.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn create_project(&self, project: &Project) -> RepoResult<ProjectId> {
        self.conn.execute(
            "INSERT INTO projects (id, name, description, team_id, created_by)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                project.id.to_string(),
                project.name.as_str(),
                project.description.as_str(),
                project.team_id.to_string(),
                project.created_by.to_string(),
            ],
        )?;

        Ok(project.id)
    }

    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_project_row(row)?));
        }

        Ok(None)
    }

    fn list_by_team(&self, team_id: TeamId) -> RepoResult<Vec<Project>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PROJECT_SELECT_SQL} WHERE team_id = ?1 ORDER BY rowid ASC;"
        ))?;
        let mut rows = stmt.query([team_id.to_string()])?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }

        Ok(projects)
    }

    fn list_for_user(&self, identity: Uuid) -> RepoResult<Vec<Project>> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT p.id, p.name, p.description, p.team_id, p.created_by
             FROM projects p
             JOIN teams t ON t.id = p.team_id
             LEFT JOIN team_members m ON m.team_id = t.id
             WHERE t.owner_id = ?1 OR m.member_id = ?1
             ORDER BY p.rowid ASC;",
        )?;
        let mut rows = stmt.query([identity.to_string()])?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }

        Ok(projects)
    }

    fn count_created_by(&self, user_id: UserId) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM projects WHERE created_by = ?1;",
            [user_id.to_string()],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    let id_text: String = row.get("id")?;
    let team_text: String = row.get("team_id")?;
    let creator_text: String = row.get("created_by")?;
    Ok(Project {
        id: parse_uuid(&id_text, "projects.id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        team_id: parse_uuid(&team_text, "projects.team_id")?,
        created_by: parse_uuid(&creator_text, "projects.created_by")?,
    })
}
