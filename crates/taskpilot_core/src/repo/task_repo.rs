//! Task store contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist task records including the nullable member assignment.
//! - Serve the task listings the assignment engine computes over.
//!
//! # Invariants
//! - Listings return tasks in insertion order; rebalancing preserves the
//!   relative order of movable tasks.
//! - `update_assignment` reports NotFound when no row changed.

use crate::model::project::ProjectId;
use crate::model::task::{Assignment, Priority, Task, TaskId, TaskStatus};
use crate::model::team::{MemberId, TeamId};
use crate::repo::{parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const TASK_SELECT_SQL: &str = "SELECT
    id,
    project_id,
    title,
    description,
    assigned_member_id,
    assigned_member_name,
    priority,
    status,
    created_by
FROM tasks";

/// Repository interface for the task store.
pub trait TaskRepository {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId>;
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    /// Every task in the system, in insertion order.
    fn list_all(&self) -> RepoResult<Vec<Task>>;
    fn list_by_project(&self, project_id: ProjectId) -> RepoResult<Vec<Task>>;
    fn list_by_member(&self, member_id: MemberId) -> RepoResult<Vec<Task>>;
    /// Tasks under all projects of one team.
    fn list_by_team(&self, team_id: TeamId) -> RepoResult<Vec<Task>>;
    /// Rewrites only the assignment field. NotFound when the task is gone.
    fn update_assignment(&self, id: TaskId, assignment: &Assignment) -> RepoResult<()>;
    fn update_task(&self, task: &Task) -> RepoResult<()>;
    fn delete_task(&self, id: TaskId) -> RepoResult<()>;
}

/// SQLite-backed task store.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn list_where(&self, clause: &str, param: String) -> RepoResult<Vec<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE {clause} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([param])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId> {
        self.conn.execute(
            "INSERT INTO tasks (
                id,
                project_id,
                title,
                description,
                assigned_member_id,
                assigned_member_name,
                priority,
                status,
                created_by
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            params![
                task.id.to_string(),
                task.project_id.to_string(),
                task.title.as_str(),
                task.description.as_str(),
                task.assignment.member_id.map(|id| id.to_string()),
                task.assignment.name.as_str(),
                priority_to_db(task.priority),
                status_to_db(task.status),
                task.created_by.map(|id| id.to_string()),
            ],
        )?;

        Ok(task.id)
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }

        Ok(None)
    }

    fn list_all(&self) -> RepoResult<Vec<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }

    fn list_by_project(&self, project_id: ProjectId) -> RepoResult<Vec<Task>> {
        self.list_where("project_id = ?1", project_id.to_string())
    }

    fn list_by_member(&self, member_id: MemberId) -> RepoResult<Vec<Task>> {
        self.list_where("assigned_member_id = ?1", member_id.to_string())
    }

    fn list_by_team(&self, team_id: TeamId) -> RepoResult<Vec<Task>> {
        self.list_where(
            "project_id IN (SELECT id FROM projects WHERE team_id = ?1)",
            team_id.to_string(),
        )
    }

    fn update_assignment(&self, id: TaskId, assignment: &Assignment) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                assigned_member_id = ?1,
                assigned_member_name = ?2,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?3;",
            params![
                assignment.member_id.map(|member_id| member_id.to_string()),
                assignment.name.as_str(),
                id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::not_found("task", id));
        }

        Ok(())
    }

    fn update_task(&self, task: &Task) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                title = ?1,
                description = ?2,
                assigned_member_id = ?3,
                assigned_member_name = ?4,
                priority = ?5,
                status = ?6,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?7;",
            params![
                task.title.as_str(),
                task.description.as_str(),
                task.assignment.member_id.map(|id| id.to_string()),
                task.assignment.name.as_str(),
                priority_to_db(task.priority),
                status_to_db(task.status),
                task.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::not_found("task", task.id));
        }

        Ok(())
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::not_found("task", id));
        }

        Ok(())
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let id_text: String = row.get("id")?;
    let project_text: String = row.get("project_id")?;

    let member_id = match row.get::<_, Option<String>>("assigned_member_id")? {
        Some(value) => Some(parse_uuid(&value, "tasks.assigned_member_id")?),
        None => None,
    };

    let priority_text: String = row.get("priority")?;
    let priority = parse_priority(&priority_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid priority `{priority_text}` in tasks.priority"))
    })?;

    let status_text: String = row.get("status")?;
    let status = parse_status(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid status `{status_text}` in tasks.status"))
    })?;

    let created_by = match row.get::<_, Option<String>>("created_by")? {
        Some(value) => Some(parse_uuid(&value, "tasks.created_by")?),
        None => None,
    };

    Ok(Task {
        id: parse_uuid(&id_text, "tasks.id")?,
        project_id: parse_uuid(&project_text, "tasks.project_id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        assignment: Assignment {
            member_id,
            name: row.get("assigned_member_name")?,
        },
        priority,
        status,
        created_by,
    })
}

fn priority_to_db(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "low",
        Priority::Medium => "medium",
        Priority::High => "high",
    }
}

fn parse_priority(value: &str) -> Option<Priority> {
    match value {
        "low" => Some(Priority::Low),
        "medium" => Some(Priority::Medium),
        "high" => Some(Priority::High),
        _ => None,
    }
}

fn status_to_db(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "pending",
        TaskStatus::InProgress => "in_progress",
        TaskStatus::Done => "done",
    }
}

fn parse_status(value: &str) -> Option<TaskStatus> {
    match value {
        "pending" => Some(TaskStatus::Pending),
        "in_progress" => Some(TaskStatus::InProgress),
        "done" => Some(TaskStatus::Done),
        _ => None,
    }
}
