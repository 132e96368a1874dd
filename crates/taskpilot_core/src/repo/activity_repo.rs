//! Activity recorder contract and SQLite implementation.
//!
//! # Invariants
//! - The log is append-only; entries are never edited or removed.
//! - `recent` returns entries newest first.

use crate::model::activity::ActivityEntry;
use crate::repo::RepoResult;
use rusqlite::{Connection, Row};

/// Repository interface for the append-only activity log.
pub trait ActivityRepository {
    fn append_many(&self, messages: &[String]) -> RepoResult<()>;
    fn recent(&self, limit: u32) -> RepoResult<Vec<ActivityEntry>>;
}

/// SQLite-backed activity recorder.
pub struct SqliteActivityRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteActivityRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ActivityRepository for SqliteActivityRepository<'_> {
    fn append_many(&self, messages: &[String]) -> RepoResult<()> {
        if messages.is_empty() {
            return Ok(());
        }

        let mut stmt = self
            .conn
            .prepare("INSERT INTO activity_log (message) VALUES (?1);")?;
        for message in messages {
            stmt.execute([message.as_str()])?;
        }

        Ok(())
    }

    fn recent(&self, limit: u32) -> RepoResult<Vec<ActivityEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT message, timestamp
             FROM activity_log
             ORDER BY timestamp DESC, id DESC
             LIMIT ?1;",
        )?;
        let mut rows = stmt.query([limit])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(parse_entry_row(row)?);
        }

        Ok(entries)
    }
}

fn parse_entry_row(row: &Row<'_>) -> RepoResult<ActivityEntry> {
    Ok(ActivityEntry {
        message: row.get("message")?,
        timestamp_ms: row.get("timestamp")?,
    })
}
