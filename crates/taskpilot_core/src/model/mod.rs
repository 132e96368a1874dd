//! Domain model for teams, projects, tasks and activity records.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep assignment/patch semantics in one place, storage-agnostic.
//!
//! # Invariants
//! - Every entity is identified by a stable UUID.
//! - Member ids are unique within a team.
//! - An unassigned task carries `member_id = None` and the
//!   `UNASSIGNED_NAME` sentinel display name.

pub mod activity;
pub mod project;
pub mod task;
pub mod team;
pub mod user;
