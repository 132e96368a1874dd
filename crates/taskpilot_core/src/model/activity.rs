//! Activity log entry model.

use serde::{Deserialize, Serialize};

/// One human-readable activity record, append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub message: String,
    /// Recording time in epoch milliseconds, set by the store.
    pub timestamp_ms: i64,
}
