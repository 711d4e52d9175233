use serde::{Deserialize, Serialize};

/// A titled, optionally described, completable unit of work.
///
/// Field order matches the persisted JSON document. `completed_at` is
/// `Some` if and only if `completed` is true; it serializes to `null`
/// when absent. Timestamps are RFC 3339 strings in UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub completed: bool,
    pub created_at: String,
    pub completed_at: Option<String>,
}

/// View selector applied to the task collection for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    All,
    Pending,
    Completed,
}

/// Aggregate counts derived from the full collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Statistics {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
    /// `round(100 * completed / total)`, `0` for an empty collection.
    pub percent_complete: u8,
}
