use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The notification list keeps only the most recent entries.
pub const NOTIFICATION_CAP: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Overdue,
    DueSoon,
    System,
}

/// An alert derived from the task collection. Immutable after creation
/// except for `is_read`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppNotification {
    /// Deterministic for overdue alerts — see [`overdue_id`]
    pub id: String,
    pub task_id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub timestamp: DateTime<Utc>,
    pub is_read: bool,
}

/// Deterministic id for an overdue alert: the same (task, due date) pair is
/// never re-alerted, even across sessions.
pub fn overdue_id(task_id: &str, due_date: NaiveDate) -> String {
    format!("overdue-{}-{}", task_id, due_date)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
