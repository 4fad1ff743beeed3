use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::task::Task;

/// The log keeps only the most recent entries; oldest are dropped first.
pub const HISTORY_CAP: usize = 100;

/// What happened to a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryAction {
    Create,
    Delete,
    Complete,
    StatusChange,
}

/// Immutable audit record. `task_title` is a snapshot taken at the time of
/// the event, not a live reference — the task may be edited or gone later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub task_id: String,
    pub task_title: String,
    pub action: HistoryAction,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Append-only capped log of task events, newest first.
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    pub fn new() -> Self {
        HistoryLog::default()
    }

    /// Rebuild from a persisted entry list (newest first), re-applying the cap.
    pub fn from_entries(mut entries: Vec<HistoryEntry>) -> Self {
        entries.truncate(HISTORY_CAP);
        HistoryLog { entries }
    }

    /// Record an event against a task. Entries are never edited afterwards.
    pub fn record(&mut self, task: &Task, action: HistoryAction, details: Option<String>) {
        self.entries.insert(
            0,
            HistoryEntry {
                id: Uuid::new_v4().to_string(),
                task_id: task.id.clone(),
                task_title: task.title.clone(),
                action,
                timestamp: Utc::now(),
                details,
            },
        );
        self.entries.truncate(HISTORY_CAP);
    }

    /// Entries, newest first
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::{Priority, Status};

    fn sample_task(id: &str, title: &str) -> Task {
        Task {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            priority: Priority::Low,
            status: Status::Todo,
            due_date: "2024-01-01".parse().unwrap(),
            category: "Work".into(),
            subtasks: Vec::new(),
        }
    }

    #[test]
    fn record_prepends_newest_first() {
        let mut log = HistoryLog::new();
        log.record(&sample_task("a", "First"), HistoryAction::Create, None);
        log.record(&sample_task("b", "Second"), HistoryAction::Create, None);

        assert_eq!(log.entries().len(), 2);
        assert_eq!(log.entries()[0].task_id, "b");
        assert_eq!(log.entries()[1].task_id, "a");
    }

    #[test]
    fn title_is_a_snapshot() {
        let mut log = HistoryLog::new();
        let mut task = sample_task("a", "Original");
        log.record(&task, HistoryAction::Create, None);
        task.title = "Renamed".into();
        assert_eq!(log.entries()[0].task_title, "Original");
    }

    #[test]
    fn cap_drops_oldest() {
        let mut log = HistoryLog::new();
        for i in 0..HISTORY_CAP + 10 {
            log.record(
                &sample_task(&format!("t{}", i), "T"),
                HistoryAction::Create,
                None,
            );
        }
        assert_eq!(log.entries().len(), HISTORY_CAP);
        // Newest survives, the ten oldest are gone
        assert_eq!(log.entries()[0].task_id, format!("t{}", HISTORY_CAP + 9));
        assert_eq!(log.entries().last().unwrap().task_id, "t10");
    }

    #[test]
    fn from_entries_reapplies_cap() {
        let mut entries = Vec::new();
        for i in 0..HISTORY_CAP + 5 {
            entries.push(HistoryEntry {
                id: format!("e{}", i),
                task_id: format!("t{}", i),
                task_title: "T".into(),
                action: HistoryAction::Delete,
                timestamp: Utc::now(),
                details: None,
            });
        }
        let log = HistoryLog::from_entries(entries);
        assert_eq!(log.entries().len(), HISTORY_CAP);
        assert_eq!(log.entries()[0].id, "e0");
    }

    #[test]
    fn clear_empties_log() {
        let mut log = HistoryLog::new();
        log.record(&sample_task("a", "T"), HistoryAction::Create, None);
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn action_wire_names() {
        assert_eq!(
            serde_json::to_string(&HistoryAction::StatusChange).unwrap(),
            "\"status_change\""
        );
        assert_eq!(
            serde_json::to_string(&HistoryAction::Complete).unwrap(),
            "\"complete\""
        );
    }

    #[test]
    fn details_omitted_when_none() {
        let mut log = HistoryLog::new();
        log.record(&sample_task("a", "T"), HistoryAction::Create, None);
        let json = serde_json::to_value(&log.entries()[0]).unwrap();
        assert!(json.get("details").is_none());
        assert_eq!(json["taskId"], "a");
    }
}
