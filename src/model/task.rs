use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Task urgency level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Board column a task sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Todo,
    InProgress,
    Done,
}

impl Status {
    /// Advance along the cycle: todo → in_progress → done → todo
    pub fn next(self) -> Status {
        match self {
            Status::Todo => Status::InProgress,
            Status::InProgress => Status::Done,
            Status::Done => Status::Todo,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        };
        f.write_str(s)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Status::Todo => "todo",
            Status::InProgress => "in progress",
            Status::Done => "done",
        };
        f.write_str(s)
    }
}

/// A checklist item owned by exactly one task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubTask {
    pub id: String,
    pub title: String,
    pub completed: bool,
}

/// A task record. Field names on the wire are camelCase so the persisted
/// array and the sync payload match the original app's records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Opaque unique id, assigned at creation, never reassigned
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: Status,
    /// Calendar date only — overdue comparison is by local calendar day
    pub due_date: NaiveDate,
    pub category: String,
    /// Insertion order is meaningful for display
    pub subtasks: Vec<SubTask>,
}

impl Task {
    /// Overdue = past its due date and not done
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status != Status::Done && self.due_date < today
    }
}

/// A task draft — everything except the id, which the store assigns on
/// create. This is the form's working copy; the UI owns it transiently and
/// hands it over only on explicit save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: Status,
    pub due_date: NaiveDate,
    pub category: String,
    pub subtasks: Vec<SubTask>,
}

impl TaskDraft {
    pub fn into_task(self, id: String) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            priority: self.priority,
            status: self.status,
            due_date: self.due_date,
            category: self.category,
            subtasks: self.subtasks,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn sample_task() -> Task {
        Task {
            id: "t1".into(),
            title: "Buy milk".into(),
            description: "2 liters".into(),
            priority: Priority::Medium,
            status: Status::Todo,
            due_date: date("2024-01-15"),
            category: "Shopping".into(),
            subtasks: vec![SubTask {
                id: "s1".into(),
                title: "Check fridge".into(),
                completed: false,
            }],
        }
    }

    // --- Status cycle ---

    #[test]
    fn status_cycle_order() {
        assert_eq!(Status::Todo.next(), Status::InProgress);
        assert_eq!(Status::InProgress.next(), Status::Done);
        assert_eq!(Status::Done.next(), Status::Todo);
    }

    #[test]
    fn status_cycle_is_total_and_cyclic() {
        for start in [Status::Todo, Status::InProgress, Status::Done] {
            assert_eq!(start.next().next().next(), start);
        }
    }

    // --- Overdue classification ---

    #[test]
    fn overdue_when_past_due_and_not_done() {
        let task = sample_task();
        assert!(task.is_overdue(date("2024-01-16")));
        assert!(!task.is_overdue(date("2024-01-15")));
        assert!(!task.is_overdue(date("2024-01-14")));
    }

    #[test]
    fn done_task_is_never_overdue() {
        let mut task = sample_task();
        task.status = Status::Done;
        assert!(!task.is_overdue(date("2025-01-01")));
    }

    // --- Wire format ---

    #[test]
    fn task_serializes_camel_case() {
        let json = serde_json::to_value(sample_task()).unwrap();
        assert_eq!(json["dueDate"], "2024-01-15");
        assert_eq!(json["priority"], "medium");
        assert_eq!(json["status"], "todo");
        assert_eq!(json["subtasks"][0]["completed"], false);
    }

    #[test]
    fn status_wire_names() {
        assert_eq!(
            serde_json::to_string(&Status::InProgress).unwrap(),
            "\"in_progress\""
        );
    }

    #[test]
    fn task_missing_field_fails_to_parse() {
        // No dueDate
        let json = r#"{"id":"x","title":"T","description":"","priority":"low","status":"todo","category":"Work","subtasks":[]}"#;
        assert!(serde_json::from_str::<Task>(json).is_err());
    }

    #[test]
    fn draft_into_task_keeps_fields() {
        let draft = TaskDraft {
            title: "Plan trip".into(),
            description: String::new(),
            priority: Priority::High,
            status: Status::Todo,
            due_date: date("2024-06-01"),
            category: "Personal".into(),
            subtasks: Vec::new(),
        };
        let task = draft.into_task("abc".into());
        assert_eq!(task.id, "abc");
        assert_eq!(task.title, "Plan trip");
        assert_eq!(task.priority, Priority::High);
    }
}
