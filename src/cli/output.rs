use serde::Serialize;

use crate::model::history::{HistoryAction, HistoryEntry};
use crate::model::notification::AppNotification;
use crate::model::task::{Status, Task};
use crate::sync::reconciler::Classification;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct PreviewEntryJson {
    pub id: String,
    pub title: String,
    pub change: &'static str,
    pub selected: bool,
}

#[derive(Serialize)]
pub struct CreatedJson {
    pub id: String,
    pub title: String,
}

#[derive(Serialize)]
pub struct UndoJson {
    pub restored: bool,
    pub tasks: usize,
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

fn status_char(status: Status) -> char {
    match status {
        Status::Todo => ' ',
        Status::InProgress => '>',
        Status::Done => 'x',
    }
}

pub fn change_label(change: Classification) -> &'static str {
    match change {
        Classification::New => "new",
        Classification::Updated => "update",
    }
}

fn action_label(action: HistoryAction) -> &'static str {
    match action {
        HistoryAction::Create => "create",
        HistoryAction::Delete => "delete",
        HistoryAction::Complete => "complete",
        HistoryAction::StatusChange => "status",
    }
}

/// Format a single task as a one-line summary
pub fn format_task_line(task: &Task) -> String {
    let subs = if task.subtasks.is_empty() {
        String::new()
    } else {
        let done = task.subtasks.iter().filter(|s| s.completed).count();
        format!(" [{}/{}]", done, task.subtasks.len())
    };
    format!(
        "[{}] {}  {} ({}, {}, due {}){}",
        status_char(task.status),
        task.id,
        task.title,
        task.priority,
        task.category,
        task.due_date,
        subs
    )
}

/// Format detailed task view
pub fn format_task_detail(task: &Task) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!(
        "[{}] {}  {}",
        status_char(task.status),
        task.id,
        task.title
    ));
    lines.push(format!("status: {}", task.status));
    lines.push(format!("priority: {}", task.priority));
    lines.push(format!("due: {}", task.due_date));
    lines.push(format!("category: {}", task.category));

    if !task.description.is_empty() {
        lines.push("description:".to_string());
        for line in task.description.lines() {
            lines.push(format!("  {}", line));
        }
    }

    if !task.subtasks.is_empty() {
        lines.push(String::new());
        lines.push("subtasks:".to_string());
        for sub in &task.subtasks {
            let sc = if sub.completed { 'x' } else { ' ' };
            lines.push(format!("  [{}] {}  {}", sc, sub.id, sub.title));
        }
    }

    lines
}

pub fn format_history_line(entry: &HistoryEntry) -> String {
    let when = entry.timestamp.format("%Y-%m-%d %H:%M");
    let details = entry
        .details
        .as_ref()
        .map(|d| format!(" ({})", d))
        .unwrap_or_default();
    format!(
        "{}  {:<8}  {}{}",
        when,
        action_label(entry.action),
        entry.task_title,
        details
    )
}

pub fn format_notification_line(notification: &AppNotification) -> String {
    let marker = if notification.is_read { ' ' } else { '*' };
    format!(
        "{} {}  {}",
        marker, notification.id, notification.message
    )
}
