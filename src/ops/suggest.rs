use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::model::task::{Priority, Status, SubTask, TaskDraft};

/// Error type for an AI collaborator reply that cannot be used. Callers
/// recover this as "no suggestions produced" — it is informational, never
/// fatal, and never retried automatically.
#[derive(Debug, thiserror::Error)]
pub enum SuggestError {
    #[error("suggestion reply is not usable: {0}")]
    BadReply(#[from] serde_json::Error),
}

/// One element of the schema-constrained reply to a task-suggestion
/// request. Fields the model omits fall back the way the original form
/// does: a placeholder title, medium priority, the first category.
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestedTask {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Parse a suggestion reply: a JSON array of suggestion objects.
pub fn parse_suggestions(json: &str) -> Result<Vec<SuggestedTask>, SuggestError> {
    Ok(serde_json::from_str(json)?)
}

/// Parse a decomposition reply: a JSON array of subtask title strings.
pub fn parse_subtask_titles(json: &str) -> Result<Vec<String>, SuggestError> {
    Ok(serde_json::from_str(json)?)
}

/// Turn a suggestion into a draft the store can create: status todo, due
/// today, no subtasks yet.
pub fn draft_from_suggestion(
    suggestion: SuggestedTask,
    today: NaiveDate,
    default_category: &str,
) -> TaskDraft {
    TaskDraft {
        title: suggestion
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| "New task".to_string()),
        description: suggestion.description.unwrap_or_default(),
        priority: suggestion.priority.unwrap_or(Priority::Medium),
        status: Status::Todo,
        due_date: today,
        category: suggestion
            .category
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| default_category.to_string()),
        subtasks: Vec::new(),
    }
}

/// Fresh unchecked subtasks from decomposition titles, in reply order.
pub fn subtasks_from_titles(titles: Vec<String>) -> Vec<SubTask> {
    titles
        .into_iter()
        .filter(|t| !t.trim().is_empty())
        .map(|title| SubTask {
            id: Uuid::new_v4().to_string(),
            title,
            completed: false,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
