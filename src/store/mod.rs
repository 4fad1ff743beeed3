use chrono::{Local, NaiveDate};
use uuid::Uuid;

use crate::io::storage::{Storage, StorageError};
use crate::model::history::{HistoryAction, HistoryEntry, HistoryLog};
use crate::model::notification::AppNotification;
use crate::model::task::{Status, Task, TaskDraft};
use crate::ops::notify::NotificationCenter;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// `update` was called with an id not in the collection. This is a
    /// caller bug (a stale draft), surfaced explicitly rather than silently
    /// dropping the intended update.
    #[error("unknown task id: {0}")]
    UnknownTask(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The single source of truth for the task collection, with its persistence
/// binding and the side logs derived from it.
///
/// Lifecycle: [`TaskStore::open`] loads the persisted snapshot, then every
/// mutating operation persists the full collection synchronously
/// (write-through), re-runs the overdue scan, and appends to the history
/// log where the operation calls for it. Operations either complete fully
/// or leave state exactly as it was.
///
/// At most one logical actor mutates the store; there is no locking.
pub struct TaskStore {
    tasks: Vec<Task>,
    history: HistoryLog,
    notifications: NotificationCenter,
    /// One-shot sync undo snapshot. Held from a sync confirm until it is
    /// used, overwritten by a later sync, or invalidated by any other
    /// task mutation.
    pending_undo: Option<Vec<Task>>,
    storage: Storage,
}

impl TaskStore {
    /// Load all persisted collections from the given storage.
    pub fn open(storage: Storage) -> Result<TaskStore, StoreError> {
        let tasks = storage.load_tasks()?;
        let history = HistoryLog::from_entries(storage.load_history()?);
        let notifications = NotificationCenter::from_notifications(storage.load_notifications()?);
        let pending_undo = storage.load_sync_undo()?;
        Ok(TaskStore {
            tasks,
            history,
            notifications,
            pending_undo,
            storage,
        })
    }

    // --- Read access ---

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn find(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        self.history.entries()
    }

    pub fn notifications(&self) -> &[AppNotification] {
        self.notifications.notifications()
    }

    pub fn has_pending_undo(&self) -> bool {
        self.pending_undo.is_some()
    }

    // --- Task mutations ---

    /// Create a task from a draft: assigns a fresh id and prepends it
    /// (newest first is the display convention).
    pub fn create(&mut self, draft: TaskDraft) -> Result<Task, StoreError> {
        let task = draft.into_task(Uuid::new_v4().to_string());
        self.tasks.insert(0, task.clone());
        self.history.record(&task, HistoryAction::Create, None);
        self.commit()?;
        Ok(task)
    }

    /// Replace the task with the matching id. An unknown id is an explicit
    /// error — it means the caller's draft is out of sync with the store.
    pub fn update(&mut self, task: Task) -> Result<(), StoreError> {
        let slot = self
            .tasks
            .iter_mut()
            .find(|t| t.id == task.id)
            .ok_or_else(|| StoreError::UnknownTask(task.id.clone()))?;
        let old_status = slot.status;
        *slot = task.clone();

        if task.status != old_status {
            let action = if task.status == Status::Done {
                HistoryAction::Complete
            } else {
                HistoryAction::StatusChange
            };
            self.history
                .record(&task, action, Some(format!("{} → {}", old_status, task.status)));
        }
        self.commit()?;
        Ok(())
    }

    /// Remove the task with that id. Idempotent: a second call on an
    /// already-removed id is a silent no-op.
    pub fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let Some(pos) = self.tasks.iter().position(|t| t.id == id) else {
            return Ok(());
        };
        let removed = self.tasks.remove(pos);
        self.history.record(&removed, HistoryAction::Delete, None);
        self.commit()?;
        Ok(())
    }

    /// Advance status along todo → in_progress → done → todo. Missing id is
    /// a no-op. Returns the new status when the task was found.
    pub fn cycle_status(&mut self, id: &str) -> Result<Option<Status>, StoreError> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        let old = task.status;
        task.status = old.next();
        let new = task.status;
        let snapshot = task.clone();

        let action = if new == Status::Done {
            HistoryAction::Complete
        } else {
            HistoryAction::StatusChange
        };
        self.history
            .record(&snapshot, action, Some(format!("{} → {}", old, new)));
        self.commit()?;
        Ok(Some(new))
    }

    /// Flip `completed` on the matching subtask. Missing task or subtask id
    /// is a no-op. Returns whether a subtask was toggled.
    pub fn toggle_subtask(&mut self, task_id: &str, subtask_id: &str) -> Result<bool, StoreError> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) else {
            return Ok(false);
        };
        let Some(sub) = task.subtasks.iter_mut().find(|s| s.id == subtask_id) else {
            return Ok(false);
        };
        sub.completed = !sub.completed;
        self.commit()?;
        Ok(true)
    }

    // --- Notifications and history ---

    /// Mark one notification read. Missing id is a no-op.
    pub fn mark_notification_read(&mut self, id: &str) -> Result<bool, StoreError> {
        let found = self.notifications.mark_read(id);
        if found {
            self.storage
                .save_notifications(self.notifications.notifications())?;
        }
        Ok(found)
    }

    pub fn clear_notifications(&mut self) -> Result<(), StoreError> {
        self.notifications.clear_all();
        self.storage
            .save_notifications(self.notifications.notifications())?;
        Ok(())
    }

    pub fn clear_history(&mut self) -> Result<(), StoreError> {
        self.history.clear();
        self.storage.save_history(self.history.entries())?;
        Ok(())
    }

    // --- Sync support ---

    /// Swap in a reconciled collection, holding the previous one as the
    /// one-shot undo snapshot. A second sync before undo overwrites the
    /// snapshot, making the earlier undo permanently unavailable.
    pub(crate) fn apply_sync(&mut self, next: Vec<Task>) -> Result<(), StoreError> {
        let snapshot = std::mem::replace(&mut self.tasks, next);
        self.pending_undo = Some(snapshot);
        self.scan_and_persist()?;
        Ok(())
    }

    /// Restore the pre-sync snapshot, if one is held. Single-use; safe to
    /// call speculatively — with no snapshot it is a no-op returning false.
    pub fn undo_sync(&mut self) -> Result<bool, StoreError> {
        let Some(snapshot) = self.pending_undo.take() else {
            return Ok(false);
        };
        self.tasks = snapshot;
        self.scan_and_persist()?;
        Ok(true)
    }

    // --- Persistence ---

    /// Write-through after a plain task mutation. Any such mutation also
    /// invalidates the pending sync undo.
    fn commit(&mut self) -> Result<(), StoreError> {
        self.pending_undo = None;
        self.scan_and_persist()
    }

    fn scan_and_persist(&mut self) -> Result<(), StoreError> {
        self.notifications.scan_overdue(&self.tasks, today());
        self.storage.save_tasks(&self.tasks)?;
        self.storage.save_history(self.history.entries())?;
        self.storage
            .save_notifications(self.notifications.notifications())?;
        self.storage.save_sync_undo(self.pending_undo.as_deref())?;
        Ok(())
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
