use chrono::{NaiveDate, Utc};

use crate::model::notification::{overdue_id, AppNotification, NotificationKind, NOTIFICATION_CAP};
use crate::model::task::Task;

/// Holds the derived notification collection and the overdue scan that
/// feeds it. Runs after every task mutation; de-duplicates by the
/// deterministic (task, due date) id, so re-scanning is always safe.
#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    notifications: Vec<AppNotification>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        NotificationCenter::default()
    }

    /// Rebuild from a persisted list (newest first), re-applying the cap.
    pub fn from_notifications(mut notifications: Vec<AppNotification>) -> Self {
        notifications.truncate(NOTIFICATION_CAP);
        NotificationCenter { notifications }
    }

    /// Notifications, newest first
    pub fn notifications(&self) -> &[AppNotification] {
        &self.notifications
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.is_read).count()
    }

    /// Scan for tasks past their due date and not done. Each distinct
    /// (task, due date) pair alerts at most once, ever — notifications are
    /// kept as a historical record even after the task completes or is
    /// deleted, until cleared explicitly.
    ///
    /// Returns the number of new notifications added.
    pub fn scan_overdue(&mut self, tasks: &[Task], today: NaiveDate) -> usize {
        let mut added = 0;
        for task in tasks {
            if !task.is_overdue(today) {
                continue;
            }
            let id = overdue_id(&task.id, task.due_date);
            if self.notifications.iter().any(|n| n.id == id) {
                continue;
            }
            self.notifications.insert(
                0,
                AppNotification {
                    id,
                    task_id: task.id.clone(),
                    title: task.title.clone(),
                    message: format!("\"{}\" was due {}", task.title, task.due_date),
                    kind: NotificationKind::Overdue,
                    timestamp: Utc::now(),
                    is_read: false,
                },
            );
            added += 1;
        }
        self.notifications.truncate(NOTIFICATION_CAP);
        added
    }

    /// Mark one notification read. Missing id is a no-op; returns whether a
    /// notification was found.
    pub fn mark_read(&mut self, id: &str) -> bool {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(n) => {
                n.is_read = true;
                true
            }
            None => false,
        }
    }

    pub fn clear_all(&mut self) {
        self.notifications.clear();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
