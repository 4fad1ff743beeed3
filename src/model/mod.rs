pub mod config;
pub mod history;
pub mod notification;
pub mod task;

pub use config::AppConfig;
pub use history::{HistoryAction, HistoryEntry, HistoryLog};
pub use notification::{AppNotification, NotificationKind};
pub use task::{Priority, Status, SubTask, Task, TaskDraft};
