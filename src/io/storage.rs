use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::model::history::HistoryEntry;
use crate::model::notification::AppNotification;
use crate::model::task::Task;

const TASKS_FILE: &str = "tasks.json";
const HISTORY_FILE: &str = "history.json";
const NOTIFICATIONS_FILE: &str = "notifications.json";
const SYNC_UNDO_FILE: &str = "sync_undo.json";

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// File-backed persistence for the task collection and its side logs.
/// Each collection is an independent keyed blob (a JSON file in the data
/// directory); the tasks blob is the exact JSON array of Task records, with
/// no wrapper envelope.
#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    /// Open (and create if needed) the data directory.
    pub fn open(dir: &Path) -> Result<Storage, StorageError> {
        fs::create_dir_all(dir)?;
        Ok(Storage {
            dir: dir.to_path_buf(),
        })
    }

    // --- Tasks ---

    pub fn load_tasks(&self) -> Result<Vec<Task>, StorageError> {
        Ok(self.read_json(TASKS_FILE)?.unwrap_or_default())
    }

    pub fn save_tasks(&self, tasks: &[Task]) -> Result<(), StorageError> {
        self.write_json(TASKS_FILE, &tasks)
    }

    // --- History ---

    pub fn load_history(&self) -> Result<Vec<HistoryEntry>, StorageError> {
        Ok(self.read_json(HISTORY_FILE)?.unwrap_or_default())
    }

    pub fn save_history(&self, entries: &[HistoryEntry]) -> Result<(), StorageError> {
        self.write_json(HISTORY_FILE, &entries)
    }

    // --- Notifications ---

    pub fn load_notifications(&self) -> Result<Vec<AppNotification>, StorageError> {
        Ok(self.read_json(NOTIFICATIONS_FILE)?.unwrap_or_default())
    }

    pub fn save_notifications(&self, items: &[AppNotification]) -> Result<(), StorageError> {
        self.write_json(NOTIFICATIONS_FILE, &items)
    }

    // --- Sync undo snapshot ---

    /// The pending one-shot sync snapshot. File absent ⇔ no snapshot held.
    pub fn load_sync_undo(&self) -> Result<Option<Vec<Task>>, StorageError> {
        self.read_json(SYNC_UNDO_FILE)
    }

    pub fn save_sync_undo(&self, snapshot: Option<&[Task]>) -> Result<(), StorageError> {
        match snapshot {
            Some(tasks) => self.write_json(SYNC_UNDO_FILE, &tasks),
            None => {
                let path = self.dir.join(SYNC_UNDO_FILE);
                if path.exists() {
                    fs::remove_file(&path).map_err(|e| StorageError::Write { path, source: e })?;
                }
                Ok(())
            }
        }
    }

    // --- Blob helpers ---

    fn read_json<T: DeserializeOwned>(&self, file: &str) -> Result<Option<T>, StorageError> {
        let path = self.dir.join(file);
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&path).map_err(|e| StorageError::Read {
            path: path.clone(),
            source: e,
        })?;
        let value = serde_json::from_str(&text).map_err(|e| StorageError::Parse {
            path: path.clone(),
            source: e,
        })?;
        Ok(Some(value))
    }

    fn write_json<T: Serialize>(&self, file: &str, value: &T) -> Result<(), StorageError> {
        let path = self.dir.join(file);
        let content = serde_json::to_string_pretty(value).map_err(|e| StorageError::Parse {
            path: path.clone(),
            source: e,
        })?;
        atomic_write(&path, content.as_bytes()).map_err(|e| StorageError::Write {
            path,
            source: e,
        })
    }
}

/// Write a file atomically via a temp file in the same directory.
fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::{Priority, Status};
    use tempfile::TempDir;

    fn sample_task(id: &str) -> Task {
        Task {
            id: id.into(),
            title: "Task".into(),
            description: String::new(),
            priority: Priority::Low,
            status: Status::Todo,
            due_date: "2024-01-01".parse().unwrap(),
            category: "Work".into(),
            subtasks: Vec::new(),
        }
    }

    #[test]
    fn missing_files_load_as_empty() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        assert!(storage.load_tasks().unwrap().is_empty());
        assert!(storage.load_history().unwrap().is_empty());
        assert!(storage.load_notifications().unwrap().is_empty());
        assert!(storage.load_sync_undo().unwrap().is_none());
    }

    #[test]
    fn tasks_round_trip() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        let tasks = vec![sample_task("a"), sample_task("b")];
        storage.save_tasks(&tasks).unwrap();
        assert_eq!(storage.load_tasks().unwrap(), tasks);
    }

    #[test]
    fn tasks_blob_is_a_bare_array() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        storage.save_tasks(&[sample_task("a")]).unwrap();
        let text = fs::read_to_string(dir.path().join("tasks.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(value.is_array());
    }

    #[test]
    fn malformed_blob_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        fs::write(dir.path().join("tasks.json"), "not json {{{").unwrap();
        assert!(matches!(
            storage.load_tasks(),
            Err(StorageError::Parse { .. })
        ));
    }

    #[test]
    fn sync_undo_none_removes_file() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        storage.save_sync_undo(Some(&[sample_task("a")])).unwrap();
        assert!(dir.path().join("sync_undo.json").exists());
        assert_eq!(storage.load_sync_undo().unwrap().unwrap().len(), 1);

        storage.save_sync_undo(None).unwrap();
        assert!(!dir.path().join("sync_undo.json").exists());
        assert!(storage.load_sync_undo().unwrap().is_none());
    }

    #[test]
    fn open_creates_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("deep/data");
        Storage::open(&nested).unwrap();
        assert!(nested.is_dir());
    }
}
