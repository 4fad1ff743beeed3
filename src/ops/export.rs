use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::model::task::Task;

/// Error type for export/import file operations
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{path} is not a task list: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Name of the export file for a given day
pub fn export_file_name(date: NaiveDate) -> String {
    format!("tasks-export-{}.json", date)
}

/// Write the exact task array to `<dir>/tasks-export-<date>.json`.
/// The file is re-importable as a sync candidate list.
pub fn export_tasks(dir: &Path, tasks: &[Task], date: NaiveDate) -> Result<PathBuf, ExportError> {
    let path = dir.join(export_file_name(date));
    let content = serde_json::to_string_pretty(&tasks).map_err(|e| ExportError::Parse {
        path: path.clone(),
        source: e,
    })?;
    fs::write(&path, content).map_err(|e| ExportError::Write {
        path: path.clone(),
        source: e,
    })?;
    Ok(path)
}

/// Read an exported file back as a sync candidate list, with the same
/// shape validation as the sync code payload.
pub fn read_candidates(path: &Path) -> Result<Vec<Task>, ExportError> {
    let text = fs::read_to_string(path).map_err(|e| ExportError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&text).map_err(|e| ExportError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
