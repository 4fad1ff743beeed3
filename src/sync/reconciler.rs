use indexmap::IndexSet;
use serde::Serialize;

use crate::model::task::Task;
use crate::store::{StoreError, TaskStore};

/// How a confirmed candidate list is applied to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncMode {
    /// Overlay incoming tasks onto existing ones by id; everything not
    /// selected or not matched is left exactly where it was.
    Merge,
    /// Discard all existing tasks and substitute the incoming selection.
    Replace,
}

impl std::fmt::Display for SyncMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncMode::Merge => f.write_str("merge"),
            SyncMode::Replace => f.write_str("replace"),
        }
    }
}

/// Preview label for a candidate task: does its id already exist locally?
/// Display-only; it never changes what confirm does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    New,
    Updated,
}

/// User-visible result of a confirmed sync
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SyncSummary {
    pub added: usize,
    pub updated: usize,
    pub mode: SyncMode,
}

/// One sync attempt in the Previewing state: an externally-sourced
/// candidate list plus the per-task inclusion selection.
///
/// The flow is preview → (adjust selection) → confirm or drop. Confirming
/// snapshots the pre-sync collection into the store for a one-level undo;
/// cancelling is simply dropping the preview.
#[derive(Debug, Clone)]
pub struct SyncPreview {
    candidates: Vec<Task>,
    /// Ids included on confirm. Defaults to all, in candidate order.
    selection: IndexSet<String>,
}

impl SyncPreview {
    pub fn new(candidates: Vec<Task>) -> SyncPreview {
        let selection = candidates.iter().map(|t| t.id.clone()).collect();
        SyncPreview {
            candidates,
            selection,
        }
    }

    pub fn candidates(&self) -> &[Task] {
        &self.candidates
    }

    /// Label each candidate against the store's current contents.
    pub fn classify<'a>(&'a self, store: &TaskStore) -> Vec<(&'a Task, Classification)> {
        self.candidates
            .iter()
            .map(|t| {
                let class = if store.contains(&t.id) {
                    Classification::Updated
                } else {
                    Classification::New
                };
                (t, class)
            })
            .collect()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.contains(id)
    }

    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    /// Exclude a candidate from the confirm. Unknown ids are ignored.
    pub fn deselect(&mut self, id: &str) -> bool {
        self.selection.shift_remove(id)
    }

    /// Re-include a previously deselected candidate. Only ids present in
    /// the candidate list are accepted.
    pub fn select(&mut self, id: &str) -> bool {
        if self.candidates.iter().any(|t| t.id == id) {
            self.selection.insert(id.to_string())
        } else {
            false
        }
    }

    /// Apply the selected candidates to the store under the given mode.
    ///
    /// Captures the pre-sync collection as the store's one-shot undo
    /// snapshot before mutating; a second sync before undo overwrites that
    /// snapshot for good.
    pub fn confirm(self, store: &mut TaskStore, mode: SyncMode) -> Result<SyncSummary, StoreError> {
        let selected: Vec<Task> = self
            .candidates
            .into_iter()
            .filter(|t| self.selection.contains(&t.id))
            .collect();

        let (next, added, updated) = reconcile(store.tasks(), selected, mode);
        store.apply_sync(next)?;
        Ok(SyncSummary {
            added,
            updated,
            mode,
        })
    }
}

/// Pure reconciliation: compute the next collection from the current one
/// and the selected candidates, in the order given.
///
/// Replace: the next collection is exactly the selection. Merge: a matched
/// id overwrites in place so existing ordering is not disturbed; an
/// unmatched task is inserted at the front, where fresh items surface.
fn reconcile(current: &[Task], selected: Vec<Task>, mode: SyncMode) -> (Vec<Task>, usize, usize) {
    match mode {
        SyncMode::Replace => {
            let added = selected.len();
            (selected, added, 0)
        }
        SyncMode::Merge => {
            let mut next = current.to_vec();
            let mut added = 0;
            let mut updated = 0;
            for task in selected {
                match next.iter_mut().find(|t| t.id == task.id) {
                    Some(slot) => {
                        *slot = task;
                        updated += 1;
                    }
                    None => {
                        next.insert(0, task);
                        added += 1;
                    }
                }
            }
            (next, added, updated)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
