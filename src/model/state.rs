use serde::{Deserialize, Serialize};

use crate::model::task::{Filter, Task};
use crate::ops::sync_ops::SyncError;

/// Inline-edit sub-state. At most one task is in edit mode at a time,
/// enforced by `AppState` holding at most one of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditState {
    /// Id of the task being edited
    pub id: String,
    /// Draft text, not applied until the edit is saved
    pub draft: String,
}

/// The single application state snapshot owned by the store.
///
/// All mutation goes through the operations in `ops::store_ops` (local) and
/// `ops::sync_ops` (remote-backed). `last_error` and `loading` are transient
/// and never written to the state file.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AppState {
    /// Tasks in insertion order
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// Current input buffer (staged text for the next add)
    #[serde(default)]
    pub input_text: String,
    /// Active filter
    #[serde(default)]
    pub filter: Filter,
    /// Inline-edit target and draft, if an edit is in progress
    #[serde(default)]
    pub edit: Option<EditState>,
    /// Error recorded by the most recent remote-backed operation
    #[serde(skip)]
    pub last_error: Option<SyncError>,
    /// Whether a fetch is in flight
    #[serde(skip)]
    pub loading: bool,
}

impl AppState {
    /// Find a task by id
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Find a task by id, mutable
    pub fn task_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }
}
