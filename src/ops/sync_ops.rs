//! Remote-backed store operations.
//!
//! Each operation round-trips through the task service and applies the local
//! mutation only after the service confirms it. Failures never propagate past
//! the store boundary: they are recorded on `state.last_error` as a
//! [`SyncError`] tagging the failed operation, and any subsequent successful
//! operation clears it.
//!
//! Bulk operations are best-effort with per-item result reporting: every item
//! is attempted, local state is updated for exactly the items whose remote
//! call succeeded, and the [`BulkReport`] carries the rest.

use futures::future;
use tracing::{debug, warn};

use crate::model::state::AppState;
use crate::model::task::Task;
use crate::ops::store_ops;
use crate::remote::client::{RemoteClient, RemoteError};

/// Which store operation a remote failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOp {
    Fetch,
    Add,
    Edit,
    Toggle,
    Delete,
    CompleteAll,
    ClearCompleted,
}

impl SyncOp {
    /// The fixed user-facing message for a failure of this operation
    pub fn message(self) -> &'static str {
        match self {
            SyncOp::Fetch => "could not load tasks",
            SyncOp::Add => "could not add task",
            SyncOp::Edit => "could not edit task",
            SyncOp::Toggle => "could not update task",
            SyncOp::Delete => "could not delete task",
            SyncOp::CompleteAll => "could not complete all tasks",
            SyncOp::ClearCompleted => "could not clear completed tasks",
        }
    }
}

/// A remote failure tagged with the operation it aborted.
///
/// Display text is fixed per operation; the underlying cause (absent for
/// bulk operations, which report per item) is kept for logs and `--json`.
#[derive(Debug, thiserror::Error)]
#[error("{}", .op.message())]
pub struct SyncError {
    pub op: SyncOp,
    #[source]
    pub source: Option<RemoteError>,
}

impl SyncError {
    fn new(op: SyncOp, source: RemoteError) -> Self {
        SyncError {
            op,
            source: Some(source),
        }
    }

    /// The fixed user-facing message for the failed operation
    pub fn message(&self) -> &'static str {
        self.op.message()
    }
}

/// Per-item outcome of a bulk operation
#[derive(Debug, Default)]
pub struct BulkReport {
    /// Ids whose remote call succeeded and whose local state was updated
    pub applied: Vec<String>,
    /// Ids whose remote call failed, with the cause; local state untouched
    pub failed: Vec<(String, RemoteError)>,
}

impl BulkReport {
    /// Whether every attempted item succeeded
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Single operations
// ---------------------------------------------------------------------------

/// Replace the task list with the service's, setting `loading` for the
/// call's duration. On failure the prior task list is left untouched.
pub async fn fetch_all(state: &mut AppState, client: &RemoteClient) -> bool {
    state.loading = true;
    let result = client.fetch_tasks().await;
    state.loading = false;

    match result {
        Ok(tasks) => {
            debug!(count = tasks.len(), "fetched tasks");
            state.tasks = tasks;
            state.last_error = None;
            true
        }
        Err(e) => {
            warn!(error = %e, "fetch failed");
            state.last_error = Some(SyncError::new(SyncOp::Fetch, e));
            false
        }
    }
}

/// Commit the input buffer through the service. Same whitespace gate as the
/// local op; the service-assigned task (id included) is what gets appended,
/// and the input clears only on success.
pub async fn add_task(state: &mut AppState, client: &RemoteClient) -> Option<String> {
    if state.input_text.trim().is_empty() {
        return None;
    }
    match client.create_task(&state.input_text).await {
        Ok(task) => {
            let id = task.id.clone();
            state.tasks.push(task);
            state.input_text.clear();
            state.last_error = None;
            Some(id)
        }
        Err(e) => {
            warn!(error = %e, "add failed");
            state.last_error = Some(SyncError::new(SyncOp::Add, e));
            None
        }
    }
}

/// Replace a task's text through the service. Unknown local id: no remote
/// call, no-op.
pub async fn edit_task(state: &mut AppState, client: &RemoteClient, id: &str, text: &str) -> bool {
    if state.task(id).is_none() {
        return false;
    }
    match client.update_text(id, text).await {
        Ok(updated) => {
            apply_remote(state, updated);
            state.last_error = None;
            true
        }
        Err(e) => {
            warn!(id, error = %e, "edit failed");
            state.last_error = Some(SyncError::new(SyncOp::Edit, e));
            false
        }
    }
}

/// Flip a task's completion flag through the service, targeting the
/// `complete`/`incomplete` endpoint based on the current local flag.
pub async fn toggle_complete(state: &mut AppState, client: &RemoteClient, id: &str) -> bool {
    let Some(task) = state.task(id) else {
        return false;
    };
    match client.set_completed(id, !task.completed).await {
        Ok(updated) => {
            apply_remote(state, updated);
            state.last_error = None;
            true
        }
        Err(e) => {
            warn!(id, error = %e, "toggle failed");
            state.last_error = Some(SyncError::new(SyncOp::Toggle, e));
            false
        }
    }
}

/// Delete a task through the service, removing it locally on success.
pub async fn delete_task(state: &mut AppState, client: &RemoteClient, id: &str) -> bool {
    if state.task(id).is_none() {
        return false;
    }
    match client.delete_task(id).await {
        Ok(()) => {
            store_ops::delete_task(state, id);
            state.last_error = None;
            true
        }
        Err(e) => {
            warn!(id, error = %e, "delete failed");
            state.last_error = Some(SyncError::new(SyncOp::Delete, e));
            false
        }
    }
}

// ---------------------------------------------------------------------------
// Bulk operations
// ---------------------------------------------------------------------------

/// Mark every incomplete task completed, one sequential call per task,
/// continuing past failures.
pub async fn complete_all(state: &mut AppState, client: &RemoteClient) -> BulkReport {
    let pending: Vec<String> = state
        .tasks
        .iter()
        .filter(|t| !t.completed)
        .map(|t| t.id.clone())
        .collect();

    let mut report = BulkReport::default();
    for id in pending {
        match client.set_completed(&id, true).await {
            Ok(updated) => {
                apply_remote(state, updated);
                report.applied.push(id);
            }
            Err(e) => {
                warn!(id = %id, error = %e, "complete failed");
                report.failed.push((id, e));
            }
        }
    }

    finish_bulk(state, SyncOp::CompleteAll, &report);
    report
}

/// Delete every completed task, one call per task issued concurrently.
/// Locally removes exactly the tasks the service confirmed deleted.
pub async fn delete_completed(state: &mut AppState, client: &RemoteClient) -> BulkReport {
    let completed: Vec<String> = state
        .tasks
        .iter()
        .filter(|t| t.completed)
        .map(|t| t.id.clone())
        .collect();

    let results = future::join_all(completed.into_iter().map(|id| async move {
        let result = client.delete_task(&id).await;
        (id, result)
    }))
    .await;

    let mut report = BulkReport::default();
    for (id, result) in results {
        match result {
            Ok(()) => report.applied.push(id),
            Err(e) => {
                warn!(id = %id, error = %e, "delete failed");
                report.failed.push((id, e));
            }
        }
    }

    state.tasks.retain(|t| !report.applied.contains(&t.id));
    finish_bulk(state, SyncOp::ClearCompleted, &report);
    report
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Overwrite the local copy of a task with the service's version.
fn apply_remote(state: &mut AppState, updated: Task) {
    if let Some(task) = state.task_mut(&updated.id) {
        *task = updated;
    }
}

fn finish_bulk(state: &mut AppState, op: SyncOp, report: &BulkReport) {
    if report.is_complete() {
        state.last_error = None;
    } else {
        // Per-item causes live in the report; the state keeps only the tag.
        state.last_error = Some(SyncError { op, source: None });
    }
}
