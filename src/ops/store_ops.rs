//! Local store operations: pure transformations of the `AppState` snapshot.
//!
//! Operations that target a task by id are total — an unknown id is a no-op,
//! reported through the `bool` return rather than an error. Derived queries
//! (`filtered_tasks`, `count_completed`) recompute from the current snapshot
//! on every call and are never cached.

use crate::model::state::{AppState, EditState};
use crate::model::task::{Filter, Task};

// ---------------------------------------------------------------------------
// Input buffer
// ---------------------------------------------------------------------------

/// Replace the input buffer verbatim. No validation.
pub fn set_input_text(state: &mut AppState, text: impl Into<String>) {
    state.input_text = text.into();
}

/// Commit the input buffer as a new task.
///
/// If the trimmed input is non-empty, appends a fresh incomplete task and
/// clears the buffer, returning the new id. Whitespace-only input is a
/// no-op returning `None`.
pub fn add_task(state: &mut AppState) -> Option<String> {
    if state.input_text.trim().is_empty() {
        return None;
    }
    let task = Task::new(state.input_text.clone());
    let id = task.id.clone();
    state.tasks.push(task);
    state.input_text.clear();
    Some(id)
}

// ---------------------------------------------------------------------------
// Single-task operations
// ---------------------------------------------------------------------------

/// Remove the task with the given id. Returns whether anything was removed.
pub fn delete_task(state: &mut AppState, id: &str) -> bool {
    let before = state.tasks.len();
    state.tasks.retain(|t| t.id != id);
    state.tasks.len() != before
}

/// Flip the completion flag on the task with the given id.
pub fn toggle_complete(state: &mut AppState, id: &str) -> bool {
    match state.task_mut(id) {
        Some(task) => {
            task.completed = !task.completed;
            true
        }
        None => false,
    }
}

/// Replace the text of the task with the given id.
///
/// Unlike `add_task`, this accepts empty text: the original UI let an edit
/// blank a task out while the add path validated. Kept as-is.
pub fn edit_task(state: &mut AppState, id: &str, new_text: &str) -> bool {
    match state.task_mut(id) {
        Some(task) => {
            task.text = new_text.to_string();
            true
        }
        None => false,
    }
}

/// Set the active filter.
pub fn set_filter(state: &mut AppState, filter: Filter) {
    state.filter = filter;
}

// ---------------------------------------------------------------------------
// Bulk operations (local variants)
// ---------------------------------------------------------------------------

/// Mark every task completed.
pub fn mark_all_complete(state: &mut AppState) {
    for task in &mut state.tasks {
        task.completed = true;
    }
}

/// Remove every completed task.
pub fn delete_completed(state: &mut AppState) {
    state.tasks.retain(|t| !t.completed);
}

// ---------------------------------------------------------------------------
// Derived queries
// ---------------------------------------------------------------------------

/// Tasks visible under the active filter, in insertion order.
pub fn filtered_tasks(state: &AppState) -> Vec<&Task> {
    state
        .tasks
        .iter()
        .filter(|t| state.filter.matches(t))
        .collect()
}

/// Number of completed tasks.
pub fn count_completed(state: &AppState) -> usize {
    state.tasks.iter().filter(|t| t.completed).count()
}

// ---------------------------------------------------------------------------
// Inline edit
// ---------------------------------------------------------------------------

/// Enter edit mode for the given task, seeding the draft with its current
/// text. Replaces any edit already in progress. No-op if the id is unknown.
pub fn begin_edit(state: &mut AppState, id: &str) -> bool {
    match state.task(id) {
        Some(task) => {
            state.edit = Some(EditState {
                id: task.id.clone(),
                draft: task.text.clone(),
            });
            true
        }
        None => false,
    }
}

/// Replace the draft text. No-op when no edit is in progress.
pub fn update_draft(state: &mut AppState, text: impl Into<String>) {
    if let Some(edit) = &mut state.edit {
        edit.draft = text.into();
    }
}

/// Apply the draft to the target task and leave edit mode.
/// Returns the edited task's id, or `None` when no edit was in progress.
pub fn save_edit(state: &mut AppState) -> Option<String> {
    let edit = state.edit.take()?;
    edit_task(state, &edit.id, &edit.draft);
    Some(edit.id)
}

/// Leave edit mode, discarding the draft. The task is untouched.
pub fn cancel_edit(state: &mut AppState) {
    state.edit = None;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
