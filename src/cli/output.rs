use serde::Serialize;

use crate::model::state::AppState;
use crate::model::task::{Filter, Task};
use crate::ops::store_ops;
use crate::ops::sync_ops::BulkReport;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ListJson<'a> {
    pub filter: &'static str,
    pub completed: usize,
    pub total: usize,
    pub tasks: Vec<&'a Task>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_text: Option<&'a str>,
}

#[derive(Serialize)]
pub struct ReportJson<'a> {
    pub applied: &'a [String],
    pub failed: Vec<FailedItemJson<'a>>,
}

#[derive(Serialize)]
pub struct FailedItemJson<'a> {
    pub id: &'a str,
    pub error: String,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn list_to_json(state: &AppState, filter: Filter) -> ListJson<'_> {
    ListJson {
        filter: filter.as_str(),
        completed: store_ops::count_completed(state),
        total: state.tasks.len(),
        tasks: state.tasks.iter().filter(|t| filter.matches(t)).collect(),
        input_text: (!state.input_text.is_empty()).then_some(state.input_text.as_str()),
    }
}

pub fn report_to_json<'a>(report: &'a BulkReport) -> ReportJson<'a> {
    ReportJson {
        applied: &report.applied,
        failed: report
            .failed
            .iter()
            .map(|(id, e)| FailedItemJson {
                id,
                error: e.to_string(),
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Text rendering
// ---------------------------------------------------------------------------

/// Short display form of a task id (the first UUID group).
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

/// Render the task list under the given filter plus a status line.
pub fn print_list_text(state: &AppState, filter: Filter) {
    for task in state.tasks.iter().filter(|t| filter.matches(t)) {
        let mark = if task.completed { 'x' } else { ' ' };
        println!("[{}] {}  {}", mark, short_id(&task.id), task.text);
    }

    let total = state.tasks.len();
    if total == 0 {
        println!("nothing to do yet");
    } else {
        println!(
            "{} of {} {} completed",
            store_ops::count_completed(state),
            total,
            if total == 1 { "task" } else { "tasks" }
        );
    }
    if !state.input_text.is_empty() {
        println!("staged: {}", state.input_text);
    }
}

/// Render a bulk operation's per-item outcome.
pub fn print_report_text(verb: &str, report: &BulkReport) {
    println!("{} {} task(s)", verb, report.applied.len());
    for (id, error) in &report.failed {
        println!("failed {}: {}", short_id(id), error);
    }
}
