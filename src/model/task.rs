use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single to-do item.
///
/// Field names are the wire format of the remote task service — do not
/// rename without versioning the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique, stable identifier (UUID v4)
    pub id: String,
    /// Display text
    pub text: String,
    /// Completion flag
    pub completed: bool,
}

impl Task {
    /// Create a new incomplete task with a freshly generated id.
    ///
    /// Ids are random rather than sequential: a length-derived counter can
    /// collide with a surviving task after deletions.
    pub fn new(text: String) -> Self {
        Task {
            id: Uuid::new_v4().to_string(),
            text,
            completed: false,
        }
    }
}

/// View predicate over the task list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Completed,
    Incomplete,
}

impl Filter {
    /// The string form used in the CLI and the state file
    pub fn as_str(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Completed => "completed",
            Filter::Incomplete => "incomplete",
        }
    }

    /// Parse a filter name into a filter
    pub fn parse(s: &str) -> Option<Filter> {
        match s {
            "all" => Some(Filter::All),
            "completed" => Some(Filter::Completed),
            "incomplete" => Some(Filter::Incomplete),
            _ => None,
        }
    }

    /// Whether a task is visible under this filter
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Completed => task.completed,
            Filter::Incomplete => !task.completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_task_is_incomplete_with_unique_id() {
        let a = Task::new("one".into());
        let b = Task::new("two".into());
        assert!(!a.completed);
        assert!(!b.completed);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn task_wire_format_field_names() {
        let task = Task {
            id: "abc".into(),
            text: "buy milk".into(),
            completed: true,
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "abc", "text": "buy milk", "completed": true})
        );
    }

    #[test]
    fn filter_parse_round_trip() {
        for f in [Filter::All, Filter::Completed, Filter::Incomplete] {
            assert_eq!(Filter::parse(f.as_str()), Some(f));
        }
        assert_eq!(Filter::parse("done"), None);
        assert_eq!(Filter::parse(""), None);
    }

    #[test]
    fn filter_matches() {
        let open = Task::new("open".into());
        let mut done = Task::new("done".into());
        done.completed = true;

        assert!(Filter::All.matches(&open));
        assert!(Filter::All.matches(&done));
        assert!(Filter::Completed.matches(&done));
        assert!(!Filter::Completed.matches(&open));
        assert!(Filter::Incomplete.matches(&open));
        assert!(!Filter::Incomplete.matches(&done));
    }
}
