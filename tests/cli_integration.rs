//! Integration tests for the `td` CLI.
//!
//! Each test creates a temp directory, runs `td` as a subprocess against it
//! via `-C`, and verifies stdout and/or the state file.

use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Get the path to the built `td` binary.
fn td_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("td");
    path
}

fn run_td(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(td_bin())
        .arg("-C")
        .arg(dir.path())
        .args(args)
        .output()
        .expect("failed to run td")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn init_project(dir: &TempDir) {
    let output = run_td(dir, &["init"]);
    assert!(output.status.success(), "init failed: {:?}", output);
}

/// Parse `td list --json` and return the tasks array.
fn list_json(dir: &TempDir) -> serde_json::Value {
    let output = run_td(dir, &["list", "--json"]);
    assert!(output.status.success());
    serde_json::from_str(&stdout(&output)).unwrap()
}

// ---------------------------------------------------------------------------
// Init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_data_dir() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    let data_dir = dir.path().join(".tido");
    assert!(data_dir.join("state.json").exists());
    assert!(data_dir.join("config.toml").exists());
}

#[test]
fn init_twice_fails() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    let output = run_td(&dir, &["init"]);
    assert!(!output.status.success());
}

#[test]
fn commands_without_init_fail_with_hint() {
    let dir = TempDir::new().unwrap();
    let output = run_td(&dir, &["list"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("td init"), "stderr was: {}", stderr);
}

// ---------------------------------------------------------------------------
// Add / list
// ---------------------------------------------------------------------------

#[test]
fn add_and_list() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    let output = run_td(&dir, &["add", "buy milk"]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("added "));

    let output = run_td(&dir, &["list"]);
    let text = stdout(&output);
    assert!(text.contains("buy milk"));
    assert!(text.contains("0 of 1 task completed"));
}

#[test]
fn add_blank_is_a_noop() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    let output = run_td(&dir, &["add", "   "]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("nothing to add"));

    let json = list_json(&dir);
    assert_eq!(json["total"], 0);
}

#[test]
fn input_stages_then_bare_add_commits() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    run_td(&dir, &["input", "staged task"]);
    let output = run_td(&dir, &["list"]);
    assert!(stdout(&output).contains("staged: staged task"));

    let output = run_td(&dir, &["add"]);
    assert!(stdout(&output).starts_with("added "));

    let json = list_json(&dir);
    assert_eq!(json["tasks"][0]["text"], "staged task");
    // Input buffer cleared by the commit
    assert!(json.get("input_text").is_none());
}

#[test]
fn list_json_shape() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    run_td(&dir, &["add", "one"]);

    let json = list_json(&dir);
    assert_eq!(json["filter"], "all");
    assert_eq!(json["total"], 1);
    assert_eq!(json["completed"], 0);
    assert_eq!(json["tasks"][0]["completed"], false);
    assert!(json["tasks"][0]["id"].as_str().unwrap().len() > 8);
}

// ---------------------------------------------------------------------------
// Done / edit / rm
// ---------------------------------------------------------------------------

#[test]
fn done_toggles_completion() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    run_td(&dir, &["add", "task"]);

    let id = list_json(&dir)["tasks"][0]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let output = run_td(&dir, &["done", &id]);
    assert!(stdout(&output).starts_with("done "));
    assert_eq!(list_json(&dir)["tasks"][0]["completed"], true);

    // Toggle back
    let output = run_td(&dir, &["done", &id]);
    assert!(stdout(&output).starts_with("reopened "));
    assert_eq!(list_json(&dir)["tasks"][0]["completed"], false);
}

#[test]
fn done_accepts_unique_id_prefix() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    run_td(&dir, &["add", "task"]);

    let id = list_json(&dir)["tasks"][0]["id"]
        .as_str()
        .unwrap()
        .to_string();
    let output = run_td(&dir, &["done", &id[..8]]);
    assert!(output.status.success());
    assert_eq!(list_json(&dir)["tasks"][0]["completed"], true);
}

#[test]
fn done_unknown_id_is_a_noop() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    run_td(&dir, &["add", "task"]);

    let output = run_td(&dir, &["done", "zzzzzz"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("no task matching"));
    assert_eq!(list_json(&dir)["tasks"][0]["completed"], false);
}

#[test]
fn edit_replaces_text() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    run_td(&dir, &["add", "befor"]);

    let id = list_json(&dir)["tasks"][0]["id"]
        .as_str()
        .unwrap()
        .to_string();
    let output = run_td(&dir, &["edit", &id, "after"]);
    assert!(stdout(&output).starts_with("edited "));
    assert_eq!(list_json(&dir)["tasks"][0]["text"], "after");
}

#[test]
fn rm_deletes_only_the_matching_task() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    run_td(&dir, &["add", "keep"]);
    run_td(&dir, &["add", "drop"]);

    let id = list_json(&dir)["tasks"][1]["id"]
        .as_str()
        .unwrap()
        .to_string();
    let output = run_td(&dir, &["rm", &id]);
    assert!(stdout(&output).starts_with("deleted "));

    let json = list_json(&dir);
    assert_eq!(json["total"], 1);
    assert_eq!(json["tasks"][0]["text"], "keep");
}

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

#[test]
fn filter_persists_across_invocations() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    run_td(&dir, &["add", "open task"]);
    run_td(&dir, &["add", "done task"]);
    let id = list_json(&dir)["tasks"][1]["id"]
        .as_str()
        .unwrap()
        .to_string();
    run_td(&dir, &["done", &id]);

    let output = run_td(&dir, &["filter", "completed"]);
    assert!(output.status.success());

    let json = list_json(&dir);
    assert_eq!(json["filter"], "completed");
    assert_eq!(json["tasks"].as_array().unwrap().len(), 1);
    assert_eq!(json["tasks"][0]["text"], "done task");
}

#[test]
fn list_filter_flag_overrides_for_one_invocation() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    run_td(&dir, &["add", "open task"]);

    let output = run_td(&dir, &["list", "--filter", "incomplete", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["filter"], "incomplete");

    // The persisted filter is unchanged
    assert_eq!(list_json(&dir)["filter"], "all");
}

#[test]
fn unknown_filter_fails() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    let output = run_td(&dir, &["filter", "bogus"]);
    assert!(!output.status.success());
}

// ---------------------------------------------------------------------------
// Bulk
// ---------------------------------------------------------------------------

#[test]
fn done_all_marks_everything() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    run_td(&dir, &["add", "a"]);
    run_td(&dir, &["add", "b"]);

    let output = run_td(&dir, &["done-all"]);
    assert!(output.status.success());

    let json = list_json(&dir);
    assert_eq!(json["completed"], 2);
}

#[test]
fn clear_removes_only_completed() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    run_td(&dir, &["add", "keep"]);
    run_td(&dir, &["add", "drop"]);
    let id = list_json(&dir)["tasks"][1]["id"]
        .as_str()
        .unwrap()
        .to_string();
    run_td(&dir, &["done", &id]);

    let output = run_td(&dir, &["clear"]);
    assert!(stdout(&output).contains("cleared 1"));

    let json = list_json(&dir);
    assert_eq!(json["total"], 1);
    assert_eq!(json["tasks"][0]["text"], "keep");
}

// ---------------------------------------------------------------------------
// Sync
// ---------------------------------------------------------------------------

#[test]
fn sync_without_remote_config_fails() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    let output = run_td(&dir, &["sync"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no [remote] configured"), "stderr: {}", stderr);
}
