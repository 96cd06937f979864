//! CLI command handlers: load the snapshot, run store operations, save,
//! render. Remote failures recorded by the sync layer surface here as the
//! process exit status after the (possibly partially updated) state is saved.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::commands::{
    AddArgs, Cli, Commands, EditArgs, FilterArgs, IdArgs, InputArgs, ListArgs,
};
use crate::cli::output;
use crate::io::config_io;
use crate::io::state_io;
use crate::model::state::AppState;
use crate::model::task::Filter;
use crate::ops::{store_ops, sync_ops};
use crate::remote::client::RemoteClient;

/// Name of the data directory created by `td init`
pub const DATA_DIR: &str = ".tido";

const CONFIG_TEMPLATE: &str = "\
# tido configuration
#
# Uncomment to sync against a remote task service:
# [remote]
# base_url = \"http://localhost:8080\"
";

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub async fn dispatch(cli: Cli) -> Result<(), Box<dyn Error>> {
    let json = cli.json;
    let root = match &cli.dir {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir()?,
    };
    let data_dir = root.join(DATA_DIR);

    if matches!(cli.command, Commands::Init) {
        return cmd_init(&data_dir, json);
    }
    if !data_dir.is_dir() {
        return Err(format!(
            "no {} directory in {} (run `td init` first)",
            DATA_DIR,
            root.display()
        )
        .into());
    }

    let config = config_io::read_config(&data_dir)?;
    let mut state = state_io::read_state(&data_dir)?;
    let client = config
        .remote
        .as_ref()
        .map(|r| RemoteClient::new(r.base_url.as_str()));

    match cli.command {
        Commands::Init => unreachable!("handled above"),
        Commands::Input(args) => cmd_input(&mut state, args, json)?,
        Commands::Add(args) => cmd_add(&mut state, client.as_ref(), args, json).await?,
        Commands::List(args) => cmd_list(&state, args, json)?,
        Commands::Done(args) => cmd_done(&mut state, client.as_ref(), args, json).await?,
        Commands::Edit(args) => cmd_edit(&mut state, client.as_ref(), args, json).await?,
        Commands::Rm(args) => cmd_rm(&mut state, client.as_ref(), args, json).await?,
        Commands::Filter(args) => cmd_filter(&mut state, args, json)?,
        Commands::DoneAll => cmd_done_all(&mut state, client.as_ref(), json).await?,
        Commands::Clear => cmd_clear(&mut state, client.as_ref(), json).await?,
        Commands::Sync => cmd_sync(&mut state, client.as_ref(), json).await?,
    }

    state_io::write_state(&data_dir, &state)?;

    // A recorded sync error becomes the exit status once the state
    // (including any partial bulk progress) is on disk.
    if let Some(err) = &state.last_error {
        return Err(err.message().into());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_init(data_dir: &Path, json: bool) -> Result<(), Box<dyn Error>> {
    if data_dir.is_dir() {
        return Err(format!("{} already exists", data_dir.display()).into());
    }
    fs::create_dir_all(data_dir)?;
    fs::write(data_dir.join(config_io::CONFIG_FILE), CONFIG_TEMPLATE)?;
    state_io::write_state(data_dir, &AppState::default())?;
    ack("initialized", &data_dir.display().to_string(), json)
}

fn cmd_input(state: &mut AppState, args: InputArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let staged = args.text.clone();
    store_ops::set_input_text(state, args.text);
    ack("staged", &staged, json)
}

async fn cmd_add(
    state: &mut AppState,
    client: Option<&RemoteClient>,
    args: AddArgs,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    if let Some(text) = args.text {
        store_ops::set_input_text(state, text);
    }
    let added = match client {
        Some(client) => sync_ops::add_task(state, client).await,
        None => store_ops::add_task(state),
    };
    match added {
        Some(id) => ack("added", output::short_id(&id), json),
        // Blank input is a no-op; a remote failure reports via last_error.
        None if state.last_error.is_none() => ack("skipped", "nothing to add", json),
        None => Ok(()),
    }
}

fn cmd_list(state: &AppState, args: ListArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let filter = match args.filter {
        Some(name) => parse_filter(&name)?,
        None => state.filter,
    };
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::list_to_json(state, filter))?
        );
    } else {
        output::print_list_text(state, filter);
    }
    Ok(())
}

async fn cmd_done(
    state: &mut AppState,
    client: Option<&RemoteClient>,
    args: IdArgs,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let Some(id) = resolve_id(state, &args.id) else {
        return ack("skipped", &format!("no task matching '{}'", args.id), json);
    };
    let toggled = match client {
        Some(client) => sync_ops::toggle_complete(state, client, &id).await,
        None => store_ops::toggle_complete(state, &id),
    };
    if toggled {
        let completed = state.task(&id).is_some_and(|t| t.completed);
        let verb = if completed { "done" } else { "reopened" };
        ack(verb, output::short_id(&id), json)?;
    }
    Ok(())
}

async fn cmd_edit(
    state: &mut AppState,
    client: Option<&RemoteClient>,
    args: EditArgs,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let Some(id) = resolve_id(state, &args.id) else {
        return ack("skipped", &format!("no task matching '{}'", args.id), json);
    };

    // The full inline-edit cycle: enter edit mode, revise the draft, save.
    store_ops::begin_edit(state, &id);
    store_ops::update_draft(state, args.text);
    let saved = match client {
        Some(client) => {
            let draft = state.edit.take().map(|e| e.draft).unwrap_or_default();
            sync_ops::edit_task(state, client, &id, &draft).await
        }
        None => store_ops::save_edit(state).is_some(),
    };
    if saved {
        ack("edited", output::short_id(&id), json)?;
    }
    Ok(())
}

async fn cmd_rm(
    state: &mut AppState,
    client: Option<&RemoteClient>,
    args: IdArgs,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let Some(id) = resolve_id(state, &args.id) else {
        return ack("skipped", &format!("no task matching '{}'", args.id), json);
    };
    let deleted = match client {
        Some(client) => sync_ops::delete_task(state, client, &id).await,
        None => store_ops::delete_task(state, &id),
    };
    if deleted {
        ack("deleted", output::short_id(&id), json)?;
    }
    Ok(())
}

fn cmd_filter(state: &mut AppState, args: FilterArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let filter = parse_filter(&args.option)?;
    store_ops::set_filter(state, filter);
    ack("filter", filter.as_str(), json)
}

async fn cmd_done_all(
    state: &mut AppState,
    client: Option<&RemoteClient>,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    match client {
        Some(client) => {
            let report = sync_ops::complete_all(state, client).await;
            print_report("completed", &report, json)
        }
        None => {
            store_ops::mark_all_complete(state);
            ack("completed", &format!("{} task(s)", state.tasks.len()), json)
        }
    }
}

async fn cmd_clear(
    state: &mut AppState,
    client: Option<&RemoteClient>,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    match client {
        Some(client) => {
            let report = sync_ops::delete_completed(state, client).await;
            print_report("cleared", &report, json)
        }
        None => {
            let before = state.tasks.len();
            store_ops::delete_completed(state);
            let removed = before - state.tasks.len();
            ack("cleared", &format!("{} task(s)", removed), json)
        }
    }
}

async fn cmd_sync(
    state: &mut AppState,
    client: Option<&RemoteClient>,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let Some(client) = client else {
        return Err("no [remote] configured (edit .tido/config.toml)".into());
    };
    if sync_ops::fetch_all(state, client).await {
        ack("fetched", &format!("{} task(s)", state.tasks.len()), json)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve user input to a task id: exact match first, then unique prefix.
fn resolve_id(state: &AppState, input: &str) -> Option<String> {
    if state.task(input).is_some() {
        return Some(input.to_string());
    }
    let mut matches = state.tasks.iter().filter(|t| t.id.starts_with(input));
    match (matches.next(), matches.next()) {
        (Some(task), None) => Some(task.id.clone()),
        _ => None,
    }
}

fn parse_filter(name: &str) -> Result<Filter, Box<dyn Error>> {
    Filter::parse(name)
        .ok_or_else(|| format!("unknown filter '{}' (expected all, completed, incomplete)", name).into())
}

fn ack(key: &str, value: &str, json: bool) -> Result<(), Box<dyn Error>> {
    if json {
        println!("{}", serde_json::to_string(&serde_json::json!({ key: value }))?);
    } else {
        println!("{} {}", key, value);
    }
    Ok(())
}

fn print_report(
    verb: &str,
    report: &sync_ops::BulkReport,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::report_to_json(report))?
        );
    } else {
        output::print_report_text(verb, report);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::Task;

    #[test]
    fn resolve_id_exact_and_prefix() {
        let mut state = AppState::default();
        state.tasks.push(Task {
            id: "abc-123".into(),
            text: "a".into(),
            completed: false,
        });
        state.tasks.push(Task {
            id: "abd-456".into(),
            text: "b".into(),
            completed: false,
        });

        assert_eq!(resolve_id(&state, "abc-123").as_deref(), Some("abc-123"));
        assert_eq!(resolve_id(&state, "abd").as_deref(), Some("abd-456"));
        // Ambiguous prefix
        assert_eq!(resolve_id(&state, "ab"), None);
        assert_eq!(resolve_id(&state, "zzz"), None);
    }
}
