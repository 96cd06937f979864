use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "td", about = concat!("[·] tido v", env!("CARGO_PKG_VERSION"), " - your to-do list in the terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different directory
    #[arg(short = 'C', long = "dir", global = true)]
    pub dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a tido data directory here
    Init,
    /// Add a task, or commit the staged input buffer
    Add(AddArgs),
    /// Stage text into the input buffer without adding
    Input(InputArgs),
    /// List tasks under the active filter
    List(ListArgs),
    /// Toggle a task's completion
    Done(IdArgs),
    /// Edit a task's text
    Edit(EditArgs),
    /// Delete a task
    Rm(IdArgs),
    /// Set the active filter
    Filter(FilterArgs),
    /// Mark every task completed
    DoneAll,
    /// Delete all completed tasks
    Clear,
    /// Reload the task list from the remote service
    Sync,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task text (omit to commit whatever is already staged)
    pub text: Option<String>,
}

#[derive(Args)]
pub struct InputArgs {
    /// Text to stage
    pub text: String,
}

#[derive(Args)]
pub struct ListArgs {
    /// Override the active filter for this invocation (all, completed, incomplete)
    #[arg(long)]
    pub filter: Option<String>,
}

#[derive(Args)]
pub struct IdArgs {
    /// Task id (any unique prefix)
    pub id: String,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task id (any unique prefix)
    pub id: String,
    /// Replacement text
    pub text: String,
}

#[derive(Args)]
pub struct FilterArgs {
    /// One of: all, completed, incomplete
    pub option: String,
}
