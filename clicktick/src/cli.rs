use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "clicktick")]
#[command(about = "Terminal timer toggle for ClickUp time tracking")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the terminal UI against ClickUp
    Run,
    /// Run the terminal UI with local in-memory data
    Dev,
    /// Stop the running timer, or resume the most recent task
    Toggle,
    /// Start a timer on a task, stopping the running one first
    Start {
        /// ClickUp task id
        task_id: String,
    },
    /// Stop the running timer
    Stop,
    /// Print the running time entry, if any
    Current,
    /// List recent task-backed entries grouped by day
    Entries {
        /// Only show entries whose task name contains this text
        #[arg(long)]
        search: Option<String>,
        /// Show each task at most once per day
        #[arg(long)]
        hide_duplicates: bool,
        /// Print raw entries as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a time entry
    Delete {
        entry_id: String,
    },
    /// Print config path and create default file if missing
    ConfigPath,
}
