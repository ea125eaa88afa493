//! One-shot subcommands: run a single operation, print the result, exit.

use crate::adapters::{ClickUpAdapter, LogIndicator};
use crate::cli::Commands;
use crate::config::ClickTickConfig;
use crate::domain::{
    models::{EntryId, TaskId, TimerStatus},
    projection::{format_duration, project, ProjectionOptions},
    services::{EntryService, TimerService},
};
use crate::time_utils::{now_ms, pacific_clock};
use anyhow::{bail, Context, Result};
use std::sync::Arc;

pub async fn run(command: Commands, config: &ClickTickConfig) -> Result<()> {
    let client = Arc::new(ClickUpAdapter::new(config.client_settings()));
    let timer = TimerService::new(client.clone(), Arc::new(LogIndicator))
        .with_lookback_days(config.lookback_days);
    let entries = EntryService::new(client).with_lookback_days(config.lookback_days);

    match command {
        Commands::Toggle => print_status(timer.toggle().await),
        Commands::Start { task_id } => {
            let task_id = TaskId::parse(&task_id).context("Task id must not be blank")?;
            print_status(timer.start_task(&task_id).await?)
        }
        Commands::Stop => print_status(timer.stop_timer().await?),
        Commands::Current => {
            match entries.current_entry().await? {
                Some(current) => println!(
                    "{}  {}  since {}",
                    current.task_name.as_deref().unwrap_or("(no task)"),
                    current.task_id.map(|id| id.to_string()).unwrap_or_default(),
                    pacific_clock(current.start_ms).unwrap_or_else(|| "--:--".to_string()),
                ),
                None => println!("No timer running"),
            }
            Ok(())
        }
        Commands::Entries {
            search,
            hide_duplicates,
            json,
        } => {
            let snapshot = entries.refresh(now_ms()).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot.entries)?);
                return Ok(());
            }
            let options = ProjectionOptions {
                hide_daily_duplicates: hide_duplicates,
                search_text: search.unwrap_or_default(),
            };
            for group in project(&snapshot.entries, snapshot.current_task_id(), &options) {
                if let Some(label) = &group.label {
                    println!("{}  ({})", label, format_duration(group.total_ms));
                }
                for item in &group.items {
                    let entry = &item.entry;
                    println!(
                        "  {} {}  {:>7}  {}  [{}]  {}",
                        if item.is_running { "⏵" } else { " " },
                        pacific_clock(entry.start_ms).unwrap_or_else(|| "--:--".to_string()),
                        format_duration(entry.duration_ms),
                        entry.task_name.as_deref().unwrap_or("(unnamed task)"),
                        entry.task_id.as_ref().map(TaskId::as_str).unwrap_or_default(),
                        entry.id,
                    );
                }
            }
            Ok(())
        }
        Commands::Delete { entry_id } => {
            let entry_id = EntryId::new(entry_id.trim());
            entries.delete_entry(&entry_id).await?;
            println!("Deleted entry {}", entry_id);
            Ok(())
        }
        Commands::Run | Commands::Dev | Commands::ConfigPath => {
            bail!("not a one-shot command")
        }
    }
}

/// Print the outcome; an error status fails the command.
fn print_status(status: TimerStatus) -> Result<()> {
    println!("{}", status);
    tracing::debug!(payload = %serde_json::to_string(&status.payload())?, "timer status");
    if let TimerStatus::Error { message } = status {
        bail!(message);
    }
    Ok(())
}
