mod adapters;
mod app;
mod bootstrap;
mod cli;
mod commands;
mod config;
mod domain;
mod logging;
mod runtime;
mod time_utils;
mod ui;

use adapters::{ClickUpAdapter, DevBackend};
use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::ClickTickConfig;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            let config = ClickTickConfig::load()?;
            let _guard = logging::init_file_logging(&ClickTickConfig::log_dir()?)?;
            tracing::info!(api_url = %config.api_url, "starting terminal UI");
            let client = Arc::new(ClickUpAdapter::new(config.client_settings()));
            bootstrap::run_tui(client, &config).await?;
        }
        Commands::Dev => {
            let config = ClickTickConfig::load()?;
            let _guard = logging::init_file_logging(&ClickTickConfig::log_dir()?)?;
            tracing::info!("starting terminal UI with in-memory data");
            bootstrap::run_tui(Arc::new(DevBackend::new()), &config).await?;
        }
        Commands::ConfigPath => {
            let path = ClickTickConfig::config_path()?;
            if ClickTickConfig::write_default_if_missing(&path)? {
                eprintln!("Created default config");
            }
            println!("{}", path.display());
        }
        command => {
            logging::init_stderr_logging();
            let config = ClickTickConfig::load()?;
            commands::run(command, &config).await?;
        }
    }

    Ok(())
}
