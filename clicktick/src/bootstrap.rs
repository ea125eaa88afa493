use crate::adapters::TerminalTitleIndicator;
use crate::app::App;
use crate::config::ClickTickConfig;
use crate::domain::{
    ports::{IndicatorSink, TimeTrackingClient},
    services::{EntryService, StatusTx, TimerService},
};
use crate::runtime::{run_app, spawn_signal_hotkey};
use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;

/// The services the terminal UI and the hotkey share.
pub struct Services<C, I> {
    pub timer: TimerService<C, I>,
    pub entries: EntryService<C>,
    pub indicator: Arc<I>,
}

impl<C: TimeTrackingClient, I: IndicatorSink> Services<C, I> {
    pub fn new(client: Arc<C>, indicator: Arc<I>, lookback_days: u32) -> Self {
        Self {
            timer: TimerService::new(client.clone(), indicator.clone())
                .with_lookback_days(lookback_days),
            entries: EntryService::new(client).with_lookback_days(lookback_days),
            indicator,
        }
    }

    pub fn with_status_channel(mut self, tx: StatusTx) -> Self {
        self.timer = self.timer.with_status_channel(tx);
        self
    }
}

/// Run the terminal UI until the user quits.
pub async fn run_tui<C: TimeTrackingClient>(client: Arc<C>, config: &ClickTickConfig) -> Result<()> {
    let indicator = Arc::new(TerminalTitleIndicator);
    indicator.set_running(false);

    let (status_tx, status_rx) = tokio::sync::mpsc::unbounded_channel();
    let services =
        Services::new(client, indicator, config.lookback_days).with_status_channel(status_tx);
    let hotkey = spawn_signal_hotkey(services.timer.clone())?;

    let mut app = App::new();
    let refresh_interval = Duration::from_secs(config.refresh_interval_secs.max(1));

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, &services, status_rx, refresh_interval).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Some(handle) = hotkey {
        handle.abort();
    }
    res
}
