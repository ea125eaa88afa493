use std::io::{self, Write};

use crossterm::{execute, terminal::SetTitle};

use crate::domain::ports::IndicatorSink;

const RUNNING_TITLE: &str = "● clicktick - timer running";
const IDLE_TITLE: &str = "○ clicktick - timer stopped";

/// Shows the timer state in the terminal window title.
#[derive(Debug, Default)]
pub struct TerminalTitleIndicator;

impl IndicatorSink for TerminalTitleIndicator {
    fn set_running(&self, running: bool) {
        let title = if running { RUNNING_TITLE } else { IDLE_TITLE };
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, SetTitle(title)).and_then(|_| stdout.flush()) {
            tracing::warn!("Failed to update terminal title: {}", e);
        }
    }
}

/// Logs timer state changes; used by one-shot commands.
#[derive(Debug, Default)]
pub struct LogIndicator;

impl IndicatorSink for LogIndicator {
    fn set_running(&self, running: bool) {
        tracing::info!(running, "timer indicator");
    }
}

#[cfg(test)]
pub use recording::RecordingIndicator;
