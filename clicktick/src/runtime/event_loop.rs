use crate::app::App;
use crate::bootstrap::Services;
use crate::domain::{
    ports::{IndicatorSink, TimeTrackingClient},
    services::StatusRx,
};
use crate::time_utils::now_ms;
use crate::ui;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

use super::action_queue::{channel, outcome_channel, Action};
use super::actions::{apply_outcome, apply_timer_status, run_action};
use super::views::handle_view_key;

const TICK_INTERVAL: Duration = Duration::from_secs(1);

pub async fn run_app<C, I>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    services: &Services<C, I>,
    mut status_rx: StatusRx,
    refresh_interval: Duration,
) -> Result<()>
where
    C: TimeTrackingClient,
    I: IndicatorSink,
{
    let (action_tx, mut action_rx) = channel();
    let (outcome_tx, mut outcome_rx) = outcome_channel();

    let _ = action_tx.send(Action::Refresh);
    let mut last_tick = Instant::now();
    let mut last_refresh = Instant::now();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if app.is_loading {
            app.throbber_state.calc_next();
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_view_key(key, app, &action_tx);
                }
            }
        }

        if last_tick.elapsed() >= TICK_INTERVAL {
            app.tick(now_ms());
            last_tick = Instant::now();
        }

        if last_refresh.elapsed() >= refresh_interval {
            tracing::debug!("periodic refresh");
            let _ = action_tx.send(Action::Refresh);
            last_refresh = Instant::now();
        }

        while let Ok(status) = status_rx.try_recv() {
            apply_timer_status(status, app, &action_tx);
        }

        while let Ok(outcome) = outcome_rx.try_recv() {
            apply_outcome(outcome, app, &action_tx);
        }

        while let Ok(action) = action_rx.try_recv() {
            run_action(action, app, services, &outcome_tx);
        }

        if !app.running {
            break;
        }

        // Let spawned requests make progress on this worker between frames.
        tokio::task::yield_now().await;
    }

    Ok(())
}
