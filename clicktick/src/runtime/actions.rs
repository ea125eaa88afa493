use crate::app::{App, View};
use crate::bootstrap::Services;
use crate::domain::{
    models::TimerStatus,
    ports::{IndicatorSink, TimeTrackingClient},
};
use crate::time_utils::now_ms;

use super::action_queue::{Action, ActionTx, Outcome, OutcomeTx};

fn enqueue_action(action_tx: &ActionTx, action: Action) {
    let _ = action_tx.send(action);
}

fn report(outcome_tx: &OutcomeTx, outcome: Outcome) {
    if outcome_tx.send(outcome).is_err() {
        tracing::debug!("event loop gone, dropping outcome");
    }
}

/// Start the work for `action` on a background task. The UI never waits on
/// the network; results come back through `outcome_tx`.
pub(super) fn run_action<C, I>(
    action: Action,
    app: &mut App,
    services: &Services<C, I>,
    outcome_tx: &OutcomeTx,
) where
    C: TimeTrackingClient,
    I: IndicatorSink,
{
    match action {
        Action::Refresh => {
            let entries = services.entries.clone();
            let indicator = services.indicator.clone();
            spawn_request(app, outcome_tx, async move {
                let fetched_at_ms = now_ms();
                let result = entries.refresh(fetched_at_ms).await.map_err(|e| e.to_string());
                if let Ok(snapshot) = &result {
                    indicator.set_running(snapshot.is_running());
                }
                Outcome::Refreshed {
                    result,
                    fetched_at_ms,
                }
            });
        }
        Action::Toggle => {
            let timer = services.timer.clone();
            spawn_request(app, outcome_tx, async move {
                timer.toggle().await;
                Outcome::Toggled
            });
        }
        Action::StartSelected => {
            let Some(task_id) = app
                .selected_entry()
                .and_then(|item| item.entry.task_id.clone())
            else {
                app.set_status("No task selected".to_string());
                return;
            };
            let timer = services.timer.clone();
            spawn_request(app, outcome_tx, async move {
                Outcome::Timer(timer.start_task(&task_id).await.map_err(|e| e.to_string()))
            });
        }
        Action::Stop => {
            let timer = services.timer.clone();
            spawn_request(app, outcome_tx, async move {
                Outcome::Timer(timer.stop_timer().await.map_err(|e| e.to_string()))
            });
        }
        Action::ConfirmDelete => {
            let Some(ctx) = app.delete_context.take() else {
                app.navigate_to(View::Entries);
                return;
            };
            app.navigate_to(View::Entries);
            let entries = services.entries.clone();
            spawn_request(app, outcome_tx, async move {
                let result = entries
                    .delete_entry(&ctx.entry_id)
                    .await
                    .map(|_| ctx.entry_id)
                    .map_err(|e| e.to_string());
                Outcome::Deleted(result)
            });
        }
    }
}

fn spawn_request<F>(app: &mut App, outcome_tx: &OutcomeTx, work: F)
where
    F: std::future::Future<Output = Outcome> + Send + 'static,
{
    app.begin_request();
    let outcome_tx = outcome_tx.clone();
    tokio::spawn(async move {
        let outcome = work.await;
        report(&outcome_tx, outcome);
    });
}

/// Apply a finished background task to the app state.
pub(super) fn apply_outcome(outcome: Outcome, app: &mut App, action_tx: &ActionTx) {
    app.finish_request();
    match outcome {
        Outcome::Refreshed {
            result,
            fetched_at_ms,
        } => match result {
            Ok(snapshot) => app.apply_snapshot(snapshot, fetched_at_ms),
            Err(e) => {
                tracing::warn!("Refresh failed: {}", e);
                app.set_status(format!("Refresh failed: {}", e));
            }
        },
        Outcome::Toggled => {}
        Outcome::Timer(Ok(status)) => {
            app.apply_status(&status);
            enqueue_action(action_tx, Action::Refresh);
        }
        Outcome::Timer(Err(e)) => {
            app.apply_status(&TimerStatus::error(e));
            // A start can fail after the stop before it went through.
            enqueue_action(action_tx, Action::Refresh);
        }
        Outcome::Deleted(Ok(entry_id)) => {
            app.set_status(format!("Deleted entry {}", entry_id));
            enqueue_action(action_tx, Action::Refresh);
        }
        Outcome::Deleted(Err(e)) => {
            app.set_status(format!("Error deleting entry: {}", e));
        }
    }
}

/// A toggle finished, from the UI or the hotkey.
pub(super) fn apply_timer_status(status: TimerStatus, app: &mut App, action_tx: &ActionTx) {
    app.apply_status(&status);
    if !matches!(status, TimerStatus::Error { .. }) {
        enqueue_action(action_tx, Action::Refresh);
    }
}
