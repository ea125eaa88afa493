use std::sync::Arc;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use crate::domain::{
    models::{TaskId, TimeWindow, TimerStatus},
    ports::{IndicatorSink, TimeTrackingClient},
    TimeTrackingError,
};
use crate::time_utils::now_ms;

use super::EntryService;

pub type StatusTx = UnboundedSender<TimerStatus>;
pub type StatusRx = UnboundedReceiver<TimerStatus>;

/// Decides what start, stop and toggle mean given what the provider reports
/// as running.
///
/// Two trigger sources (the UI and the global hotkey) may call in
/// concurrently. Calls are not serialized here: the provider orders the
/// mutations and the next refresh reconciles local state.
pub struct TimerService<C, I> {
    client: Arc<C>,
    entries: EntryService<C>,
    indicator: Arc<I>,
    status_tx: Option<StatusTx>,
    clock: fn() -> i64,
}

impl<C, I> Clone for TimerService<C, I> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            entries: self.entries.clone(),
            indicator: self.indicator.clone(),
            status_tx: self.status_tx.clone(),
            clock: self.clock,
        }
    }
}

impl<C: TimeTrackingClient, I: IndicatorSink> TimerService<C, I> {
    pub fn new(client: Arc<C>, indicator: Arc<I>) -> Self {
        Self {
            entries: EntryService::new(client.clone()),
            client,
            indicator,
            status_tx: None,
            clock: now_ms,
        }
    }

    /// Publish every toggle outcome on `tx`.
    pub fn with_status_channel(mut self, tx: StatusTx) -> Self {
        self.status_tx = Some(tx);
        self
    }

    pub fn with_lookback_days(mut self, days: u32) -> Self {
        self.entries = self.entries.with_lookback_days(days);
        self
    }

    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    /// Stop the running timer, or resume the most recently started task.
    ///
    /// Never fails: errors become [`TimerStatus::Error`]. The indicator is
    /// updated and the outcome broadcast whatever happens.
    #[tracing::instrument(skip(self))]
    pub async fn toggle(&self) -> TimerStatus {
        let status = match self.try_toggle().await {
            Ok(status) => status,
            Err(TimeTrackingError::NoCandidate) => {
                tracing::info!("nothing to resume");
                TimerStatus::error(TimeTrackingError::NoCandidate.to_string())
            }
            Err(e) => {
                tracing::error!("Toggle failed: {}", e);
                TimerStatus::error(e.to_string())
            }
        };

        self.indicator.set_running(status.is_started());
        self.broadcast(&status);
        status
    }

    async fn try_toggle(&self) -> Result<TimerStatus, TimeTrackingError> {
        if self.client.current_entry().await?.is_some() {
            let link = self.client.stop_timer().await?;
            tracing::info!(task_id = ?link.task_id, "stopped running timer");
            return Ok(TimerStatus::Stopped {
                task_id: link.task_id,
                task_name: link.task_name,
            });
        }

        // Entries come back most recent first; among equal starts the
        // first-fetched one wins.
        let window = TimeWindow::last_days((self.clock)(), self.entries.lookback_days());
        let candidate = self
            .entries
            .list_entries(window)
            .await?
            .into_iter()
            .next()
            .ok_or(TimeTrackingError::NoCandidate)?;
        let task_id = candidate
            .task_id
            .clone()
            .ok_or(TimeTrackingError::NoCandidate)?;

        let link = self.client.start_timer(&task_id).await?;
        tracing::info!(%task_id, "resumed most recent task");

        Ok(TimerStatus::Started {
            task_id: link.task_id.unwrap_or(task_id),
            task_name: link.task_name.or(candidate.task_name),
        })
    }

    /// Start `task_id`, stopping the running timer first if there is one.
    #[tracing::instrument(skip(self))]
    pub async fn start_task(&self, task_id: &TaskId) -> Result<TimerStatus, TimeTrackingError> {
        if self.client.current_entry().await?.is_some() {
            self.client.stop_timer().await?;
            // The start below may still fail; the previous timer is gone either way.
            self.indicator.set_running(false);
        }

        let link = self.client.start_timer(task_id).await?;
        self.indicator.set_running(true);
        tracing::info!(%task_id, "started task");

        Ok(TimerStatus::Started {
            task_id: link.task_id.unwrap_or_else(|| task_id.clone()),
            task_name: link.task_name,
        })
    }

    #[tracing::instrument(skip(self))]
    pub async fn stop_timer(&self) -> Result<TimerStatus, TimeTrackingError> {
        let link = self.client.stop_timer().await?;
        self.indicator.set_running(false);
        tracing::info!(task_id = ?link.task_id, "stopped timer");

        Ok(TimerStatus::Stopped {
            task_id: link.task_id,
            task_name: link.task_name,
        })
    }

    fn broadcast(&self, status: &TimerStatus) {
        if let Some(tx) = &self.status_tx {
            if tx.send(status.clone()).is_err() {
                tracing::debug!("status receiver dropped");
            }
        }
    }
}
