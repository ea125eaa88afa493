mod conversions;

use async_trait::async_trait;

use crate::domain::{
    models::{CurrentEntry, EntryId, TaskId, TimeEntry, TimeWindow, TimerLink},
    ports::TimeTrackingClient,
    TimeTrackingError,
};

use self::conversions::{to_domain_current_entry, to_domain_time_entry, to_timer_link};

/// Adapter that wraps the ClickUp client to implement the TimeTrackingClient port.
pub struct ClickUpAdapter {
    client: clickup::ClickUpClient,
}

impl ClickUpAdapter {
    pub fn new(settings: clickup::ClientSettings) -> Self {
        Self {
            client: clickup::ClickUpClient::new(settings),
        }
    }
}

#[async_trait]
impl TimeTrackingClient for ClickUpAdapter {
    async fn current_entry(&self) -> Result<Option<CurrentEntry>, TimeTrackingError> {
        let raw = self
            .client
            .current_time_entry()
            .await
            .map_err(map_clickup_error)?;
        Ok(raw.and_then(to_domain_current_entry))
    }

    async fn list_entries(&self, window: TimeWindow) -> Result<Vec<TimeEntry>, TimeTrackingError> {
        let raw = self
            .client
            .time_entries(window.start_ms, window.end_ms)
            .await
            .map_err(map_clickup_error)?;

        Ok(raw
            .into_iter()
            .filter_map(|entry| {
                let converted = to_domain_time_entry(entry);
                if converted.is_none() {
                    tracing::warn!("Skipping time entry without an id");
                }
                converted
            })
            .collect())
    }

    async fn start_timer(&self, task_id: &TaskId) -> Result<TimerLink, TimeTrackingError> {
        let raw = self
            .client
            .start_timer(task_id.as_str())
            .await
            .map_err(map_clickup_error)?;
        Ok(to_timer_link(raw))
    }

    async fn stop_timer(&self) -> Result<TimerLink, TimeTrackingError> {
        let raw = self.client.stop_timer().await.map_err(map_clickup_error)?;
        Ok(to_timer_link(raw))
    }

    async fn delete_entry(&self, entry_id: &EntryId) -> Result<(), TimeTrackingError> {
        self.client
            .delete_time_entry(entry_id.as_str())
            .await
            .map_err(map_clickup_error)
    }
}

fn map_clickup_error(e: clickup::ClickUpError) -> TimeTrackingError {
    match e {
        clickup::ClickUpError::Config(name) => TimeTrackingError::Config(name),
        clickup::ClickUpError::Remote {
            status,
            method,
            path,
            message,
        } => TimeTrackingError::Remote {
            status,
            context: format!("{} {}", method, path),
            message,
        },
        clickup::ClickUpError::Transport(msg) => TimeTrackingError::transport(msg),
    }
}
