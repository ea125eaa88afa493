use async_trait::async_trait;

use crate::domain::{
    models::{CurrentEntry, EntryId, TaskId, TimeEntry, TimeWindow, TimerLink},
    TimeTrackingError,
};

/// Outbound port for the remote time tracking service.
///
/// The service is the single source of truth for which timer is running;
/// nothing behind this trait caches.
#[async_trait]
pub trait TimeTrackingClient: Send + Sync + 'static {
    /// The entry currently in progress, if any.
    async fn current_entry(&self) -> Result<Option<CurrentEntry>, TimeTrackingError>;

    /// Normalized entries within the window, in the order the service returned them.
    async fn list_entries(&self, window: TimeWindow) -> Result<Vec<TimeEntry>, TimeTrackingError>;

    /// Start tracking time against a task.
    async fn start_timer(&self, task_id: &TaskId) -> Result<TimerLink, TimeTrackingError>;

    /// Stop whatever timer is running.
    async fn stop_timer(&self) -> Result<TimerLink, TimeTrackingError>;

    async fn delete_entry(&self, entry_id: &EntryId) -> Result<(), TimeTrackingError>;
}
