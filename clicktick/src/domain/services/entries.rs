use std::sync::Arc;

use crate::domain::{
    models::{CurrentEntry, EntryId, TaskId, TimeEntry, TimeWindow},
    ports::TimeTrackingClient,
    TimeTrackingError,
};

pub const MAX_ENTRIES: usize = 100;
pub const DEFAULT_LOOKBACK_DAYS: u32 = 30;

/// Entries and the current task, fetched together. UI state swaps this in
/// whole; it is never patched in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub entries: Vec<TimeEntry>,
    pub current: Option<CurrentEntry>,
}

impl Snapshot {
    pub fn current_task_id(&self) -> Option<&TaskId> {
        self.current.as_ref().and_then(|c| c.task_id.as_ref())
    }

    pub fn is_running(&self) -> bool {
        self.current.is_some()
    }
}

/// Reads entries from the provider and shapes them for display.
///
/// Every call goes to the provider; nothing is cached between calls.
pub struct EntryService<C> {
    client: Arc<C>,
    lookback_days: u32,
}

impl<C> Clone for EntryService<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            lookback_days: self.lookback_days,
        }
    }
}

impl<C: TimeTrackingClient> EntryService<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }

    pub fn with_lookback_days(mut self, days: u32) -> Self {
        self.lookback_days = days;
        self
    }

    pub fn lookback_days(&self) -> u32 {
        self.lookback_days
    }

    /// Task-backed entries in the window, most recent first, at most [`MAX_ENTRIES`].
    pub async fn list_entries(
        &self,
        window: TimeWindow,
    ) -> Result<Vec<TimeEntry>, TimeTrackingError> {
        let entries = self.client.list_entries(window).await?;
        let fetched = entries.len();
        let entries = aggregate(entries);

        tracing::debug!(fetched, kept = entries.len(), "aggregated time entries");
        Ok(entries)
    }

    /// [`Self::list_entries`] over the lookback window ending at `now_ms`.
    pub async fn list_recent(&self, now_ms: i64) -> Result<Vec<TimeEntry>, TimeTrackingError> {
        self.list_entries(TimeWindow::last_days(now_ms, self.lookback_days))
            .await
    }

    pub async fn current_entry(&self) -> Result<Option<CurrentEntry>, TimeTrackingError> {
        self.client.current_entry().await
    }

    /// Delete an entry. Callers refresh afterwards; there is no local copy to update.
    pub async fn delete_entry(&self, entry_id: &EntryId) -> Result<(), TimeTrackingError> {
        self.client.delete_entry(entry_id).await?;
        tracing::info!(%entry_id, "deleted time entry");
        Ok(())
    }

    pub async fn refresh(&self, now_ms: i64) -> Result<Snapshot, TimeTrackingError> {
        let (entries, current) = tokio::try_join!(self.list_recent(now_ms), self.current_entry())?;
        Ok(Snapshot { entries, current })
    }
}

/// Keep task-backed entries, order by start descending (stable, so equal
/// starts keep fetch order), cap at [`MAX_ENTRIES`].
pub fn aggregate(mut entries: Vec<TimeEntry>) -> Vec<TimeEntry> {
    entries.retain(TimeEntry::is_task_backed);
    entries.sort_by(|a, b| b.start_ms.cmp(&a.start_ms));
    entries.truncate(MAX_ENTRIES);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::DevBackend;
    use crate::domain::models::DAY_MS;

    fn entry(id: &str, task: Option<&str>, start_ms: i64) -> TimeEntry {
        TimeEntry::normalize(id, start_ms, start_ms + 1_000, 1_000).with_task(task, Some("Task"))
    }

    #[test]
    fn aggregate_drops_entries_without_task() {
        let out = aggregate(vec![
            entry("1", Some("a"), 10),
            entry("2", None, 20),
            entry("3", Some("   "), 30),
        ]);
        let ids: Vec<_> = out.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1"]);
    }

    #[test]
    fn aggregate_sorts_descending_and_keeps_fetch_order_for_ties() {
        let out = aggregate(vec![
            entry("old", Some("a"), 10),
            entry("tie-first", Some("b"), 50),
            entry("new", Some("c"), 90),
            entry("tie-second", Some("d"), 50),
        ]);
        let ids: Vec<_> = out.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "tie-first", "tie-second", "old"]);
    }

    #[test]
    fn aggregate_caps_at_max_entries() {
        let entries = (0..250)
            .map(|i| entry(&i.to_string(), Some("a"), i))
            .collect();
        let out = aggregate(entries);

        assert_eq!(out.len(), MAX_ENTRIES);
        assert_eq!(out[0].start_ms, 249);
        assert!(out.windows(2).all(|w| w[0].start_ms >= w[1].start_ms));
    }

    #[test]
    fn aggregate_of_nothing_is_empty() {
        assert!(aggregate(Vec::new()).is_empty());
    }

    #[tokio::test]
    async fn list_recent_uses_lookback_window() {
        let now = 100 * DAY_MS;
        let backend = Arc::new(DevBackend::empty().with_entries(vec![
            entry("inside", Some("a"), now - 2 * DAY_MS),
            entry("outside", Some("a"), now - 40 * DAY_MS),
        ]));
        let service = EntryService::new(backend);

        let out = service.list_recent(now).await.unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id.as_str(), "inside");
    }

    #[tokio::test]
    async fn refresh_reports_current_task() {
        let now = 100 * DAY_MS;
        let running = TimeEntry::normalize("run", now - 1_000, 0, -1).with_task(Some("t1"), Some("Live"));
        let backend = Arc::new(DevBackend::empty().with_entries(vec![running]));
        let service = EntryService::new(backend);

        let snapshot = service.refresh(now).await.unwrap();
        assert!(snapshot.is_running());
        assert_eq!(snapshot.current_task_id().map(TaskId::as_str), Some("t1"));
        assert_eq!(snapshot.entries.len(), 1);
    }

    #[tokio::test]
    async fn delete_is_forwarded_and_errors_propagate() {
        let backend = Arc::new(DevBackend::empty().with_entries(vec![entry("1", Some("a"), 10)]));
        let service = EntryService::new(backend.clone());

        service.delete_entry(&EntryId::from("1")).await.unwrap();
        assert!(backend.entries().is_empty());

        backend.fail_with(TimeTrackingError::Remote {
            status: 404,
            context: "DELETE /team/1/time_entries/1".to_string(),
            message: "not found".to_string(),
        });
        let err = service.delete_entry(&EntryId::from("1")).await.unwrap_err();
        assert!(matches!(err, TimeTrackingError::Remote { status: 404, .. }));
    }
}
