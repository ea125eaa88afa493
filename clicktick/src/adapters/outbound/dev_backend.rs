use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::{
    models::{CurrentEntry, EntryId, TaskId, TimeEntry, TimeWindow, TimerLink, DAY_MS},
    ports::TimeTrackingClient,
    TimeTrackingError,
};
use crate::time_utils::now_ms;

/// A call made against the [`DevBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Current,
    List(TimeWindow),
    Start(TaskId),
    Stop,
    Delete(EntryId),
}

impl Call {
    pub fn is_mutation(&self) -> bool {
        matches!(self, Call::Start(_) | Call::Stop | Call::Delete(_))
    }
}

#[derive(Debug, Default)]
struct DevState {
    entries: Vec<TimeEntry>,
    calls: Vec<Call>,
    next_id: u64,
    pending_failure: Option<TimeTrackingError>,
    start_failure: Option<TimeTrackingError>,
}

/// In-memory stand-in for ClickUp, used by `clicktick dev` and by tests.
/// Records every call it receives.
#[derive(Debug, Clone)]
pub struct DevBackend {
    state: Arc<Mutex<DevState>>,
    clock: fn() -> i64,
    links: bool,
}

impl Default for DevBackend {
    fn default() -> Self {
        Self::empty()
    }
}

impl DevBackend {
    /// A backend seeded with a few days of sample entries.
    pub fn new() -> Self {
        let backend = Self::empty();
        let entries = seed_dev_entries(now_ms());
        backend.lock().next_id = entries.len() as u64 + 1;
        backend.lock().entries = entries;
        backend
    }

    pub fn empty() -> Self {
        Self {
            state: Arc::new(Mutex::new(DevState {
                next_id: 1,
                ..DevState::default()
            })),
            clock: now_ms,
            links: true,
        }
    }

    fn lock(&self) -> MutexGuard<'_, DevState> {
        // A poisoned lock only means a test panicked mid-call; the data is still usable.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, call: Call) -> Result<MutexGuard<'_, DevState>, TimeTrackingError> {
        let mut state = self.lock();
        state.calls.push(call);
        match state.pending_failure.take() {
            Some(error) => Err(error),
            None => Ok(state),
        }
    }

    fn link(&self, entry: &TimeEntry) -> TimerLink {
        if !self.links {
            return TimerLink::default();
        }
        TimerLink {
            task_id: entry.task_id.clone(),
            task_name: entry.task_name.clone(),
        }
    }
}

#[cfg(test)]
impl DevBackend {
    pub fn with_entries(self, entries: Vec<TimeEntry>) -> Self {
        {
            let mut state = self.lock();
            state.next_id += entries.len() as u64;
            state.entries.extend(entries);
        }
        self
    }

    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    /// Answer start/stop without task linkage, like ClickUp does for some entries.
    pub fn without_links(mut self) -> Self {
        self.links = false;
        self
    }

    /// Make the next call fail with `error`.
    pub fn fail_with(&self, error: TimeTrackingError) {
        self.lock().pending_failure = Some(error);
    }

    /// Make the next start call fail with `error`, after any earlier calls succeed.
    pub fn fail_start_with(&self, error: TimeTrackingError) {
        self.lock().start_failure = Some(error);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn entries(&self) -> Vec<TimeEntry> {
        self.lock().entries.clone()
    }
}

fn stop_running(state: &mut DevState, now: i64) -> Option<TimeEntry> {
    let entry = state.entries.iter_mut().find(|e| e.is_running)?;
    entry.end_ms = now;
    entry.duration_ms = now.saturating_sub(entry.start_ms).max(0);
    entry.is_running = false;
    Some(entry.clone())
}

#[async_trait]
impl TimeTrackingClient for DevBackend {
    async fn current_entry(&self) -> Result<Option<CurrentEntry>, TimeTrackingError> {
        let state = self.record(Call::Current)?;
        Ok(state
            .entries
            .iter()
            .find(|e| e.is_running)
            .map(|e| CurrentEntry {
                id: e.id.clone(),
                task_id: e.task_id.clone(),
                task_name: e.task_name.clone(),
                start_ms: e.start_ms,
            }))
    }

    async fn list_entries(&self, window: TimeWindow) -> Result<Vec<TimeEntry>, TimeTrackingError> {
        let state = self.record(Call::List(window))?;
        Ok(state
            .entries
            .iter()
            .filter(|e| e.start_ms >= window.start_ms && e.start_ms <= window.end_ms)
            .cloned()
            .collect())
    }

    async fn start_timer(&self, task_id: &TaskId) -> Result<TimerLink, TimeTrackingError> {
        let now = (self.clock)();
        let mut state = self.record(Call::Start(task_id.clone()))?;
        if let Some(error) = state.start_failure.take() {
            return Err(error);
        }
        stop_running(&mut state, now);

        let task_name = state
            .entries
            .iter()
            .find(|e| e.task_id.as_ref() == Some(task_id))
            .and_then(|e| e.task_name.clone());
        let id = state.next_id;
        state.next_id += 1;

        let entry = TimeEntry::normalize(format!("dev-{}", id), now, 0, -1)
            .with_task(Some(task_id.as_str()), task_name.as_deref());
        state.entries.push(entry.clone());
        Ok(self.link(&entry))
    }

    async fn stop_timer(&self) -> Result<TimerLink, TimeTrackingError> {
        let now = (self.clock)();
        let mut state = self.record(Call::Stop)?;
        Ok(stop_running(&mut state, now)
            .map(|entry| self.link(&entry))
            .unwrap_or_default())
    }

    async fn delete_entry(&self, entry_id: &EntryId) -> Result<(), TimeTrackingError> {
        let mut state = self.record(Call::Delete(entry_id.clone()))?;
        state.entries.retain(|e| &e.id != entry_id);
        Ok(())
    }
}

/// Generate a handful of fake entries spread over the last few days.
fn seed_dev_entries(now: i64) -> Vec<TimeEntry> {
    const HOUR_MS: i64 = 60 * 60 * 1000;

    let entry = |id: &str, days_ago: i64, start_hour: i64, hours: i64, task: Option<(&str, &str)>| {
        let start = now - days_ago * DAY_MS - start_hour * HOUR_MS;
        let duration = hours * HOUR_MS;
        let (task_id, task_name) = task.unzip();
        TimeEntry::normalize(id, start, start + duration, duration)
            .with_task(task_id, task_name)
            .with_billable(days_ago % 2 == 0)
    };

    vec![
        entry("dev-seed-1", 0, 3, 1, Some(("86a1b", "Tray icon states"))),
        entry("dev-seed-2", 0, 5, 2, Some(("86a1c", "Review timer PR"))),
        entry("dev-seed-3", 0, 8, 1, Some(("86a1b", "Tray icon states"))),
        entry("dev-seed-4", 1, 4, 3, Some(("86a2f", "Release checklist"))),
        entry("dev-seed-5", 1, 9, 1, None),
        entry("dev-seed-6", 2, 6, 2, Some(("86a1c", "Review timer PR"))),
        entry("dev-seed-7", 4, 5, 4, Some(("86a30", "Sprint planning"))),
    ]
}
