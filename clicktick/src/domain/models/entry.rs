use serde::Serialize;

use super::{EntryId, TaskId};

pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// A normalized time entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeEntry {
    pub id: EntryId,
    pub task_id: Option<TaskId>,
    pub task_name: Option<String>,
    pub start_ms: i64,
    pub end_ms: i64,
    /// Absolute duration; the wire sign only marks a running timer.
    pub duration_ms: i64,
    pub billable: bool,
    pub is_running: bool,
}

impl TimeEntry {
    /// Build an entry from already-coerced wire values.
    ///
    /// `signed_duration_ms < 0` or `end_ms == 0` means the timer is still running.
    pub fn normalize(
        id: impl Into<EntryId>,
        start_ms: i64,
        end_ms: i64,
        signed_duration_ms: i64,
    ) -> Self {
        Self {
            id: id.into(),
            task_id: None,
            task_name: None,
            start_ms,
            end_ms,
            duration_ms: signed_duration_ms.checked_abs().unwrap_or(i64::MAX),
            billable: false,
            is_running: signed_duration_ms < 0 || end_ms == 0,
        }
    }

    pub fn with_task(mut self, task_id: Option<&str>, task_name: Option<&str>) -> Self {
        self.task_id = task_id.and_then(TaskId::parse);
        self.task_name = task_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        self
    }

    pub fn with_billable(mut self, billable: bool) -> Self {
        self.billable = billable;
        self
    }

    pub fn is_task_backed(&self) -> bool {
        self.task_id.is_some()
    }
}

/// The entry the service reports as in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentEntry {
    pub id: EntryId,
    pub task_id: Option<TaskId>,
    pub task_name: Option<String>,
    pub start_ms: i64,
}

/// Task linkage reported back by a start or stop call. Both fields are
/// `None` when the service answered without a payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerLink {
    pub task_id: Option<TaskId>,
    pub task_name: Option<String>,
}

/// A half-open millisecond window used to list entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl TimeWindow {
    pub fn new(start_ms: i64, end_ms: i64) -> Self {
        Self { start_ms, end_ms }
    }

    /// The `days` days leading up to `now_ms`.
    pub fn last_days(now_ms: i64, days: u32) -> Self {
        Self {
            start_ms: now_ms - i64::from(days) * DAY_MS,
            end_ms: now_ms,
        }
    }
}
