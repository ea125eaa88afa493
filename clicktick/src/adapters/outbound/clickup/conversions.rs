use clickup::RawTimeEntry;

use crate::domain::models::{CurrentEntry, EntryId, TaskId, TimeEntry, TimerLink};

/// Convert a ClickUp time entry to a normalized domain entry. Entries without
/// an id, or with a blank one, cannot be acted on and are dropped.
pub fn to_domain_time_entry(raw: RawTimeEntry) -> Option<TimeEntry> {
    let id = raw.id.clone().filter(|id| !id.trim().is_empty())?;
    Some(
        TimeEntry::normalize(
            id,
            raw.start.as_millis(),
            raw.end.as_millis(),
            raw.duration.as_millis(),
        )
        .with_task(raw.task_id(), raw.task_name())
        .with_billable(raw.billable),
    )
}

/// Convert the `current` payload. `None` when the service sent no id.
pub fn to_domain_current_entry(raw: RawTimeEntry) -> Option<CurrentEntry> {
    Some(CurrentEntry {
        task_id: raw.task_id().and_then(TaskId::parse),
        task_name: raw.task_name().map(str::to_string),
        start_ms: raw.start.as_millis(),
        id: EntryId::new(raw.id?),
    })
}

/// Task linkage of a start/stop response, empty when there was no payload.
pub fn to_timer_link(raw: Option<RawTimeEntry>) -> TimerLink {
    let Some(raw) = raw else {
        return TimerLink::default();
    };
    TimerLink {
        task_id: raw.task_id().and_then(TaskId::parse),
        task_name: raw.task_name().map(str::to_string),
    }
}
