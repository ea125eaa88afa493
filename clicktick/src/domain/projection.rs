//! Turns a list of entries into the day-grouped rows the UI renders.

use std::collections::HashSet;

use chrono::NaiveDate;

use super::models::{TaskId, TimeEntry};
use crate::time_utils::pacific_day;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectionOptions {
    pub hide_daily_duplicates: bool,
    pub search_text: String,
}

impl ProjectionOptions {
    fn needle(&self) -> Option<String> {
        let trimmed = self.search_text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
    }
}

/// An entry as displayed. `is_running` is also set for the task that is
/// currently running elsewhere, even if this entry's own duration hasn't
/// caught up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewEntry {
    pub entry: TimeEntry,
    pub is_running: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayGroup {
    /// `None` only for a leading group of entries without a start time.
    pub day: Option<NaiveDate>,
    pub label: Option<String>,
    /// Sum over every entry of the day, before filtering.
    pub total_ms: i64,
    pub items: Vec<ViewEntry>,
}

impl DayGroup {
    fn new(day: Option<NaiveDate>) -> Self {
        Self {
            day,
            label: day.map(|d| d.format("%a %Y-%m-%d").to_string()),
            total_ms: 0,
            items: Vec::new(),
        }
    }
}

/// Group `entries` (expected most recent first) by Pacific day.
///
/// Entries starting at 0 carry no date and stay inline in the preceding
/// group without counting towards its total. Groups left with no rows after
/// filtering are dropped.
pub fn project(
    entries: &[TimeEntry],
    current_task_id: Option<&TaskId>,
    options: &ProjectionOptions,
) -> Vec<DayGroup> {
    let mut groups: Vec<DayGroup> = Vec::new();

    for entry in entries {
        let day = pacific_day(entry.start_ms);
        let starts_new_group = match (groups.last(), day) {
            (None, _) => true,
            (Some(last), Some(day)) => last.day != Some(day),
            (Some(_), None) => false,
        };
        if starts_new_group {
            groups.push(DayGroup::new(day));
        }

        let Some(group) = groups.last_mut() else {
            continue;
        };
        if day.is_some() {
            group.total_ms = group.total_ms.saturating_add(entry.duration_ms);
        }
        group.items.push(ViewEntry {
            is_running: entry.is_running
                || (entry.task_id.is_some() && entry.task_id.as_ref() == current_task_id),
            entry: entry.clone(),
        });
    }

    let needle = options.needle();
    for group in &mut groups {
        if options.hide_daily_duplicates {
            let mut seen = HashSet::new();
            group.items.retain(|item| match &item.entry.task_id {
                Some(task_id) => seen.insert(task_id.clone()),
                None => true,
            });
        }
        if let Some(needle) = &needle {
            group.items.retain(|item| matches_search(&item.entry, needle));
        }
    }
    groups.retain(|g| !g.items.is_empty());
    groups
}

fn matches_search(entry: &TimeEntry, needle: &str) -> bool {
    entry
        .task_name
        .as_deref()
        .is_some_and(|name| name.to_lowercase().contains(needle))
}

/// `1h 02m`, or `12m` under an hour.
pub fn format_duration(ms: i64) -> String {
    let minutes = ms.max(0) / 60_000;
    let (hours, minutes) = (minutes / 60, minutes % 60);
    if hours > 0 {
        format!("{}h {:02}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// `HH:MM:SS` for the live header clock.
pub fn format_clock(ms: i64) -> String {
    let secs = ms.max(0) / 1000;
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Elapsed time of a timer started at `start_ms`; 0 when the start is unknown.
pub fn running_elapsed_ms(start_ms: i64, now_ms: i64) -> i64 {
    if start_ms == 0 {
        return 0;
    }
    now_ms.saturating_sub(start_ms).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::DAY_MS;

    // 2024-03-05T20:00:00Z, midday in Los Angeles.
    const TUESDAY_NOON: i64 = 1_709_668_800_000;
    const HOUR: i64 = 60 * 60 * 1000;

    fn entry(id: &str, task: &str, name: &str, start_ms: i64, duration_ms: i64) -> TimeEntry {
        TimeEntry::normalize(id, start_ms, start_ms + duration_ms, duration_ms)
            .with_task(Some(task), Some(name))
    }

    fn ids(group: &DayGroup) -> Vec<&str> {
        group.items.iter().map(|i| i.entry.id.as_str()).collect()
    }

    fn hide_duplicates() -> ProjectionOptions {
        ProjectionOptions {
            hide_daily_duplicates: true,
            ..Default::default()
        }
    }

    #[test]
    fn duplicate_on_same_day_keeps_most_recent() {
        let entries = vec![entry("new", "A", "Alpha", 100, 100), entry("old", "A", "Alpha", 50, 100)];

        let groups = project(&entries, None, &hide_duplicates());

        assert_eq!(groups.len(), 1);
        assert_eq!(ids(&groups[0]), vec!["new"]);
        assert_eq!(groups[0].total_ms, 200);
    }

    #[test]
    fn duplicates_are_scoped_per_day() {
        let entries = vec![
            entry("1", "A", "Alpha", TUESDAY_NOON, HOUR),
            entry("2", "B", "Beta", TUESDAY_NOON - HOUR, HOUR),
            entry("3", "A", "Alpha", TUESDAY_NOON - 2 * HOUR, HOUR),
            entry("4", "A", "Alpha", TUESDAY_NOON - DAY_MS, HOUR),
        ];

        let plain = project(&entries, None, &ProjectionOptions::default());
        let deduped = project(&entries, None, &hide_duplicates());

        assert_eq!(ids(&deduped[0]), vec!["1", "2"]);
        assert_eq!(ids(&deduped[1]), vec!["4"]);
        for (p, d) in plain.iter().zip(&deduped) {
            assert!(d.items.len() <= p.items.len());
            assert_eq!(d.total_ms, p.total_ms);
        }
    }

    #[test]
    fn days_follow_pacific_calendar() {
        // 06:00 UTC on Wednesday is still Tuesday evening in Los Angeles.
        let late = TUESDAY_NOON + 10 * HOUR;
        let groups = project(
            &[entry("1", "A", "Alpha", late, HOUR), entry("2", "A", "Alpha", TUESDAY_NOON, HOUR)],
            None,
            &ProjectionOptions::default(),
        );

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].day, NaiveDate::from_ymd_opt(2024, 3, 5));
        assert_eq!(groups[0].label.as_deref(), Some("Tue 2024-03-05"));
    }

    #[test]
    fn search_filters_rows_but_not_totals() {
        let entries = vec![
            entry("1", "A", "Write Docs", TUESDAY_NOON, HOUR),
            entry("2", "B", "Review", TUESDAY_NOON - HOUR, 2 * HOUR),
            entry("3", "C", "Review", TUESDAY_NOON - DAY_MS, HOUR),
        ];
        let options = ProjectionOptions {
            search_text: "  docs ".to_string(),
            ..Default::default()
        };

        let groups = project(&entries, None, &options);

        assert_eq!(groups.len(), 1);
        assert_eq!(ids(&groups[0]), vec!["1"]);
        assert_eq!(groups[0].total_ms, 3 * HOUR);
    }

    #[test]
    fn unnamed_entries_never_match_search() {
        let unnamed = TimeEntry::normalize("1", TUESDAY_NOON, TUESDAY_NOON + 1, 1).with_task(Some("A"), None);
        let options = ProjectionOptions {
            search_text: "a".to_string(),
            ..Default::default()
        };
        assert!(project(&[unnamed], None, &options).is_empty());
    }

    #[test]
    fn current_task_is_shown_running() {
        let entries = vec![
            entry("1", "A", "Alpha", TUESDAY_NOON, HOUR),
            entry("2", "B", "Beta", TUESDAY_NOON - HOUR, HOUR),
        ];
        let current = TaskId::parse("B").unwrap();

        let groups = project(&entries, Some(&current), &ProjectionOptions::default());

        let running: Vec<bool> = groups[0].items.iter().map(|i| i.is_running).collect();
        assert_eq!(running, vec![false, true]);
    }

    #[test]
    fn undated_entries_stay_inline_without_counting() {
        let entries = vec![
            entry("dated", "A", "Alpha", TUESDAY_NOON, HOUR),
            entry("undated", "B", "Beta", 0, HOUR),
        ];

        let groups = project(&entries, None, &ProjectionOptions::default());

        assert_eq!(groups.len(), 1);
        assert_eq!(ids(&groups[0]), vec!["dated", "undated"]);
        assert_eq!(groups[0].total_ms, HOUR);
    }

    #[test]
    fn leading_undated_entries_get_an_unlabeled_group() {
        let groups = project(&[entry("u", "A", "Alpha", 0, HOUR)], None, &ProjectionOptions::default());

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].label, None);
        assert_eq!(groups[0].total_ms, 0);
    }

    #[test]
    fn nothing_projects_to_no_groups() {
        assert!(project(&[], None, &ProjectionOptions::default()).is_empty());
        assert!(project(&[], None, &hide_duplicates()).is_empty());
    }

    #[test]
    fn fully_filtered_days_are_dropped_and_others_keep_full_totals() {
        let entries = vec![
            entry("1", "A", "Alpha", TUESDAY_NOON, HOUR),
            entry("2", "A", "Alpha", TUESDAY_NOON - HOUR, 2 * HOUR),
            entry("3", "B", "Beta", TUESDAY_NOON - DAY_MS, HOUR),
        ];

        let nothing_matches = ProjectionOptions {
            search_text: "gamma".to_string(),
            ..Default::default()
        };
        assert!(project(&entries, None, &nothing_matches).is_empty());

        let deduped_and_searched = ProjectionOptions {
            hide_daily_duplicates: true,
            search_text: "alpha".to_string(),
        };
        let groups = project(&entries, None, &deduped_and_searched);
        assert_eq!(groups.len(), 1);
        assert_eq!(ids(&groups[0]), vec!["1"]);
        assert_eq!(groups[0].total_ms, 3 * HOUR);
    }

    #[test]
    fn durations_format() {
        assert_eq!(format_duration(0), "0m");
        assert_eq!(format_duration(12 * 60_000 + 59_000), "12m");
        assert_eq!(format_duration(62 * 60_000), "1h 02m");
        assert_eq!(format_clock(3_723_000), "01:02:03");
    }

    #[test]
    fn elapsed_never_negative() {
        assert_eq!(running_elapsed_ms(5_000, 8_000), 3_000);
        assert_eq!(running_elapsed_ms(5_000, 1_000), 0);
        assert_eq!(running_elapsed_ms(0, 8_000), 0);
        assert_eq!(running_elapsed_ms(i64::MIN, 8_000), i64::MAX);
    }
}
