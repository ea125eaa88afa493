use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Days are grouped in ClickUp's workspace timezone, not the machine's.
pub const DISPLAY_TZ: Tz = chrono_tz::America::Los_Angeles;

pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// The Pacific calendar day containing `ms`. `None` for a zero or
/// out-of-range timestamp.
pub fn pacific_day(ms: i64) -> Option<NaiveDate> {
    if ms == 0 {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis(ms).map(|dt| dt.with_timezone(&DISPLAY_TZ).date_naive())
}

/// Local wall-clock `HH:MM` for a timestamp, for the entry list.
pub fn pacific_clock(ms: i64) -> Option<String> {
    if ms == 0 {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis(ms)
        .map(|dt| dt.with_timezone(&DISPLAY_TZ).format("%H:%M").to_string())
}
