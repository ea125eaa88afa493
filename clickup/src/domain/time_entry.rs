use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{lenient_bool, lenient_id, string_only, LooseNumber};

/// A time entry as returned by the `time_entries` endpoints.
///
/// Every field is optional on the wire and decoded leniently so one odd entry
/// never fails a whole listing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawTimeEntry {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_task")]
    pub task: Option<RawTask>,
    #[serde(default)]
    pub start: LooseNumber,
    #[serde(default)]
    pub end: LooseNumber,
    /// Negative while the timer is still running.
    #[serde(default)]
    pub duration: LooseNumber,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub billable: bool,
}

impl RawTimeEntry {
    pub fn task_id(&self) -> Option<&str> {
        self.task.as_ref().and_then(RawTask::id)
    }

    pub fn task_name(&self) -> Option<&str> {
        self.task.as_ref().and_then(RawTask::name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawTask {
    #[serde(default, deserialize_with = "string_only")]
    id: Option<String>,
    #[serde(default, deserialize_with = "string_only")]
    name: Option<String>,
}

impl RawTask {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
        }
    }

    /// Trimmed task id, `None` when blank.
    pub fn id(&self) -> Option<&str> {
        trimmed(self.id.as_deref())
    }

    /// Trimmed task name, `None` when blank.
    pub fn name(&self) -> Option<&str> {
        trimmed(self.name.as_deref())
    }
}

fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn lenient_task<'de, D>(deserializer: D) -> Result<Option<RawTask>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => serde_json::from_value(value).ok(),
        _ => None,
    })
}

/// Body of `POST /team/{team_id}/time_entries/start`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StartTimerPayload {
    pub tid: String,
}

impl StartTimerPayload {
    pub fn new(task_id: impl Into<String>) -> Self {
        Self {
            tid: task_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_mixed_encodings() {
        let entry: RawTimeEntry = serde_json::from_value(json!({
            "id": "4021",
            "task": { "id": " 86a1b ", "name": "Write report" },
            "start": "1700000000000",
            "end": 1700000360000_i64,
            "duration": "360000",
            "billable": true
        }))
        .unwrap();

        assert_eq!(entry.id.as_deref(), Some("4021"));
        assert_eq!(entry.task_id(), Some("86a1b"));
        assert_eq!(entry.task_name(), Some("Write report"));
        assert_eq!(entry.start.as_millis(), 1700000000000);
        assert_eq!(entry.end.as_millis(), 1700000360000);
        assert_eq!(entry.duration.as_millis(), 360000);
        assert!(entry.billable);
    }

    #[test]
    fn numeric_id_is_stringified() {
        let entry: RawTimeEntry = serde_json::from_value(json!({ "id": 77 })).unwrap();
        assert_eq!(entry.id.as_deref(), Some("77"));
    }

    #[test]
    fn blank_or_non_string_task_ids_are_absent() {
        let blank: RawTimeEntry =
            serde_json::from_value(json!({ "task": { "id": "   ", "name": "x" } })).unwrap();
        assert_eq!(blank.task_id(), None);

        let numeric: RawTimeEntry =
            serde_json::from_value(json!({ "task": { "id": 12, "name": "x" } })).unwrap();
        assert_eq!(numeric.task_id(), None);

        let not_an_object: RawTimeEntry =
            serde_json::from_value(json!({ "task": "-" })).unwrap();
        assert!(not_an_object.task.is_none());
    }

    #[test]
    fn missing_fields_default() {
        let entry: RawTimeEntry = serde_json::from_value(json!({})).unwrap();
        assert_eq!(entry, RawTimeEntry::default());
        assert!(!entry.billable);
    }

    #[test]
    fn start_payload_serializes_tid() {
        let body = serde_json::to_value(StartTimerPayload::new("abc")).unwrap();
        assert_eq!(body, json!({ "tid": "abc" }));
    }
}
