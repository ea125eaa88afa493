use serde::de::DeserializeOwned;
use serde_json::Value;

/// ClickUp wraps most payloads in `{ "data": ... }`. Decoding is lenient: an
/// absent, null or malformed `data` member yields `None` instead of an error.
#[derive(Debug)]
pub struct DataEnvelope(Value);

impl DataEnvelope {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn data<T: DeserializeOwned>(self) -> Option<T> {
        let data = match self.0 {
            Value::Object(mut map) => map.remove("data")?,
            _ => return None,
        };
        if data.is_null() {
            return None;
        }

        serde_json::from_value(data)
            .map_err(|e| tracing::warn!("Ignoring malformed ClickUp payload: {}", e))
            .ok()
    }

    /// Decode `data` as a list, skipping elements that do not decode.
    pub fn data_list<T: DeserializeOwned>(self) -> Vec<T> {
        let Some(items) = self.data::<Vec<Value>>() else {
            return Vec::new();
        };

        items
            .into_iter()
            .filter_map(|item| {
                serde_json::from_value(item)
                    .map_err(|e| tracing::warn!("Skipping malformed ClickUp list item: {}", e))
                    .ok()
            })
            .collect()
    }
}
