use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A numeric field that ClickUp sends either as a JSON number or as a string
/// of digits, depending on the endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    Int(i64),
    Float(f64),
    Text(String),
    Other(Value),
}

impl Default for LooseNumber {
    fn default() -> Self {
        LooseNumber::Other(Value::Null)
    }
}

impl From<i64> for LooseNumber {
    fn from(value: i64) -> Self {
        LooseNumber::Int(value)
    }
}

impl From<&str> for LooseNumber {
    fn from(value: &str) -> Self {
        LooseNumber::Text(value.to_string())
    }
}

impl LooseNumber {
    /// Coerce to milliseconds. Strings must match `^-?\d+$`; anything that is
    /// not a finite number or such a string becomes 0.
    pub fn as_millis(&self) -> i64 {
        match self {
            LooseNumber::Int(n) => *n,
            LooseNumber::Float(f) if f.is_finite() => *f as i64,
            LooseNumber::Float(_) => 0,
            LooseNumber::Text(s) => parse_signed_digits(s).unwrap_or(0),
            LooseNumber::Other(_) => 0,
        }
    }
}

fn parse_signed_digits(s: &str) -> Option<i64> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Accepts a string or a number; everything else is `None`. An empty string is kept, since
/// a present id marks a running timer even when it is blank.
pub(crate) fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Accepts only JSON strings.
pub(crate) fn string_only<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

pub(crate) fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn loose(value: Value) -> LooseNumber {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn numbers_pass_through() {
        assert_eq!(loose(json!(1700000000000_i64)).as_millis(), 1700000000000);
        assert_eq!(loose(json!(-1700000000000_i64)).as_millis(), -1700000000000);
    }

    #[test]
    fn floats_are_truncated() {
        assert_eq!(loose(json!(1500.9)).as_millis(), 1500);
    }

    #[test]
    fn digit_strings_are_parsed() {
        assert_eq!(loose(json!("1700000000000")).as_millis(), 1700000000000);
        assert_eq!(loose(json!("-3600000")).as_millis(), -3600000);
    }

    #[test]
    fn non_conforming_strings_become_zero() {
        for s in ["", "-", "+5", " 12", "12 ", "1e3", "12.5", "abc", "--1"] {
            assert_eq!(loose(json!(s)).as_millis(), 0, "{s:?}");
        }
    }

    #[test]
    fn out_of_range_strings_become_zero() {
        assert_eq!(loose(json!("99999999999999999999")).as_millis(), 0);
    }

    #[test]
    fn other_values_become_zero() {
        assert_eq!(loose(json!(null)).as_millis(), 0);
        assert_eq!(loose(json!(true)).as_millis(), 0);
        assert_eq!(loose(json!({ "ms": 1 })).as_millis(), 0);
        assert_eq!(LooseNumber::default().as_millis(), 0);
    }
}
