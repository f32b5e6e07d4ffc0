//! Lenient `LocalDate` decoding.
//!
//! Depending on the backend's Jackson settings a date arrives either as
//! `"2024-03-09"` (possibly with a time suffix) or as `[2024, 3, 9]`.
//! Anything else decodes to `None`.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDate {
    Text(String),
    Parts(Vec<i64>),
    Other(serde_json::Value),
}

pub fn parse(text: &str) -> Option<NaiveDate> {
    let head = text.get(..10).unwrap_or(text);
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawDate>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawDate::Text(text)) => parse(&text),
        Some(RawDate::Parts(parts)) if parts.len() >= 3 => {
            let month = u32::try_from(parts[1]).ok();
            let day = u32::try_from(parts[2]).ok();
            match (i32::try_from(parts[0]).ok(), month, day) {
                (Some(y), Some(m), Some(d)) => NaiveDate::from_ymd_opt(y, m, d),
                _ => None,
            }
        }
        _ => None,
    })
}

pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match date {
        Some(date) => serializer.serialize_str(&date.format("%Y-%m-%d").to_string()),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Debug, Deserialize, Serialize)]
    struct Probe {
        #[serde(default, with = "super")]
        at: Option<NaiveDate>,
    }

    fn parse_at(json: &str) -> Option<NaiveDate> {
        serde_json::from_str::<Probe>(json).unwrap().at
    }

    #[test]
    fn test_accepts_string_and_array_forms() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 9);
        assert_eq!(parse_at(r#"{"at":"2024-03-09"}"#), expected);
        assert_eq!(parse_at(r#"{"at":"2024-03-09T10:00:00"}"#), expected);
        assert_eq!(parse_at(r#"{"at":[2024,3,9]}"#), expected);
    }

    #[test]
    fn test_missing_null_and_garbage_are_none() {
        assert_eq!(parse_at(r#"{}"#), None);
        assert_eq!(parse_at(r#"{"at":null}"#), None);
        assert_eq!(parse_at(r#"{"at":"soon"}"#), None);
        assert_eq!(parse_at(r#"{"at":{"y":1}}"#), None);
    }

    #[test]
    fn test_serializes_iso_date() {
        let value = serde_json::to_value(Probe {
            at: NaiveDate::from_ymd_opt(2024, 1, 31),
        })
        .unwrap();
        assert_eq!(value["at"], "2024-01-31");
    }
}
