//! Serde helpers for the ISO calendar dates carried by learning plans.
//!
//! The backend stores dates as free strings, so an absent value may arrive as
//! `null`, as `""`, or occasionally with a time suffix appended.

use jiff::civil::Date;
use serde::{de, Deserialize, Deserializer, Serializer};

/// Parses `YYYY-MM-DD`, ignoring any trailing time component.
pub fn parse_date(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<Date>()
        .ok()
        .or_else(|| raw.get(..10).and_then(|day| day.parse::<Date>().ok()))
}

/// `#[serde(with = "...")]` adapter for `Option<Date>`.
pub mod optional {
    use super::*;

    pub fn serialize<S>(value: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_str(&date.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Date>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => parse_date(text)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid date: {text}"))),
        }
    }
}
