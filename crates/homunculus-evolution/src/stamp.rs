//! Timestamp parsing that also accepts zone-less ISO-8601 (read as UTC).
//!
//! Documents written before schema v2 stored naive local timestamps such as
//! `2025-03-01T12:00:00.123456`. Serialization always emits RFC 3339.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_naive_and_rfc3339() {
        assert!(parse("2025-03-01T12:00:00.123456").is_some());
        assert!(parse("2025-03-01T12:00:00").is_some());
        assert!(parse("2025-03-01T12:00:00+02:00").is_some());
        assert!(parse("yesterday").is_none());
    }
}
