//! Timestamps as SQLite stores them: `CURRENT_TIMESTAMP` text in UTC.

use chrono::NaiveDateTime;

/// Format produced by SQLite's `CURRENT_TIMESTAMP`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Forms accepted on read; `%.f` also matches no fractional part
const ACCEPTED_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse a stored or user-supplied timestamp.
///
/// Accepts the SQLite form (`2024-05-01 12:30:00`) and the ISO form with a `T`
/// separator, either with fractional seconds or a trailing `Z`, since all of
/// these show up in hand-written fixtures.
pub fn parse(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    let raw = raw.strip_suffix('Z').unwrap_or(raw);
    ACCEPTED_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

pub fn format(value: &NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

// Custom serde module so JSON carries the same text the database holds
pub mod serde_format {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format(date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", s)))
    }

    pub mod option {
        use chrono::NaiveDateTime;
        use serde::{self, Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(date: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match date {
                Some(date) => serializer.serialize_some(&super::super::format(date)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let raw = Option::<String>::deserialize(deserializer)?;
            raw.map(|s| {
                super::super::parse(&s)
                    .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", s)))
            })
            .transpose()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_sqlite_and_iso_forms() {
        let sqlite = parse("2024-05-01 12:30:00").expect("sqlite form");
        let iso = parse("2024-05-01T12:30:00").expect("iso form");
        assert_eq!(sqlite, iso);
        assert_eq!(format(&sqlite), "2024-05-01 12:30:00");
    }

    #[test]
    fn test_parse_fractional_seconds() {
        let parsed = parse("2024-05-01 12:30:00.123").expect("fractional form");
        assert_eq!(parsed.nanosecond(), 123_000_000);
        assert_eq!(format(&parsed), "2024-05-01 12:30:00");

        assert!(parse("2024-05-01T12:30:00.5Z").is_some());
    }

    #[test]
    fn test_parse_rejects_bad_time() {
        assert!(parse("2024-05-01 25:61:00").is_none());
        assert!(parse("yesterday").is_none());
        assert!(parse("").is_none());
    }
}
