use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

/// Offset-less layouts accepted in addition to RFC 3339. Interpreted as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parse a catalog or caller timestamp.
///
/// Accepts RFC 3339 (`Z` or `±HH:MM`), a naive `YYYY-MM-DDTHH:MM:SS[.fff]`
/// and a bare `YYYY-MM-DD`. Naive forms are taken as UTC. Returns `None`
/// for anything else, including empty input.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt);
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(naive.and_utc().fixed_offset());
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}

/// Serde adapter for `received_at`: writes RFC 3339 UTC, reads anything
/// [`parse_timestamp`] accepts so logs from older writers still decode.
pub mod lenient_utc {
    use chrono::{DateTime, Utc};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {raw}")))
    }
}
