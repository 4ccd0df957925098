//! Gateway timestamps.
//!
//! The gateway exchanges wall-clock times as `YYYY-MM-DD HH:MM:SS` strings in
//! local (China Standard) time, both in the `timestamp` request field and in
//! response and notification fields such as `gmt_payment` and `notify_time`.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A timestamp in the gateway's `YYYY-MM-DD HH:MM:SS` layout.
///
/// # Serialization
///
/// Serialized as a string in that layout:
///
/// ```json
/// "2024-03-01 09:30:00"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Ord, Eq, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// The `strftime` layout used on the wire.
    pub const LAYOUT: &'static str = "%Y-%m-%d %H:%M:%S";

    /// Returns the current local time.
    #[must_use]
    pub fn now() -> Self {
        Self(Local::now().naive_local())
    }

    /// Wraps a naive date-time.
    #[must_use]
    pub const fn from_naive(datetime: NaiveDateTime) -> Self {
        Self(datetime)
    }

    /// Returns the underlying naive date-time.
    #[must_use]
    pub const fn as_naive(&self) -> &NaiveDateTime {
        &self.0
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(Self::LAYOUT))
    }
}

impl FromStr for Timestamp {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDateTime::parse_from_str(s.trim(), Self::LAYOUT).map(Self)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse()
            .map_err(|_| serde::de::Error::custom("timestamp must be formatted as YYYY-MM-DD HH:MM:SS"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> Timestamp {
        let datetime = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 5, 7)
            .unwrap();
        Timestamp::from_naive(datetime)
    }

    #[test]
    fn test_display_uses_gateway_layout() {
        assert_eq!(sample().to_string(), "2024-03-01 09:05:07");
    }

    #[test]
    fn test_parse() {
        let parsed: Timestamp = "2024-03-01 09:05:07".parse().unwrap();
        assert_eq!(parsed, sample());
        assert!("2024-03-01T09:05:07".parse::<Timestamp>().is_err());
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(json, "\"2024-03-01 09:05:07\"");
        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
        assert!(serde_json::from_str::<Timestamp>("\"yesterday\"").is_err());
    }

    #[test]
    fn test_now_has_no_fractional_seconds_on_wire() {
        let text = Timestamp::now().to_string();
        assert_eq!(text.len(), "YYYY-MM-DD HH:MM:SS".len());
    }
}
