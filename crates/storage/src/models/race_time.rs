use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// Legacy marker for "no time recorded / did not finish". Never a real time.
pub const NO_TIME_SENTINEL: &str = "99:99:99";

/// An elapsed course time in fixed-width, zero-padded `HH:MM:SS` form.
///
/// Because the encoding is fixed-width, ordering the text lexically is the same as
/// ordering the durations chronologically, so `Ord` is derived on the string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RaceTime(String);

impl RaceTime {
    /// Parses a real time. Hours run 00-99, minutes and seconds 00-59.
    pub fn parse(value: &str) -> Result<Self, StorageError> {
        let bytes = value.as_bytes();
        let well_formed = bytes.len() == 8
            && bytes[2] == b':'
            && bytes[5] == b':'
            && [0, 1, 3, 4, 6, 7].iter().all(|&i| bytes[i].is_ascii_digit());

        if !well_formed {
            return Err(StorageError::malformed(format!(
                "time '{value}' is not in HH:MM:SS form"
            )));
        }

        let minutes = (bytes[3] - b'0') * 10 + (bytes[4] - b'0');
        let seconds = (bytes[6] - b'0') * 10 + (bytes[7] - b'0');
        if minutes > 59 || seconds > 59 {
            return Err(StorageError::malformed(format!("time '{value}' is out of range")));
        }

        Ok(Self(value.to_string()))
    }

    /// Parses a stored or submitted result value, mapping the legacy sentinel to `None`.
    pub fn parse_record(value: &str) -> Result<Option<Self>, StorageError> {
        if value == NO_TIME_SENTINEL {
            return Ok(None);
        }
        Self::parse(value).map(Some)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RaceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RaceTime {
    type Error = StorageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RaceTime> for String {
    fn from(time: RaceTime) -> Self {
        time.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_time() {
        let time = RaceTime::parse("01:05:09").unwrap();
        assert_eq!(time.as_str(), "01:05:09");
    }

    #[test]
    fn test_rejects_malformed_times() {
        for value in ["1:05:09", "01:5:09", "01-05-09", "01:05:09 ", "aa:bb:cc", "", "01:60:00"] {
            assert!(RaceTime::parse(value).is_err(), "{value} should be rejected");
        }
    }

    #[test]
    fn test_sentinel_is_never_a_real_time() {
        assert!(RaceTime::parse(NO_TIME_SENTINEL).is_err());
        assert_eq!(RaceTime::parse_record(NO_TIME_SENTINEL).unwrap(), None);
        assert!(RaceTime::parse_record("00:42:17").unwrap().is_some());
    }

    #[test]
    fn test_lexical_order_is_chronological() {
        let a = RaceTime::parse("00:59:59").unwrap();
        let b = RaceTime::parse("01:00:00").unwrap();
        let c = RaceTime::parse("10:00:00").unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_serde_uses_plain_string() {
        let time: RaceTime = serde_json::from_str("\"00:14:50\"").unwrap();
        assert_eq!(serde_json::to_string(&time).unwrap(), "\"00:14:50\"");
        assert!(serde_json::from_str::<RaceTime>("\"99:99:99\"").is_err());
    }
}
