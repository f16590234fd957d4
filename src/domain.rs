use chrono::{DateTime, FixedOffset, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimestampError {
    #[error("timestamp must use 'T' between date and time: {0}")]
    Separator(String),

    #[error("timestamp must use an uppercase 'Z' for utc: {0}")]
    Designator(String),

    #[error("leap seconds are not supported: {0}")]
    LeapSecond(String),

    #[error("invalid RFC 3339 timestamp {input}: {source}")]
    Parse {
        input: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// an RFC 3339 date-time that remembers how it was written
///
/// equality covers the instant, the utc offset and whether utc was spelled
/// `Z` or `+00:00`. chrono's own `DateTime` equality only compares
/// instants, so `16:08:15+01:00` and `15:08:15Z` would collide there.
#[derive(Clone, Copy, Debug)]
pub struct Timestamp {
    value: DateTime<FixedOffset>,
    zulu: bool,
}

impl Timestamp {
    fn offset_seconds(&self) -> i32 {
        self.value.offset().local_minus_utc()
    }
}

impl FromStr for Timestamp {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // chrono also takes ' ' and 't' here
        if s.as_bytes().get(10) != Some(&b'T') {
            return Err(TimestampError::Separator(s.to_string()));
        }
        if s.ends_with('z') {
            return Err(TimestampError::Designator(s.to_string()));
        }

        let value = DateTime::parse_from_rfc3339(s).map_err(|source| TimestampError::Parse {
            input: s.to_string(),
            source,
        })?;
        if value.nanosecond() >= 1_000_000_000 {
            return Err(TimestampError::LeapSecond(s.to_string()));
        }

        Ok(Self {
            value,
            zulu: s.ends_with('Z'),
        })
    }
}

/// fractional seconds are printed without trailing zeros
impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value.format("%Y-%m-%dT%H:%M:%S"))?;

        let nanos = self.value.nanosecond();
        if nanos > 0 {
            let fraction = format!("{:09}", nanos);
            write!(f, ".{}", fraction.trim_end_matches('0'))?;
        }

        if self.zulu {
            f.write_str("Z")
        } else {
            write!(f, "{}", self.value.format("%:z"))
        }
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
            && self.offset_seconds() == other.offset_seconds()
            && self.zulu == other.zulu
    }
}

impl Eq for Timestamp {}

impl Hash for Timestamp {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.naive_utc().hash(state);
        self.offset_seconds().hash(state);
        self.zulu.hash(state);
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// a single timestamped measurement from a device
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reading {
    /// when the measurement was taken, as the device wrote it
    pub timestamp: Timestamp,
    /// measured value
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: i64,
}

impl Reading {
    #[cfg(test)]
    pub fn new(timestamp: Timestamp, count: i64) -> Self {
        Self { timestamp, count }
    }
}

/// body of `POST /post-readings`
///
/// missing and `null` fields both bind to their empty value.
#[derive(Debug, Deserialize)]
pub struct ReadingBatch {
    /// device the readings belong to
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub readings: Vec<Reading>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
