//! WAL record definitions

use std::fmt;
use std::str::FromStr;

/// A single `(key, value)` write as stored in the log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogRecord {
    pub key: i64,
    pub value: i64,
}

impl LogRecord {
    pub fn new(key: i64, value: i64) -> Self {
        Self { key, value }
    }
}

/// Renders the on-disk form without the trailing newline
impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.key, self.value)
    }
}

/// A line that is not exactly `<i64>,<i64>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRecordError;

impl fmt::Display for ParseRecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected `<key>,<value>` with integer fields")
    }
}

impl std::error::Error for ParseRecordError {}

impl FromStr for LogRecord {
    type Err = ParseRecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, value) = s.split_once(',').ok_or(ParseRecordError)?;
        let key = key.parse().map_err(|_| ParseRecordError)?;
        let value = value.parse().map_err(|_| ParseRecordError)?;
        Ok(Self { key, value })
    }
}
