//! Clock-face times and timestamp extraction from free text.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

/// Minutes in one calendar day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Matches `H:MM`, `HH:MM`, and the degenerate end-of-day form `24:0`.
///
/// ASCII digits only; `\d` would also accept other Unicode digit classes.
static TIMESTAMP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{1,2}:[0-9]{2}|24:0").unwrap());

/// Errors from parsing a single `HH:MM` timestamp.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    /// No `:` separator, or a component that is not a number.
    #[error("not an HH:MM timestamp")]
    Malformed,

    /// Hour outside 0-23 (24 is only allowed as 24:00).
    #[error("hour {hour} out of range")]
    HourOutOfRange { hour: u32 },

    /// Minute outside 0-59.
    #[error("minute {minute} out of range")]
    MinuteOutOfRange { minute: u32 },
}

/// A wall-clock time within a single day.
///
/// `24:00` is representable and means the midnight at the end of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// End-of-day midnight.
    pub const END_OF_DAY: Self = Self {
        hour: 24,
        minute: 0,
    };

    /// Creates a validated time of day.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "both components are range-checked before narrowing"
    )]
    pub fn new(hour: u32, minute: u32) -> Result<Self, TimeParseError> {
        if hour == 24 && minute == 0 {
            return Ok(Self::END_OF_DAY);
        }
        if hour > 23 {
            return Err(TimeParseError::HourOutOfRange { hour });
        }
        if minute > 59 {
            return Err(TimeParseError::MinuteOutOfRange { minute });
        }
        Ok(Self {
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    #[must_use]
    pub fn hour(&self) -> u32 {
        u32::from(self.hour)
    }

    #[must_use]
    pub fn minute(&self) -> u32 {
        u32::from(self.minute)
    }

    /// Minutes since the start of the day, `0..=1440`.
    #[must_use]
    pub fn minute_of_day(&self) -> u32 {
        self.hour() * 60 + self.minute()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "24:00" || s == "24:0" {
            return Ok(Self::END_OF_DAY);
        }

        let (hour, minute) = s.split_once(':').ok_or(TimeParseError::Malformed)?;
        let hour: u32 = hour.parse().map_err(|_| TimeParseError::Malformed)?;
        let minute: u32 = minute.parse().map_err(|_| TimeParseError::Malformed)?;
        Self::new(hour, minute)
    }
}

/// Returns every timestamp-shaped substring of `line`, left to right.
///
/// Surrounding text is ignored. Matches are not validated here; `24:30` or
/// `7:75` are returned as-is and rejected later by [`TimeOfDay::from_str`].
pub fn extract_timestamps(line: &str) -> Vec<&str> {
    TIMESTAMP_RE.find_iter(line).map(|m| m.as_str()).collect()
}
