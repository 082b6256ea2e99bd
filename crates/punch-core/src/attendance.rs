//! Attendance analysis: punches per line, paired into work sessions.
//!
//! Each non-blank input line is one workday of clock-in/clock-out punches.
//!
//! # Algorithm Summary
//!
//! 1. Extract `HH:MM` timestamps in the order written (never sorted)
//! 2. Place them on a timeline, rolling to the next day when the clock goes backwards
//! 3. Pair points `(0,1), (2,3), ...` into sessions and round each down to the half hour
//! 4. Tag short gaps between consecutive sessions as no-gap boundaries
//! 5. Total per day, then across all valid days
//!
//! Malformed lines are reported alongside valid ones and excluded from totals.

use std::num::NonZeroU32;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clock::{MINUTES_PER_DAY, TimeOfDay, TimeParseError, extract_timestamps};
use crate::timeline::{TimePoint, build_timeline};

/// Boundary band for a noon no-gap: [11:00, 14:00).
const NOON_BAND: std::ops::Range<u64> = 11 * 60..14 * 60;

/// Boundary band for an evening no-gap: [16:00, 19:00).
const EVENING_BAND: std::ops::Range<u64> = 16 * 60..19 * 60;

/// Default session rounding step, in minutes.
const DEFAULT_ROUNDING_STEP: NonZeroU32 = match NonZeroU32::new(30) {
    Some(step) => step,
    None => panic!("rounding step must be non-zero"),
};

/// Configuration for attendance analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Session durations are truncated to a multiple of this many minutes.
    /// Default: 30.
    pub rounding_step_minutes: NonZeroU32,

    /// Largest gap between two sessions still counted as a no-gap boundary.
    /// Default: 30.
    pub adjacency_window_minutes: u32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            rounding_step_minutes: DEFAULT_ROUNDING_STEP,
            adjacency_window_minutes: 30,
        }
    }
}

/// Why a line could not be turned into a workday.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LineError {
    /// Punches must come in clock-in/clock-out pairs.
    #[error("odd or invalid timestamp count: found {found}, expected pairs")]
    OddTimestampCount { found: usize },

    /// A timestamp-shaped substring is not a real time of day.
    #[error("invalid timestamp {raw}: {source}")]
    InvalidTimestamp {
        raw: String,
        source: TimeParseError,
    },
}

/// Where a no-gap boundary falls during the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjacencyKind {
    /// Previous session ended in [11:00, 14:00).
    Noon,
    /// Previous session ended in [16:00, 19:00).
    Evening,
    /// Any other time.
    Generic,
}

impl AdjacencyKind {
    /// Classifies a boundary by its minute of day (taken modulo one day).
    pub fn classify(minute: u64) -> Self {
        let minute_of_day = minute % u64::from(MINUTES_PER_DAY);
        if NOON_BAND.contains(&minute_of_day) {
            Self::Noon
        } else if EVENING_BAND.contains(&minute_of_day) {
            Self::Evening
        } else {
            Self::Generic
        }
    }

    /// Category name used in machine-readable output.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Noon => "noon",
            Self::Evening => "evening",
            Self::Generic => "generic",
        }
    }

    /// Human-readable label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Noon => "中午连班",
            Self::Evening => "晚上连班",
            Self::Generic => "连班",
        }
    }
}

impl std::fmt::Display for AdjacencyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A no-gap boundary between two sessions on the same line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjacencyTag {
    pub kind: AdjacencyKind,
    /// End of the earlier session.
    pub boundary: TimePoint,
    /// Minutes between the earlier session's end and the next session's start.
    pub gap_minutes: u64,
}

impl AdjacencyTag {
    pub const fn label(&self) -> &'static str {
        self.kind.label()
    }
}

/// One clock-in/clock-out pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub start: TimePoint,
    pub end: TimePoint,
    /// Elapsed minutes, never negative.
    pub raw_minutes: u64,
    /// Worked hours after truncating to the rounding step.
    pub rounded_hours: f64,
}

impl Session {
    fn new(start: TimePoint, end: TimePoint, step: NonZeroU32) -> Self {
        let raw_minutes = end.absolute_minutes.saturating_sub(start.absolute_minutes);
        Self {
            start,
            end,
            raw_minutes,
            rounded_hours: round_down_hours(raw_minutes, step),
        }
    }
}

/// Truncates minutes to a whole number of steps and converts to hours.
#[expect(
    clippy::cast_precision_loss,
    reason = "session lengths are far below 2^52 minutes"
)]
fn round_down_hours(raw_minutes: u64, step: NonZeroU32) -> f64 {
    let step = u64::from(step.get());
    (raw_minutes / step * step) as f64 / 60.0
}

/// A successfully analysed workday.
#[derive(Debug, Clone, PartialEq)]
pub struct DayRecord {
    /// 1-based line number in the input text.
    pub line_number: usize,
    pub sessions: Vec<Session>,
    pub tags: Vec<AdjacencyTag>,
    pub total_hours: f64,
    /// Number of timestamps found on the line.
    pub punch_count: usize,
}

/// A line that could not be analysed, kept for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidLine {
    pub line_number: usize,
    pub original_line: String,
    pub error: LineError,
}

/// Outcome for one non-blank input line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    Day(DayRecord),
    Invalid(InvalidLine),
}

impl LineOutcome {
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Day(day) => day.line_number,
            Self::Invalid(invalid) => invalid.line_number,
        }
    }
}

/// Result of analysing a whole block of text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateResult {
    /// Lines that produced a [`DayRecord`].
    pub valid_day_count: usize,
    /// Sum of `total_hours` over valid days.
    pub total_month_hours: f64,
    /// One entry per non-blank line, in input order.
    pub lines: Vec<LineOutcome>,
}

impl AggregateResult {
    /// Valid days, in input order.
    pub fn days(&self) -> impl Iterator<Item = &DayRecord> {
        self.lines.iter().filter_map(|outcome| match outcome {
            LineOutcome::Day(day) => Some(day),
            LineOutcome::Invalid(_) => None,
        })
    }

    /// Rejected lines, in input order.
    pub fn invalid_lines(&self) -> impl Iterator<Item = &InvalidLine> {
        self.lines.iter().filter_map(|outcome| match outcome {
            LineOutcome::Invalid(invalid) => Some(invalid),
            LineOutcome::Day(_) => None,
        })
    }
}

/// Analyses one line of punches.
pub fn analyze_line(
    line_number: usize,
    line: &str,
    config: &AnalyzerConfig,
) -> Result<DayRecord, LineError> {
    let raw = extract_timestamps(line);
    if raw.is_empty() || raw.len() % 2 != 0 {
        return Err(LineError::OddTimestampCount { found: raw.len() });
    }

    let times = raw
        .iter()
        .map(|s| {
            s.parse::<TimeOfDay>()
                .map_err(|source| LineError::InvalidTimestamp {
                    raw: (*s).to_string(),
                    source,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let points = build_timeline(&times);

    let sessions: Vec<Session> = points
        .chunks_exact(2)
        .map(|pair| Session::new(pair[0], pair[1], config.rounding_step_minutes))
        .collect();

    let tags = sessions
        .windows(2)
        .filter_map(|pair| {
            let (prev, next) = (&pair[0], &pair[1]);
            let gap = next
                .start
                .absolute_minutes
                .checked_sub(prev.end.absolute_minutes)?;
            (gap <= u64::from(config.adjacency_window_minutes)).then(|| AdjacencyTag {
                kind: AdjacencyKind::classify(prev.end.absolute_minutes),
                boundary: prev.end,
                gap_minutes: gap,
            })
        })
        .collect();

    let total_hours = sessions.iter().map(|s| s.rounded_hours).sum();

    Ok(DayRecord {
        line_number,
        sessions,
        tags,
        total_hours,
        punch_count: points.len(),
    })
}

/// Analyses text with the default configuration.
pub fn analyze(raw_text: &str) -> AggregateResult {
    analyze_with(raw_text, &AnalyzerConfig::default())
}

/// Analyses text, one workday per line. Blank lines are skipped but still
/// count towards line numbers.
pub fn analyze_with(raw_text: &str, config: &AnalyzerConfig) -> AggregateResult {
    let mut result = AggregateResult::default();

    for (index, line) in raw_text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_number = index + 1;

        match analyze_line(line_number, line, config) {
            Ok(day) => {
                result.valid_day_count += 1;
                result.total_month_hours += day.total_hours;
                result.lines.push(LineOutcome::Day(day));
            }
            Err(error) => {
                tracing::debug!(line_number, %error, "rejected attendance line");
                result.lines.push(LineOutcome::Invalid(InvalidLine {
                    line_number,
                    original_line: line.to_string(),
                    error,
                }));
            }
        }
    }

    tracing::trace!(
        lines = result.lines.len(),
        valid_days = result.valid_day_count,
        total_hours = result.total_month_hours,
        "analysed attendance text"
    );
    result
}

/// Analyses several independent texts in parallel, preserving order.
pub fn analyze_many<S>(texts: &[S], config: &AnalyzerConfig) -> Vec<AggregateResult>
where
    S: AsRef<str> + Sync,
{
    texts
        .par_iter()
        .map(|text| analyze_with(text.as_ref(), config))
        .collect()
}
