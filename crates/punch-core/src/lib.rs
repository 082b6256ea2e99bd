//! Core domain logic for punch-clock attendance analysis.
//!
//! This crate contains:
//! - Clock parsing: `HH:MM` timestamps pulled out of free text
//! - Timeline: placing punches across midnight without reordering them
//! - Attendance: pairing punches into sessions, rounding, no-gap detection, totals
//! - Numbers: count/sum/frequency summary of a loose list of numbers

pub mod attendance;
pub mod clock;
pub mod numbers;
pub mod timeline;

pub use attendance::{
    AdjacencyKind, AdjacencyTag, AggregateResult, AnalyzerConfig, DayRecord, InvalidLine,
    LineError, LineOutcome, Session, analyze, analyze_line, analyze_many, analyze_with,
};
pub use clock::{TimeOfDay, TimeParseError, extract_timestamps};
pub use numbers::{Frequency, NumberSummary, NumbersError, parse_numbers, summarize_numbers};
pub use timeline::{TimePoint, build_timeline};
