//! Summary statistics for a loose list of numbers checked against a target.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Leading decimal number of a token, e.g. `12.5` in `12.5kg`.
static NUMBER_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?").unwrap()
});

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NumbersError {
    #[error("no numbers found in input")]
    Empty,
}

/// How often one value occurs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frequency {
    pub value: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberSummary {
    pub count: usize,
    pub sum: f64,
    pub standard: f64,
    /// `sum - standard`.
    pub diff: f64,
    /// Distinct values in ascending order.
    pub frequencies: Vec<Frequency>,
}

impl NumberSummary {
    /// Highest occurrence count, used to scale frequency bars.
    pub fn max_frequency(&self) -> usize {
        self.frequencies.iter().map(|f| f.count).max().unwrap_or(0)
    }
}

/// Extracts numbers from text separated by whitespace or commas.
///
/// Each token contributes its leading number; tokens without one are skipped.
pub fn parse_numbers(input: &str) -> Vec<f64> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .filter_map(|token| NUMBER_PREFIX_RE.find(token))
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .collect()
}

/// Counts, sums and compares the numbers in `input` against `standard`.
pub fn summarize_numbers(input: &str, standard: f64) -> Result<NumberSummary, NumbersError> {
    let mut numbers = parse_numbers(input);
    if numbers.is_empty() {
        return Err(NumbersError::Empty);
    }

    let count = numbers.len();
    let sum: f64 = numbers.iter().sum();

    numbers.sort_by(f64::total_cmp);
    let mut frequencies: Vec<Frequency> = Vec::new();
    for value in numbers {
        // -0.0 + 0.0 is 0.0, so both zeros share an entry
        let value = value + 0.0;
        match frequencies.last_mut() {
            Some(last) if last.value.total_cmp(&value).is_eq() => last.count += 1,
            _ => frequencies.push(Frequency { value, count: 1 }),
        }
    }

    tracing::debug!(count, sum, distinct = frequencies.len(), "summarized numbers");

    Ok(NumberSummary {
        count,
        sum,
        standard,
        diff: sum - standard,
        frequencies,
    })
}
