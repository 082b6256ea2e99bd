//! Numbers command: count, sum and frequency of a list of numbers.

use std::fmt::Write;

use anyhow::Result;
use punch_core::NumberSummary;
use serde::Serialize;

use super::util::{Input, progress_bar};

/// Width of the frequency bars.
const BAR_WIDTH: usize = 20;

/// Formats a difference with an explicit sign for positive values.
fn format_diff(diff: f64) -> String {
    if diff > 0.0 {
        format!("+{diff}")
    } else {
        format!("{diff}")
    }
}

/// Formats the human-readable summary.
pub fn format_summary(summary: &NumberSummary) -> String {
    let mut output = String::new();

    writeln!(output, "Count:     {}", summary.count).unwrap();
    writeln!(output, "Sum:       {}", summary.sum).unwrap();
    writeln!(output, "Standard:  {}", summary.standard).unwrap();
    writeln!(output, "Diff:      {}", format_diff(summary.diff)).unwrap();

    writeln!(output).unwrap();
    writeln!(output, "FREQUENCY").unwrap();
    writeln!(output, "─────────").unwrap();

    let max = summary.max_frequency();
    for entry in &summary.frequencies {
        let value = entry.value.to_string();
        let bar = progress_bar(entry.count, max, BAR_WIDTH);
        writeln!(output, "{value:>10}  {bar}  x{}", entry.count).unwrap();
    }

    output
}

/// JSON summary structure.
#[derive(Debug, Serialize)]
pub struct JsonSummary {
    pub source: String,
    pub count: usize,
    pub sum: f64,
    pub standard: f64,
    pub diff: f64,
    pub frequencies: Vec<JsonFrequency>,
}

#[derive(Debug, Serialize)]
pub struct JsonFrequency {
    pub value: f64,
    pub count: usize,
}

/// Formats the summary as JSON.
pub fn format_summary_json(source: &str, summary: &NumberSummary) -> Result<String> {
    let json = JsonSummary {
        source: source.to_string(),
        count: summary.count,
        sum: summary.sum,
        standard: summary.standard,
        diff: summary.diff,
        frequencies: summary
            .frequencies
            .iter()
            .map(|f| JsonFrequency {
                value: f.value,
                count: f.count,
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&json)?)
}

/// Runs the numbers command.
pub fn run(input: &Input, standard: f64, json: bool) -> Result<()> {
    let summary = punch_core::summarize_numbers(&input.text, standard)?;

    if json {
        println!("{}", format_summary_json(&input.name, &summary)?);
    } else {
        print!("{}", format_summary(&summary));
    }

    Ok(())
}
