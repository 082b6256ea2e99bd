//! Hours command: worked hours from punch lines.
//!
//! This module implements `punch hours` with human-readable and JSON output.
//! Several input files are analysed in parallel and reported in argument order.

use std::fmt::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use punch_core::{AggregateResult, AnalyzerConfig, DayRecord, InvalidLine, LineOutcome};
use serde::Serialize;

use super::util::{Input, format_hours};

/// One analysed input, ready for rendering.
#[derive(Debug)]
pub struct HoursReport {
    pub source: String,
    pub result: AggregateResult,
}

/// Analyses every input with the given settings.
pub fn generate_reports(inputs: Vec<Input>, config: &AnalyzerConfig) -> Vec<HoursReport> {
    let texts: Vec<&str> = inputs.iter().map(|i| i.text.as_str()).collect();
    let results = punch_core::analyze_many(&texts, config);

    inputs
        .into_iter()
        .zip(results)
        .map(|(input, result)| HoursReport {
            source: input.name,
            result,
        })
        .collect()
}

// ========== Human-Readable Output ==========

fn write_day(output: &mut String, day: &DayRecord) {
    writeln!(
        output,
        "#{:<3} {} punches, {}",
        day.line_number,
        day.punch_count,
        format_hours(day.total_hours)
    )
    .unwrap();

    for session in &day.sessions {
        writeln!(
            output,
            "     {}-{}  ({}m)  {}",
            session.start,
            session.end,
            session.raw_minutes,
            format_hours(session.rounded_hours)
        )
        .unwrap();
    }

    for tag in &day.tags {
        writeln!(
            output,
            "     [{}] at {} ({}m gap)",
            tag.label(),
            tag.boundary,
            tag.gap_minutes
        )
        .unwrap();
    }
}

fn write_invalid(output: &mut String, invalid: &InvalidLine) {
    writeln!(output, "#{:<3} error: {}", invalid.line_number, invalid.error).unwrap();
    writeln!(output, "     > {}", invalid.original_line.trim()).unwrap();
}

/// Formats one report for the terminal.
pub fn format_report(report: &HoursReport) -> String {
    let mut output = String::new();
    let result = &report.result;

    writeln!(output, "ATTENDANCE: {}", report.source).unwrap();

    if result.lines.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "No punch lines found.").unwrap();
        return output;
    }

    writeln!(output).unwrap();
    for outcome in &result.lines {
        match outcome {
            LineOutcome::Day(day) => write_day(&mut output, day),
            LineOutcome::Invalid(invalid) => write_invalid(&mut output, invalid),
        }
    }

    // SUMMARY section
    writeln!(output).unwrap();
    writeln!(output, "SUMMARY").unwrap();
    writeln!(output, "───────").unwrap();
    writeln!(output, "Valid days:   {}", result.valid_day_count).unwrap();
    writeln!(output, "Total hours:  {:.1}", result.total_month_hours).unwrap();

    let rejected = result.invalid_lines().count();
    if rejected > 0 {
        writeln!(output, "Rejected:     {rejected} line(s)").unwrap();
    }

    output
}

/// Formats a trailing grand total across several reports.
pub fn format_grand_total(reports: &[HoursReport]) -> String {
    let days: usize = reports.iter().map(|r| r.result.valid_day_count).sum();
    let hours: f64 = reports.iter().map(|r| r.result.total_month_hours).sum();

    let mut output = String::new();
    writeln!(output, "ALL INPUTS").unwrap();
    writeln!(output, "──────────").unwrap();
    writeln!(output, "Inputs:       {}", reports.len()).unwrap();
    writeln!(output, "Valid days:   {days}").unwrap();
    writeln!(output, "Total hours:  {hours:.1}").unwrap();
    output
}

// ========== JSON Output ==========

/// JSON report structure.
#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub generated_at: String,
    pub source: String,
    pub valid_day_count: usize,
    pub total_month_hours: f64,
    pub lines: Vec<JsonLine>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JsonLine {
    Ok {
        line: usize,
        punch_count: usize,
        sessions: Vec<JsonSession>,
        tags: Vec<JsonTag>,
        total_hours: f64,
    },
    Error {
        line: usize,
        error: String,
        original_line: String,
    },
}

#[derive(Debug, Serialize)]
pub struct JsonSession {
    pub start_label: String,
    pub end_label: String,
    pub raw_minutes: u64,
    pub rounded_hours: f64,
}

#[derive(Debug, Serialize)]
pub struct JsonTag {
    pub label: String,
    pub category: String,
    pub gap_minutes: u64,
}

impl From<&LineOutcome> for JsonLine {
    fn from(outcome: &LineOutcome) -> Self {
        match outcome {
            LineOutcome::Day(day) => Self::Ok {
                line: day.line_number,
                punch_count: day.punch_count,
                sessions: day
                    .sessions
                    .iter()
                    .map(|s| JsonSession {
                        start_label: s.start.to_string(),
                        end_label: s.end.to_string(),
                        raw_minutes: s.raw_minutes,
                        rounded_hours: s.rounded_hours,
                    })
                    .collect(),
                tags: day
                    .tags
                    .iter()
                    .map(|t| JsonTag {
                        label: t.label().to_string(),
                        category: t.kind.as_str().to_string(),
                        gap_minutes: t.gap_minutes,
                    })
                    .collect(),
                total_hours: day.total_hours,
            },
            LineOutcome::Invalid(invalid) => Self::Error {
                line: invalid.line_number,
                error: invalid.error.to_string(),
                original_line: invalid.original_line.clone(),
            },
        }
    }
}

fn to_json_report(report: &HoursReport, generated_at: DateTime<Utc>) -> JsonReport {
    JsonReport {
        generated_at: generated_at.to_rfc3339(),
        source: report.source.clone(),
        valid_day_count: report.result.valid_day_count,
        total_month_hours: report.result.total_month_hours,
        lines: report.result.lines.iter().map(JsonLine::from).collect(),
    }
}

/// Formats reports as JSON: an object for one input, an array for several.
pub fn format_reports_json(reports: &[HoursReport], generated_at: DateTime<Utc>) -> Result<String> {
    let json: Vec<JsonReport> = reports
        .iter()
        .map(|r| to_json_report(r, generated_at))
        .collect();

    if let [single] = json.as_slice() {
        Ok(serde_json::to_string_pretty(single)?)
    } else {
        Ok(serde_json::to_string_pretty(&json)?)
    }
}

// ========== Public Interface ==========

/// Runs the hours command.
pub fn run(inputs: Vec<Input>, config: &AnalyzerConfig, json: bool) -> Result<()> {
    let generated_at = Utc::now();
    let reports = generate_reports(inputs, config);

    if json {
        let output = format_reports_json(&reports, generated_at)?;
        println!("{output}");
        return Ok(());
    }

    for (i, report) in reports.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print!("{}", format_report(report));
    }
    if reports.len() > 1 {
        println!();
        print!("{}", format_grand_total(&reports));
    }

    Ok(())
}
