//! Shared utilities for CLI commands.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Name used for standard input in reports.
pub const STDIN_NAME: &str = "<stdin>";

/// A named block of input text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    pub name: String,
    pub text: String,
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Reads one input: a file, or stdin for `None` / `-`.
pub fn read_input(path: Option<&Path>) -> Result<Input> {
    match path {
        Some(path) if !is_stdin(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok(Input {
                name: path.display().to_string(),
                text,
            })
        }
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read standard input")?;
            Ok(Input {
                name: STDIN_NAME.to_string(),
                text,
            })
        }
    }
}

/// Reads every input in order. An empty list means stdin.
pub fn read_inputs(paths: &[PathBuf]) -> Result<Vec<Input>> {
    if paths.is_empty() {
        return Ok(vec![read_input(None)?]);
    }
    if paths.iter().filter(|p| is_stdin(p)).count() > 1 {
        anyhow::bail!("standard input (-) can only be given once");
    }
    paths.iter().map(|p| read_input(Some(p))).collect()
}

/// Formats hours the short way: `4h`, `4.5h`.
pub fn format_hours(hours: f64) -> String {
    if hours.fract().abs() < f64::EPSILON {
        format!("{hours:.0}h")
    } else {
        format!("{hours}h")
    }
}

/// Generates a bar of `width` cells filled in proportion to `value / max`.
/// Non-zero values always get at least one block.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn progress_bar(value: usize, max: usize, width: usize) -> String {
    if max == 0 {
        return "░".repeat(width);
    }

    let ratio = value as f64 / max as f64;
    let filled = ((ratio * width as f64).round() as usize).min(width);
    let filled = if value > 0 { filled.max(1) } else { filled };

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
