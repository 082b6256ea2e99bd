//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Punch-clock attendance calculator.
///
/// Turns free-form clock-in/clock-out lines into worked hours per day and
/// per month.
#[derive(Debug, Parser)]
#[command(name = "punch", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compute worked hours from punch lines, one workday per line.
    Hours {
        /// Input files. Reads stdin when empty or `-`.
        files: Vec<PathBuf>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Count and sum a list of numbers and compare against a target.
    Numbers {
        /// Input file. Reads stdin when omitted or `-`.
        file: Option<PathBuf>,

        /// Target the sum is compared against.
        #[arg(long, short, default_value_t = 0.0, allow_negative_numbers = true)]
        standard: f64,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}
