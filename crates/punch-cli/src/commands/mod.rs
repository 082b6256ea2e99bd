//! CLI subcommand implementations.

pub mod hours;
pub mod numbers;
pub mod util;
