//! CLI command implementations.

pub mod calc;
pub mod config;
pub mod irr;
pub mod list;
pub mod menu;

// Re-export submodules for convenience
pub use calc::CalcArgs;
pub use config::ConfigArgs;
pub use irr::IrrArgs;
pub use list::ListArgs;

use std::path::PathBuf;

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};

/// Settings shared by every command.
#[derive(Debug)]
pub struct Context {
    /// Resolved output format.
    pub format: OutputFormat,
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Location of the settings file.
    pub config_path: PathBuf,
    /// Settings loaded from `config_path`.
    pub config: config::Config,
}

/// Parses a single number, allowing surrounding whitespace.
pub fn parse_number(s: &str) -> CliResult<f64> {
    let trimmed = s.trim();
    trimmed
        .parse()
        .map_err(|_| CliError::InvalidNumber(trimmed.to_string()))
}

/// Parses a comma-separated list of numbers such as `100,110,-5`.
pub fn parse_series(s: &str) -> CliResult<Vec<f64>> {
    if s.trim().is_empty() {
        return Ok(Vec::new());
    }
    s.split(',').map(parse_number).collect()
}

/// Splits a `name=value` argument.
pub fn parse_assignment(s: &str) -> CliResult<(&str, &str)> {
    match s.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim(), value.trim())),
        _ => Err(CliError::InvalidParameter(format!(
            "expected NAME=VALUE, got '{s}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(" 0.05 ").unwrap(), 0.05);
        assert_eq!(parse_number("-100").unwrap(), -100.0);
        assert!(parse_number("ten").is_err());
    }

    #[test]
    fn test_parse_series() {
        assert_eq!(parse_series("100, 110,-5").unwrap(), vec![100.0, 110.0, -5.0]);
        assert!(parse_series("").unwrap().is_empty());
        assert!(parse_series("1,,2").is_err());
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(parse_assignment("rate=0.05").unwrap(), ("rate", "0.05"));
        assert_eq!(
            parse_assignment("cash_flows=1,2,3").unwrap(),
            ("cash_flows", "1,2,3")
        );
        assert!(parse_assignment("rate").is_err());
        assert!(parse_assignment("=1").is_err());
    }
}
