//! Output formatting utilities.

use std::io::{self, Write};

use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;

/// Formats and prints output based on the specified format.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> anyhow::Result<()> {
    let stdout = io::stdout();
    render(&mut stdout.lock(), data, format)
}

/// Prints a single serializable value as pretty JSON.
pub fn print_single<T: Serialize>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Writes rows to `out` in the requested format.
fn render<W, T>(out: &mut W, data: &[T], format: OutputFormat) -> anyhow::Result<()>
where
    W: Write,
    T: Serialize + Tabled,
{
    match format {
        OutputFormat::Table if data.is_empty() => writeln!(out, "No results.")?,
        OutputFormat::Table => {
            let table = Table::new(data)
                .with(Style::rounded())
                .with(Modify::new(Columns::first()).with(Alignment::left()))
                .to_string();
            writeln!(out, "{table}")?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, data)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(&mut *out);
            for item in data {
                wtr.serialize(item)?;
            }
            wtr.flush()?;
        }
        // Last row only: commands put their result at the end.
        OutputFormat::Minimal => {
            if let Some(last) = data.last() {
                serde_json::to_writer(&mut *out, last)?;
                writeln!(out)?;
            }
        }
    }
    Ok(())
}

/// Formats a number with a fixed number of decimals.
pub fn format_number(value: f64, precision: usize) -> String {
    format!("{value:.precision$}")
}

/// Formats a decimal rate as a percentage string.
pub fn format_percent(value: f64, precision: usize) -> String {
    format!("{:.precision$}%", value * 100.0)
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a key-value pair from a number.
    pub fn from_number(key: impl Into<String>, value: f64, precision: usize) -> Self {
        Self {
            key: key.into(),
            value: format_number(value, precision),
        }
    }

    /// Creates a key-value pair formatted as percentage.
    pub fn from_percent(key: impl Into<String>, value: f64, precision: usize) -> Self {
        Self {
            key: key.into(),
            value: format_percent(value, precision),
        }
    }
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(613.913_253, 2), "613.91");
        assert_eq!(format_number(0.1, 4), "0.1000");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.1, 2), "10.00%");
        assert_eq!(format_percent(-0.05, 1), "-5.0%");
    }

    fn rendered(format: OutputFormat) -> String {
        let rows = vec![
            KeyValue::new("rate", "0.05"),
            KeyValue::from_number("Result", 650.0, 2),
        ];
        let mut out = Vec::new();
        render(&mut out, &rows, format).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_render_formats() {
        assert!(rendered(OutputFormat::Table).contains("Metric"));
        assert_eq!(
            rendered(OutputFormat::Csv),
            "key,value\nrate,0.05\nResult,650.00\n"
        );
        assert!(rendered(OutputFormat::Json).starts_with('['));
        assert_eq!(
            rendered(OutputFormat::Minimal),
            "{\"key\":\"Result\",\"value\":\"650.00\"}\n"
        );
    }

    #[test]
    fn test_render_empty_table() {
        let mut out = Vec::new();
        render::<_, KeyValue>(&mut out, &[], OutputFormat::Table).unwrap();
        assert_eq!(out, b"No results.\n");
    }

    #[test]
    fn test_key_value() {
        let kv = KeyValue::from_number("Result", 243.425_995, 2);
        assert_eq!(kv.key, "Result");
        assert_eq!(kv.value, "243.43");
    }
}
