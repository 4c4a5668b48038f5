//! List command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use fincalc_formulas::{Category, FormulaId};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{print_header, print_output};

/// Arguments for the list command.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show one category (e.g. bonds, time-value)
    #[arg(short, long)]
    pub category: Option<String>,
}

/// One formula row.
#[derive(Debug, Serialize, Tabled)]
struct FormulaRow {
    #[tabled(rename = "Formula")]
    formula: &'static str,
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Category")]
    category: &'static str,
    #[tabled(rename = "Parameters")]
    parameters: String,
}

impl FormulaRow {
    fn new(id: FormulaId) -> Self {
        let spec = id.spec();
        let parameters = spec
            .params
            .iter()
            .map(|p| format!("{} ({})", p.name, p.kind))
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            formula: id.as_str(),
            name: spec.name,
            category: spec.category.as_str(),
            parameters,
        }
    }
}

/// Execute the list command.
pub fn execute(args: ListArgs, ctx: &Context) -> Result<()> {
    let filter = args
        .category
        .as_deref()
        .map(str::parse::<Category>)
        .transpose()
        .map_err(anyhow::Error::msg)?;

    let rows: Vec<_> = FormulaId::all()
        .iter()
        .copied()
        .filter(|id| filter.map_or(true, |c| id.category() == c))
        .map(FormulaRow::new)
        .collect();

    match ctx.format {
        OutputFormat::Minimal => {
            for row in &rows {
                println!("{}", row.formula);
            }
        }
        OutputFormat::Table => {
            if !ctx.quiet {
                print_header(filter.map_or("Formulas", Category::title));
            }
            print_output(&rows, ctx.format)?;
        }
        OutputFormat::Json | OutputFormat::Csv => print_output(&rows, ctx.format)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_lists_parameter_kinds() {
        let row = FormulaRow::new(FormulaId::Npv);
        assert_eq!(row.formula, "npv");
        assert_eq!(row.category, "capital_budgeting");
        assert_eq!(
            row.parameters,
            "initial_outlay (money), rate (rate), cash_flows (money series)"
        );
    }
}
