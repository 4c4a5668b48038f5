//! Calc command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tracing::debug;

use fincalc_formulas::{evaluate, FormulaId, Params};

use crate::cli::OutputFormat;
use crate::commands::{parse_assignment, parse_number, parse_series, Context};
use crate::error::CliResult;
use crate::output::{print_header, print_output, print_single, KeyValue};

/// Arguments for the calc command.
#[derive(Args, Debug)]
pub struct CalcArgs {
    /// Formula name (see `fincalc list`)
    pub formula: String,

    /// Parameter as NAME=VALUE; series take comma-separated values
    #[arg(short, long = "param", value_name = "NAME=VALUE", allow_hyphen_values = true)]
    pub params: Vec<String>,

    /// Decimal places in the result
    #[arg(long)]
    pub precision: Option<usize>,
}

/// JSON result of a calculation.
#[derive(Debug, Serialize)]
struct CalcOutput<'a> {
    formula: FormulaId,
    name: &'static str,
    inputs: &'a Params,
    result: f64,
}

/// Builds a parameter map, reading series-kind values as comma lists.
///
/// Names the formula does not declare are kept so evaluation can reject them.
fn build_params(id: FormulaId, assignments: &[String]) -> CliResult<Params> {
    let spec = id.spec();
    let mut params = Params::new();
    for assignment in assignments {
        let (name, value) = parse_assignment(assignment)?;
        match spec.param(name) {
            Some(param) if param.kind.is_series() => params.insert(name, parse_series(value)?),
            _ => params.insert(name, parse_number(value)?),
        }
    }
    Ok(params)
}

/// Execute the calc command.
pub fn execute(args: CalcArgs, ctx: &Context) -> Result<()> {
    let id: FormulaId = args.formula.parse()?;
    let spec = id.spec();
    let params = build_params(id, &args.params)?;

    debug!(formula = %id, inputs = params.len(), "evaluating");
    let result = evaluate(id, &params)?;

    let precision = match args.precision {
        Some(precision) => precision,
        None => ctx
            .config
            .precision()?
            .unwrap_or_else(|| spec.category.precision()),
    };

    match ctx.format {
        OutputFormat::Table | OutputFormat::Csv => {
            let mut rows: Vec<_> = params
                .iter()
                .map(|(name, value)| KeyValue::new(name, value.to_string()))
                .collect();
            rows.push(KeyValue::from_number("Result", result, precision));
            if ctx.format == OutputFormat::Table && !ctx.quiet {
                print_header(spec.name);
            }
            print_output(&rows, ctx.format)?;
        }
        OutputFormat::Json => print_single(&CalcOutput {
            formula: id,
            name: spec.name,
            inputs: &params,
            result,
        })?,
        OutputFormat::Minimal => println!("{result:.precision$}"),
    }

    Ok(())
}
