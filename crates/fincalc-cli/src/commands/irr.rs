//! IRR command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use fincalc_formulas::{irr, BracketPolicy, Category, IrrConfig, IrrOutcome};

use crate::cli::OutputFormat;
use crate::commands::{parse_series, Context};
use crate::output::{print_header, print_output, print_single, print_warning, KeyValue};

/// Arguments for the irr command.
#[derive(Args, Debug)]
pub struct IrrArgs {
    /// Initial investment, a positive amount spent at time 0
    #[arg(long, allow_hyphen_values = true)]
    pub outlay: f64,

    /// Cash flows for periods 1..N, comma-separated
    #[arg(long, value_name = "LIST", allow_hyphen_values = true)]
    pub cash_flows: String,

    /// Lowest rate to search
    #[arg(long, allow_hyphen_values = true)]
    pub lower: Option<f64>,

    /// Highest rate to search
    #[arg(long, allow_hyphen_values = true)]
    pub upper: Option<f64>,

    /// Stop once |NPV| is below this amount
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Maximum bisection steps
    #[arg(long)]
    pub max_iterations: Option<u32>,

    /// Fail fast when NPV does not change sign over the interval
    #[arg(long)]
    pub verify_bracket: bool,

    /// Decimal places in the result
    #[arg(long)]
    pub precision: Option<usize>,
}

impl IrrArgs {
    /// Applies command-line overrides on top of the configured settings.
    fn solver_config(&self, base: IrrConfig) -> IrrConfig {
        let mut config = base.with_bracket(
            self.lower.unwrap_or(base.lower),
            self.upper.unwrap_or(base.upper),
        );
        if let Some(tolerance) = self.tolerance {
            config = config.with_tolerance(tolerance);
        }
        if let Some(max_iterations) = self.max_iterations {
            config = config.with_max_iterations(max_iterations);
        }
        if self.verify_bracket {
            config = config.with_bracket_policy(BracketPolicy::Verify);
        }
        config
    }
}

#[derive(Debug, Serialize)]
struct IrrOutput<'a> {
    initial_outlay: f64,
    cash_flows: &'a [f64],
    #[serde(flatten)]
    outcome: IrrOutcome,
}

/// Execute the irr command.
///
/// Returns the outcome so the caller can pick an exit status.
pub fn execute(args: IrrArgs, ctx: &Context) -> Result<IrrOutcome> {
    let cash_flows = parse_series(&args.cash_flows)?;
    let config = args.solver_config(ctx.config.irr_config()?);
    let outcome = irr(args.outlay, &cash_flows, &config)?;

    let precision = match args.precision {
        Some(precision) => precision,
        None => ctx
            .config
            .precision()?
            .unwrap_or_else(|| Category::CapitalBudgeting.precision()),
    };

    match ctx.format {
        OutputFormat::Table | OutputFormat::Csv => {
            let mut rows = vec![KeyValue::new("Status", status(&outcome))];
            if let Some(rate) = outcome.rate() {
                rows.push(KeyValue::from_number("Rate", rate, precision));
                rows.push(KeyValue::from_percent("Rate (%)", rate, precision.saturating_sub(2)));
            }
            rows.push(KeyValue::new("Iterations", outcome.iterations().to_string()));
            rows.push(KeyValue::new("Residual NPV", format!("{:.3e}", residual(&outcome))));
            if ctx.format == OutputFormat::Table && !ctx.quiet {
                print_header("Internal Rate of Return (IRR)");
            }
            print_output(&rows, ctx.format)?;
        }
        OutputFormat::Json => print_single(&IrrOutput {
            initial_outlay: args.outlay,
            cash_flows: &cash_flows,
            outcome,
        })?,
        OutputFormat::Minimal => {
            if let Some(rate) = outcome.rate() {
                println!("{rate:.precision$}");
            }
        }
    }

    if let IrrOutcome::NotFound { reason, .. } = outcome {
        print_warning(&format!("No solution found ({reason})"));
    }

    Ok(outcome)
}

fn status(outcome: &IrrOutcome) -> String {
    match outcome {
        IrrOutcome::Converged { .. } => "converged".to_string(),
        IrrOutcome::NotFound { reason, .. } => format!("not found: {reason}"),
    }
}

fn residual(outcome: &IrrOutcome) -> f64 {
    match outcome {
        IrrOutcome::Converged { residual, .. } | IrrOutcome::NotFound { residual, .. } => *residual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: IrrArgs,
    }

    #[test]
    fn test_overrides_apply_on_top_of_config() {
        let harness = Harness::parse_from([
            "irr",
            "--outlay",
            "100",
            "--cash-flows",
            "-10,120",
            "--upper",
            "0.5",
            "--verify-bracket",
        ]);
        let config = harness.args.solver_config(IrrConfig::default().with_tolerance(1e-6));

        assert_eq!(config.lower, -0.99);
        assert_eq!(config.upper, 0.5);
        assert_eq!(config.tolerance, 1e-6);
        assert_eq!(config.bracket_policy, BracketPolicy::Verify);
        assert_eq!(harness.args.cash_flows, "-10,120");
    }
}
