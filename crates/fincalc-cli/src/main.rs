//! Fincalc CLI - Command-line corporate finance calculator.
//!
//! # Usage
//!
//! ```bash
//! # Browse the formulas
//! fincalc list --category bonds
//!
//! # Evaluate one
//! fincalc calc zero_coupon_price -p face_value=1000 -p ytm=0.05 -p periods=10
//!
//! # Solve for IRR
//! fincalc irr --outlay 1000 --cash-flows 300,400,500
//!
//! # Interactive menu
//! fincalc menu
//! ```

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::config::{self as settings, Config};
use commands::Context;

/// Exit status when IRR finds no rate.
const NO_SOLUTION: u8 = 2;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr so command output stays machine-readable
    let default_filter = if cli.verbose {
        "fincalc_cli=debug,fincalc_formulas=debug,fincalc_math=debug"
    } else if cli.quiet {
        "error"
    } else {
        "fincalc_cli=warn,fincalc_formulas=warn,fincalc_math=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config_path = match cli.config {
        Some(path) => path,
        None => settings::default_path()?,
    };
    let config = Config::load(&config_path)?;
    tracing::debug!(path = %config_path.display(), "loaded settings");

    let format = match cli.format {
        Some(format) => format,
        None => config.format()?,
    };
    if !config.use_colors()? {
        colored::control::set_override(false);
    }

    let ctx = Context {
        format,
        quiet: cli.quiet,
        config_path,
        config,
    };

    // Execute command
    match cli.command {
        Commands::List(args) => commands::list::execute(args, &ctx)?,
        Commands::Calc(args) => commands::calc::execute(args, &ctx)?,
        Commands::Irr(args) => {
            if !commands::irr::execute(args, &ctx)?.is_converged() {
                return Ok(ExitCode::from(NO_SOLUTION));
            }
        }
        Commands::Menu => commands::menu::execute(&ctx)?,
        Commands::Config(args) => commands::config::execute(args, &ctx)?,
    }

    Ok(ExitCode::SUCCESS)
}
