//! Interactive menu.
//!
//! Lists every formula by category with a number, prompts for each input
//! until it is valid and prints the result. Input ends at `0` or end of
//! input.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use tracing::debug;

use fincalc_core::{FinanceResult, ParamKind, ParamSpec};
use fincalc_formulas::{evaluate, irr, Category, FormulaId, IrrConfig, IrrOutcome, Params};

use crate::commands::{parse_number, Context};

/// Largest number of series values the menu will prompt for.
const MAX_COUNT: usize = 10_000;

/// A numbered menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Item {
    Formula(FormulaId),
    Irr,
}

impl Item {
    fn name(self) -> &'static str {
        match self {
            Self::Formula(id) => id.name(),
            Self::Irr => "Internal Rate of Return (IRR)",
        }
    }

    fn category(self) -> Category {
        match self {
            Self::Formula(id) => id.category(),
            Self::Irr => Category::CapitalBudgeting,
        }
    }
}

/// Menu entries in numbering order, starting at 1.
///
/// The cash-flow vector PV comes last so the earlier numbers stay stable.
fn items() -> Vec<Item> {
    let mut items: Vec<_> = FormulaId::all()
        .iter()
        .copied()
        .filter(|id| *id != FormulaId::PvCashflows)
        .map(Item::Formula)
        .collect();
    items.push(Item::Irr);
    items.push(Item::Formula(FormulaId::PvCashflows));
    items
}

/// Whether the session should keep going.
enum Flow {
    Continue,
    Exit,
}

/// Prompt-driven calculator over any line source.
pub struct Menu<R, W> {
    input: R,
    output: W,
    items: Vec<Item>,
    irr: IrrConfig,
    precision: Option<usize>,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    /// Creates a menu reading from `input` and writing to `output`.
    pub fn new(input: R, output: W, irr: IrrConfig, precision: Option<usize>) -> Self {
        Self {
            input,
            output,
            items: items(),
            irr,
            precision,
        }
    }

    /// Runs until the user exits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.show()?;
            let Some(choice) = self.read_line("Enter your choice: ")? else {
                break;
            };
            let item = match choice.trim().parse::<usize>() {
                Ok(0) => {
                    writeln!(self.output, "Goodbye!")?;
                    break;
                }
                Ok(n) => self.items.get(n - 1).copied(),
                Err(_) => None,
            };
            let Some(item) = item else {
                writeln!(self.output, "Invalid choice. Please try again.")?;
                continue;
            };

            debug!(item = item.name(), "menu selection");
            let flow = match item {
                Item::Formula(id) => self.run_formula(id)?,
                Item::Irr => self.run_irr()?,
            };
            if let Flow::Exit = flow {
                break;
            }
        }
        self.output.flush()
    }

    fn show(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "=== Corporate Finance Calculator ===")?;
        for category in Category::all() {
            writeln!(self.output)?;
            writeln!(self.output, "{}:", category.title())?;
            for (index, item) in self.items.iter().enumerate() {
                if item.category() == *category {
                    writeln!(self.output, "{:>3}. {}", index + 1, item.name())?;
                }
            }
        }
        writeln!(self.output)?;
        writeln!(self.output, "  0. Exit")
    }

    fn run_formula(&mut self, id: FormulaId) -> io::Result<Flow> {
        let spec = id.spec();
        writeln!(self.output)?;
        writeln!(self.output, "{}: {}", spec.name, spec.summary)?;

        // Vector entries for the cash-flow PV are indexed from time 0.
        let first_period = if id == FormulaId::PvCashflows { 0 } else { 1 };

        let mut params = Params::new();
        for param in spec.params {
            if param.kind.is_series() {
                let Some(values) = self.read_series(id, param, first_period)? else {
                    return Ok(Flow::Exit);
                };
                params.insert(param.name, values);
            } else {
                let prompt = format!("{} ({}): ", param.label, param.kind.hint());
                let Some(value) = self.read_number(&prompt, |v| {
                    param.kind.check_scalar(id.as_str(), param.name, v)
                })?
                else {
                    return Ok(Flow::Exit);
                };
                params.insert(param.name, value);
            }
        }

        let prec = self.precision_for(id.category());
        match evaluate(id, &params) {
            Ok(value) => writeln!(self.output, "Result: {value:.prec$}")?,
            Err(e) => writeln!(self.output, "Error: {e}")?,
        }
        Ok(Flow::Continue)
    }

    fn run_irr(&mut self) -> io::Result<Flow> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", Item::Irr.name())?;

        let Some(count) = self.read_count("Number of cash flows: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(outlay) = self.read_number("Initial investment (amount): ", |v| {
            ParamKind::Money.check_scalar("irr", "initial_outlay", v)
        })?
        else {
            return Ok(Flow::Exit);
        };
        let Some(flows) = self.read_amounts("Cash flow for period", 1, count)? else {
            return Ok(Flow::Exit);
        };

        match irr(outlay, &flows, &self.irr) {
            Ok(IrrOutcome::Converged { rate, .. }) => {
                let prec = self.precision_for(Category::CapitalBudgeting);
                writeln!(self.output, "Result: {rate:.prec$}")?;
            }
            Ok(IrrOutcome::NotFound { reason, .. }) => {
                writeln!(self.output, "No solution found ({reason})")?;
            }
            Err(e) => writeln!(self.output, "Error: {e}")?,
        }
        Ok(Flow::Continue)
    }

    /// Configured decimals, or the category's own.
    fn precision_for(&self, category: Category) -> usize {
        self.precision.unwrap_or_else(|| category.precision())
    }

    fn read_series(
        &mut self,
        id: FormulaId,
        param: &ParamSpec,
        first_period: usize,
    ) -> io::Result<Option<Vec<f64>>> {
        let prompt = format!("Number of values for {}: ", param.label.to_lowercase());
        let Some(count) = self.read_count(&prompt)? else {
            return Ok(None);
        };
        debug!(formula = %id, param = param.name, count, "reading series");
        let label = if param.name == "dividends" {
            "Dividend for year"
        } else {
            "Cash flow for period"
        };
        self.read_amounts(label, first_period, count)
    }

    fn read_amounts(
        &mut self,
        label: &str,
        first_period: usize,
        count: usize,
    ) -> io::Result<Option<Vec<f64>>> {
        let mut values = Vec::new();
        for period in first_period..first_period + count {
            let prompt = format!("{label} {period}: ");
            let Some(value) = self.read_number(&prompt, |v| {
                ParamKind::Money.check_scalar("menu", "amount", v)
            })?
            else {
                return Ok(None);
            };
            values.push(value);
        }
        Ok(Some(values))
    }

    fn read_count(&mut self, prompt: &str) -> io::Result<Option<usize>> {
        let value = self.read_number(prompt, |v| {
            let n = ParamKind::PeriodCount.check_scalar("menu", "count", v)?;
            if n < 1.0 {
                return Err(fincalc_core::FinanceError::domain(
                    "menu",
                    "count must be at least 1",
                ));
            }
            if n > MAX_COUNT as f64 {
                return Err(fincalc_core::FinanceError::domain(
                    "menu",
                    format!("count too large, at most {MAX_COUNT}"),
                ));
            }
            Ok(n)
        })?;
        // Whole and within 1..=MAX_COUNT after validation.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let count = value.map(|n| n as usize);
        Ok(count)
    }

    /// Prompts until `validate` accepts the number, or input ends.
    fn read_number<F>(&mut self, prompt: &str, validate: F) -> io::Result<Option<f64>>
    where
        F: Fn(f64) -> FinanceResult<f64>,
    {
        loop {
            let Some(line) = self.read_line(prompt)? else {
                return Ok(None);
            };
            let checked = parse_number(&line)
                .map_err(|e| e.to_string())
                .and_then(|v| validate(v).map_err(|e| e.to_string()));
            match checked {
                Ok(value) => return Ok(Some(value)),
                Err(e) => writeln!(self.output, "Invalid input: {e}. Please try again.")?,
            }
        }
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

/// Execute the menu command on stdin and stdout.
pub fn execute(ctx: &Context) -> Result<()> {
    let irr = ctx.config.irr_config()?;
    let precision = ctx.config.precision()?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(stdin.lock(), stdout.lock(), irr, precision).run()?;
    Ok(())
}
