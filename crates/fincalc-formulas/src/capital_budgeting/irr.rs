//! Internal rate of return by bisection.

use std::fmt;

use fincalc_core::{CashFlowSeries, FinanceError, FinanceResult};
use fincalc_math::solvers::{bisection, Bracket, BracketPolicy, SolverConfig};
use fincalc_math::MathError;
use log::{debug, warn};
use serde::Serialize;

/// Default lower end of the IRR search interval (-99%).
pub const DEFAULT_IRR_LOWER: f64 = -0.99;

/// Default upper end of the IRR search interval (+200%).
pub const DEFAULT_IRR_UPPER: f64 = 2.0;

/// Default absolute tolerance on NPV, in cash flow units.
pub const DEFAULT_IRR_TOLERANCE: f64 = 1e-4;

/// Default iteration cap.
pub const DEFAULT_IRR_MAX_ITERATIONS: u32 = 1000;

const NAME: &str = "irr";

/// Search settings for [`irr`].
///
/// The defaults search `[-0.99, 2.0]` without checking for a sign change,
/// stop when `|NPV| < 1e-4` and give up after 1000 halvings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IrrConfig {
    /// Lowest rate searched. Must exceed -1.
    pub lower: f64,
    /// Highest rate searched.
    pub upper: f64,
    /// Absolute NPV tolerance.
    pub tolerance: f64,
    /// Iteration cap.
    pub max_iterations: u32,
    /// Whether to require a sign change across the bracket.
    pub bracket_policy: BracketPolicy,
}

impl Default for IrrConfig {
    fn default() -> Self {
        Self {
            lower: DEFAULT_IRR_LOWER,
            upper: DEFAULT_IRR_UPPER,
            tolerance: DEFAULT_IRR_TOLERANCE,
            max_iterations: DEFAULT_IRR_MAX_ITERATIONS,
            bracket_policy: BracketPolicy::Assume,
        }
    }
}

impl IrrConfig {
    /// Sets the search interval.
    #[must_use]
    pub fn with_bracket(mut self, lower: f64, upper: f64) -> Self {
        self.lower = lower;
        self.upper = upper;
        self
    }

    /// Sets the NPV tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the iteration cap.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the bracket policy.
    #[must_use]
    pub fn with_bracket_policy(mut self, policy: BracketPolicy) -> Self {
        self.bracket_policy = policy;
        self
    }

    /// Checks the settings, returning the bracket and solver config.
    ///
    /// Fails with a domain error when `lower <= -1`, `lower >= upper`, the
    /// tolerance is not positive or `max_iterations` is zero.
    pub fn validate(&self) -> FinanceResult<(Bracket, SolverConfig)> {
        if !(self.lower > -1.0) {
            return Err(FinanceError::domain(
                NAME,
                format!("lower rate must be greater than -1, got {}", self.lower),
            ));
        }
        let bracket = Bracket::new(self.lower, self.upper).map_err(to_domain)?;
        let solver = SolverConfig::new(self.tolerance, self.max_iterations);
        solver.validate().map_err(to_domain)?;
        Ok((bracket, solver))
    }
}

/// Why [`irr`] stopped without a rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotFoundReason {
    /// The iteration cap was reached before NPV met the tolerance.
    IterationCapReached,
    /// NPV has the same sign at both ends of a verified bracket.
    NoSignChange,
    /// Outlay and every cash flow are zero.
    DegenerateSeries,
}

impl fmt::Display for NotFoundReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::IterationCapReached => "iteration cap reached",
            Self::NoSignChange => "NPV does not change sign over the bracket",
            Self::DegenerateSeries => "every cash flow is zero",
        };
        f.write_str(text)
    }
}

/// Result of an IRR search.
///
/// `NotFound` is a normal outcome, distinct from a converged rate of zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IrrOutcome {
    /// NPV at `rate` is within tolerance of zero.
    Converged {
        /// The internal rate of return.
        rate: f64,
        /// Halvings performed.
        iterations: u32,
        /// NPV at `rate`.
        residual: f64,
    },
    /// No rate was found.
    NotFound {
        /// Halvings performed before giving up.
        iterations: u32,
        /// Absolute NPV at the last point evaluated.
        residual: f64,
        /// Why the search stopped.
        reason: NotFoundReason,
    },
}

impl IrrOutcome {
    /// Returns the rate if the search converged.
    #[must_use]
    pub fn rate(&self) -> Option<f64> {
        match self {
            Self::Converged { rate, .. } => Some(*rate),
            Self::NotFound { .. } => None,
        }
    }

    /// Returns true if the search converged.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        matches!(self, Self::Converged { .. })
    }

    /// Returns the number of halvings performed.
    #[must_use]
    pub fn iterations(&self) -> u32 {
        match self {
            Self::Converged { iterations, .. } | Self::NotFound { iterations, .. } => *iterations,
        }
    }
}

/// Finds the rate at which `npv(initial_outlay, rate, cash_flows)` is zero.
///
/// Bisects NPV over `[config.lower, config.upper]`. Under the default
/// [`BracketPolicy::Assume`] a positive NPV at the midpoint raises the lower
/// bound and anything else lowers the upper bound, which presumes NPV falls
/// as the rate rises. Cash flows with several sign changes can therefore
/// miss a root or return one of many.
///
/// # Errors
///
/// Returns a domain error for an invalid `config` or non-finite inputs.
/// Failing to find a rate is reported as [`IrrOutcome::NotFound`].
///
/// # Example
///
/// ```rust
/// use fincalc_formulas::capital_budgeting::{irr, IrrConfig};
///
/// let outcome = irr(100.0, &[110.0], &IrrConfig::default()).unwrap();
/// assert!((outcome.rate().unwrap() - 0.10).abs() < 1e-4);
///
/// let nothing = irr(100.0, &[0.0], &IrrConfig::default()).unwrap();
/// assert!(nothing.rate().is_none());
/// ```
pub fn irr(initial_outlay: f64, cash_flows: &[f64], config: &IrrConfig) -> FinanceResult<IrrOutcome> {
    let (bracket, solver) = config.validate()?;

    if !initial_outlay.is_finite() {
        return Err(FinanceError::domain(
            NAME,
            format!("initial outlay must be a finite number, got {initial_outlay}"),
        ));
    }
    if let Some(period) = cash_flows.iter().position(|cf| !cf.is_finite()) {
        return Err(FinanceError::domain(
            NAME,
            format!("cash flow for period {} is not a finite number", period + 1),
        ));
    }

    let series = CashFlowSeries::from_outlay(initial_outlay, cash_flows);
    if series.is_zero() {
        warn!("irr: every cash flow is zero, no rate to find");
        return Ok(IrrOutcome::NotFound {
            iterations: 0,
            residual: 0.0,
            reason: NotFoundReason::DegenerateSeries,
        });
    }

    debug!(
        "irr: {} periods, {} sign changes, bracket [{}, {}], {:?}",
        series.len(),
        series.sign_changes(),
        bracket.lower(),
        bracket.upper(),
        config.bracket_policy
    );

    let npv = |rate: f64| series.discount_unchecked(rate);
    match bisection(npv, bracket, config.bracket_policy, &solver) {
        Ok(result) => {
            debug!(
                "irr: converged to {} after {} iterations",
                result.root, result.iterations
            );
            Ok(IrrOutcome::Converged {
                rate: result.root,
                iterations: result.iterations,
                residual: result.residual,
            })
        }
        Err(MathError::ConvergenceFailed {
            iterations,
            residual,
        }) => {
            warn!("irr: no solution after {iterations} iterations, |npv| = {residual:.3e}");
            Ok(IrrOutcome::NotFound {
                iterations,
                residual,
                reason: NotFoundReason::IterationCapReached,
            })
        }
        Err(MathError::InvalidBracket { fa, fb, .. }) => {
            warn!("irr: npv has the same sign at both ends ({fa:.4}, {fb:.4})");
            Ok(IrrOutcome::NotFound {
                iterations: 0,
                residual: fa.abs().min(fb.abs()),
                reason: NotFoundReason::NoSignChange,
            })
        }
        Err(err @ MathError::InvalidInput { .. }) => Err(to_domain(err)),
    }
}

fn to_domain(err: MathError) -> FinanceError {
    match err {
        MathError::InvalidInput { reason } => FinanceError::domain(NAME, reason),
        other => FinanceError::domain(NAME, other.to_string()),
    }
}
