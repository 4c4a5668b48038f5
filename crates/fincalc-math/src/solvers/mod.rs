//! Root-finding algorithms.
//!
//! This module provides [`bisection`], a bracketing solver that halves a
//! [`Bracket`] until the residual falls below the configured tolerance or the
//! iteration cap is reached.
//!
//! The [`BracketPolicy`] decides how the bracket is trusted:
//!
//! | Policy | Sign check | Update rule |
//! |--------|------------|-------------|
//! | `Assume` | none | `f(mid) > 0` raises the lower bound, otherwise the upper bound drops |
//! | `Verify` | `f(lower)` and `f(upper)` must differ in sign | keep the half whose endpoints differ in sign |
//!
//! `Assume` presumes `f` is decreasing over the bracket, which holds for the
//! NPV of a conventional investment (one outflow followed by inflows).
//!
//! # Example: IRR of a one-period project
//!
//! ```rust
//! use fincalc_math::solvers::{bisection, Bracket, BracketPolicy, SolverConfig};
//!
//! let npv = |r: f64| -100.0 + 110.0 / (1.0 + r);
//! let bracket = Bracket::new(-0.99, 2.0).unwrap();
//! let config = SolverConfig::new(1e-4, 1000);
//!
//! let result = bisection(npv, bracket, BracketPolicy::Assume, &config).unwrap();
//! assert!((result.root - 0.10).abs() < 1e-4);
//! ```

mod bisection;

pub use bisection::bisection;

use crate::error::{MathError, MathResult};

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Absolute tolerance on the residual `|f(x)|`.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Checks that the tolerance is positive and at least one iteration is allowed.
    pub fn validate(&self) -> MathResult<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(MathError::invalid_input(format!(
                "tolerance must be a positive number, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(MathError::invalid_input(
                "max_iterations must be at least 1",
            ));
        }
        Ok(())
    }
}

/// A closed search interval `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    lower: f64,
    upper: f64,
}

impl Bracket {
    /// Creates a bracket, requiring finite bounds with `lower < upper`.
    pub fn new(lower: f64, upper: f64) -> MathResult<Self> {
        if !(lower.is_finite() && upper.is_finite()) {
            return Err(MathError::invalid_input(format!(
                "bracket bounds must be finite, got [{lower}, {upper}]"
            )));
        }
        if lower >= upper {
            return Err(MathError::invalid_input(format!(
                "bracket lower bound {lower} must be below upper bound {upper}"
            )));
        }
        Ok(Self { lower, upper })
    }

    /// Lower bound.
    #[must_use]
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper bound.
    #[must_use]
    pub fn upper(&self) -> f64 {
        self.upper
    }
}

/// How a bisection search treats its bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BracketPolicy {
    /// Search without checking for a sign change, assuming `f` decreases.
    #[default]
    Assume,
    /// Require a sign change across the bracket before searching.
    Verify,
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solver_config() {
        let config = SolverConfig::default()
            .with_tolerance(1e-4)
            .with_max_iterations(1000);

        assert!((config.tolerance - 1e-4).abs() < f64::EPSILON);
        assert_eq!(config.max_iterations, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config() {
        assert!(SolverConfig::new(0.0, 10).validate().is_err());
        assert!(SolverConfig::new(f64::NAN, 10).validate().is_err());
        assert!(SolverConfig::new(1e-4, 0).validate().is_err());
    }

    #[test]
    fn test_bracket() {
        let bracket = Bracket::new(-0.99, 2.0).unwrap();
        assert_eq!((bracket.lower(), bracket.upper()), (-0.99, 2.0));

        assert!(Bracket::new(1.0, 1.0).is_err());
        assert!(Bracket::new(2.0, 1.0).is_err());
        assert!(Bracket::new(f64::NEG_INFINITY, 1.0).is_err());
    }

    #[test]
    fn test_default_policy_assumes() {
        assert_eq!(BracketPolicy::default(), BracketPolicy::Assume);
    }
}
