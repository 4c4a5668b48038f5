//! Bisection root-finding algorithm.

use log::debug;

use crate::error::{MathError, MathResult};
use crate::solvers::{Bracket, BracketPolicy, SolverConfig, SolverResult};

/// Bisection root-finding algorithm.
///
/// Repeatedly evaluates `f` at the midpoint of the bracket and keeps one
/// half. The search converges when `|f(mid)| < config.tolerance`; there is
/// no interval-width criterion, so a search that never meets the residual
/// tolerance runs the full `config.max_iterations` before failing.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `bracket` - Search interval
/// * `policy` - Whether to verify a sign change before searching
/// * `config` - Solver configuration
///
/// # Errors
///
/// * [`MathError::InvalidInput`] if `config` is invalid
/// * [`MathError::InvalidBracket`] under [`BracketPolicy::Verify`] when the
///   endpoints have the same sign
/// * [`MathError::ConvergenceFailed`] when the iteration cap is reached
///
/// # Example
///
/// ```rust
/// use fincalc_math::solvers::{bisection, Bracket, BracketPolicy, SolverConfig};
///
/// // Find root of 2 - x^2 (decreasing on [1, 2])
/// let f = |x: f64| 2.0 - x * x;
/// let bracket = Bracket::new(1.0, 2.0).unwrap();
///
/// let result = bisection(f, bracket, BracketPolicy::Assume, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-9);
/// ```
pub fn bisection<F>(
    f: F,
    bracket: Bracket,
    policy: BracketPolicy,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    config.validate()?;

    match policy {
        BracketPolicy::Assume => directed(f, bracket, config),
        BracketPolicy::Verify => verified(f, bracket, config),
    }
}

/// Moves the lower bound up while `f(mid)` is positive.
fn directed<F>(f: F, bracket: Bracket, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let mut lo = bracket.lower();
    let mut hi = bracket.upper();
    let mut f_mid = f64::NAN;

    for iteration in 0..config.max_iterations {
        let mid = (lo + hi) / 2.0;
        f_mid = f(mid);

        if f_mid.abs() < config.tolerance {
            return Ok(SolverResult {
                root: mid,
                iterations: iteration + 1,
                residual: f_mid,
            });
        }

        if f_mid > 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    debug!(
        "bisection exhausted {} iterations on [{}, {}], last residual {:.3e}",
        config.max_iterations,
        bracket.lower(),
        bracket.upper(),
        f_mid
    );
    Err(MathError::convergence_failed(
        config.max_iterations,
        f_mid.abs(),
    ))
}

/// Keeps the half whose endpoints still differ in sign.
fn verified<F>(f: F, bracket: Bracket, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let mut lo = bracket.lower();
    let mut hi = bracket.upper();

    let mut f_lo = f(lo);
    let f_hi = f(hi);

    if f_lo.abs() < config.tolerance {
        return Ok(SolverResult {
            root: lo,
            iterations: 0,
            residual: f_lo,
        });
    }
    if f_hi.abs() < config.tolerance {
        return Ok(SolverResult {
            root: hi,
            iterations: 0,
            residual: f_hi,
        });
    }

    // NaN endpoints also fail here: the product is never negative.
    if !(f_lo * f_hi < 0.0) {
        return Err(MathError::InvalidBracket {
            a: lo,
            b: hi,
            fa: f_lo,
            fb: f_hi,
        });
    }

    let mut f_mid = f64::NAN;
    for iteration in 0..config.max_iterations {
        let mid = (lo + hi) / 2.0;
        f_mid = f(mid);

        if f_mid.abs() < config.tolerance {
            return Ok(SolverResult {
                root: mid,
                iterations: iteration + 1,
                residual: f_mid,
            });
        }

        if f_mid * f_lo < 0.0 {
            hi = mid;
        } else {
            lo = mid;
            f_lo = f_mid;
        }
    }

    debug!(
        "verified bisection exhausted {} iterations, last residual {:.3e}",
        config.max_iterations, f_mid
    );
    Err(MathError::convergence_failed(
        config.max_iterations,
        f_mid.abs(),
    ))
}
