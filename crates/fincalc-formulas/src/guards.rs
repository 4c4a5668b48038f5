//! Domain checks shared by the formula modules.
//!
//! Comparisons are written so that a NaN input fails the check.

use fincalc_core::{FinanceError, FinanceResult};

pub(crate) fn positive(formula: &str, name: &str, value: f64) -> FinanceResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(FinanceError::domain(
            formula,
            format!("{name} must be positive, got {value}"),
        ))
    }
}

pub(crate) fn non_negative(formula: &str, name: &str, value: f64) -> FinanceResult<()> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(FinanceError::domain(
            formula,
            format!("{name} cannot be negative, got {value}"),
        ))
    }
}

pub(crate) fn non_zero(formula: &str, name: &str, value: f64) -> FinanceResult<()> {
    if value != 0.0 && !value.is_nan() {
        Ok(())
    } else {
        Err(FinanceError::domain(
            formula,
            format!("{name} cannot be zero"),
        ))
    }
}

pub(crate) fn fraction(formula: &str, name: &str, value: f64) -> FinanceResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(FinanceError::domain(
            formula,
            format!("{name} must be between 0 and 1, got {value}"),
        ))
    }
}

/// Requires `rate > growth`.
pub(crate) fn exceeds_growth(formula: &str, rate: f64, growth: f64) -> FinanceResult<()> {
    if rate > growth {
        Ok(())
    } else {
        Err(FinanceError::domain(
            formula,
            format!("rate {rate} must be greater than growth rate {growth}"),
        ))
    }
}

pub(crate) fn periods(formula: &str, name: &str, n: u32) -> FinanceResult<()> {
    if n > 0 {
        Ok(())
    } else {
        Err(FinanceError::domain(
            formula,
            format!("{name} must be positive"),
        ))
    }
}

pub(crate) fn non_empty(formula: &str, name: &str, values: &[f64]) -> FinanceResult<()> {
    if values.is_empty() {
        Err(FinanceError::domain(
            formula,
            format!("{name} needs at least one value"),
        ))
    } else {
        Ok(())
    }
}

/// `(1 + rate)^exponent`, failing when the factor is infinite, NaN or zero.
pub(crate) fn compound(formula: &str, rate: f64, exponent: f64) -> FinanceResult<f64> {
    let factor = (1.0 + rate).powf(exponent);
    if factor.is_finite() && factor != 0.0 {
        Ok(factor)
    } else {
        Err(FinanceError::numeric(
            formula,
            format!("compounding factor (1 + {rate})^{exponent} is not representable"),
        ))
    }
}
