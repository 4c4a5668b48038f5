//! Formula parameter kinds and values.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{FinanceError, FinanceResult};

/// Semantic type of a formula input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    /// Monetary amount, any sign.
    Money,
    /// Dimensionless rate in decimal form (0.05 = 5%).
    Rate,
    /// Real-valued time in periods.
    Years,
    /// Non-negative whole number of periods.
    PeriodCount,
    /// Non-negative quantity such as shares outstanding.
    Count,
    /// Ordered per-period monetary amounts.
    MoneySeries,
}

impl ParamKind {
    /// Returns true if values of this kind are series rather than scalars.
    #[must_use]
    pub fn is_series(self) -> bool {
        matches!(self, Self::MoneySeries)
    }

    /// Short input hint shown next to a prompt.
    #[must_use]
    pub fn hint(self) -> &'static str {
        match self {
            Self::Money => "amount",
            Self::Rate => "as decimal, e.g., 0.05 for 5%",
            Self::Years => "number of periods, may be fractional",
            Self::PeriodCount => "whole number",
            Self::Count => "non-negative number",
            Self::MoneySeries => "comma-separated amounts",
        }
    }

    /// Validates a scalar against the kind's own constraints.
    ///
    /// Formula-specific constraints (for example `rate > growth`) are
    /// checked by the formula itself.
    pub fn check_scalar(self, formula: &str, name: &str, value: f64) -> FinanceResult<f64> {
        if !value.is_finite() {
            return Err(FinanceError::domain(
                formula,
                format!("{name} must be a finite number, got {value}"),
            ));
        }
        match self {
            Self::PeriodCount if value < 0.0 || value.fract() != 0.0 => Err(FinanceError::domain(
                formula,
                format!("{name} must be a non-negative whole number, got {value}"),
            )),
            Self::Count if value < 0.0 => Err(FinanceError::domain(
                formula,
                format!("{name} cannot be negative, got {value}"),
            )),
            _ => Ok(value),
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Money => "money",
            Self::Rate => "rate",
            Self::Years => "years",
            Self::PeriodCount => "period count",
            Self::Count => "count",
            Self::MoneySeries => "money series",
        };
        write!(f, "{name}")
    }
}

/// A named formula input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParamSpec {
    /// Machine name used in parameter maps.
    pub name: &'static str,
    /// Field label shown by front-ends.
    pub label: &'static str,
    /// Semantic kind.
    pub kind: ParamKind,
}

impl ParamSpec {
    /// Creates a parameter spec.
    #[must_use]
    pub const fn new(name: &'static str, label: &'static str, kind: ParamKind) -> Self {
        Self { name, label, kind }
    }
}

/// A value bound to a formula parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Single number.
    Scalar(f64),
    /// Ordered numbers.
    Series(Vec<f64>),
}

impl ParamValue {
    /// Returns the scalar, if this is one.
    #[must_use]
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            Self::Series(_) => None,
        }
    }

    /// Returns the series, if this is one.
    #[must_use]
    pub fn as_series(&self) -> Option<&[f64]> {
        match self {
            Self::Scalar(_) => None,
            Self::Series(v) => Some(v),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<f64>> for ParamValue {
    fn from(values: Vec<f64>) -> Self {
        Self::Series(values)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(v) => write!(f, "{v}"),
            Self::Series(values) => {
                let parts: Vec<String> = values.iter().map(|v| format!("{v}")).collect();
                write!(f, "{}", parts.join(","))
            }
        }
    }
}
