//! Error types for the Fincalc library.
//!
//! Formula failures fall into two kinds: a [`FinanceError::Domain`] error
//! when an input violates the formula's mathematical precondition, and a
//! [`FinanceError::Numeric`] error when the arithmetic itself produces a
//! non-finite value. The remaining variants are raised by the registry
//! while binding named parameters.

use thiserror::Error;

/// A specialized Result type for Fincalc operations.
pub type FinanceResult<T> = Result<T, FinanceError>;

/// The main error type for Fincalc operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FinanceError {
    /// An input violates the formula's domain.
    #[error("Domain error in {formula}: {reason}")]
    Domain {
        /// Formula that rejected the input.
        formula: String,
        /// Description of the violated constraint.
        reason: String,
    },

    /// Arithmetic overflowed, underflowed or divided by zero.
    #[error("Numeric error in {formula}: {reason}")]
    Numeric {
        /// Formula whose evaluation failed.
        formula: String,
        /// Description of the failure.
        reason: String,
    },

    /// No formula is registered under the identifier.
    #[error("Unknown formula: {id}")]
    UnknownFormula {
        /// The identifier that was looked up.
        id: String,
    },

    /// A required parameter was not supplied.
    #[error("Missing parameter '{name}' for {formula}")]
    MissingParameter {
        /// Formula being evaluated.
        formula: String,
        /// Name of the missing parameter.
        name: String,
    },

    /// A parameter was supplied with the wrong shape (scalar vs. series).
    #[error("Parameter '{name}' for {formula} must be a {expected}")]
    WrongParameterType {
        /// Formula being evaluated.
        formula: String,
        /// Name of the parameter.
        name: String,
        /// Expected shape.
        expected: String,
    },

    /// A parameter was supplied that the formula does not take.
    #[error("Unexpected parameter '{name}' for {formula}")]
    UnexpectedParameter {
        /// Formula being evaluated.
        formula: String,
        /// Name of the extra parameter.
        name: String,
    },
}

impl FinanceError {
    /// Creates a domain error.
    #[must_use]
    pub fn domain(formula: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Domain {
            formula: formula.into(),
            reason: reason.into(),
        }
    }

    /// Creates a numeric error.
    #[must_use]
    pub fn numeric(formula: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Numeric {
            formula: formula.into(),
            reason: reason.into(),
        }
    }

    /// Creates an unknown formula error.
    #[must_use]
    pub fn unknown_formula(id: impl Into<String>) -> Self {
        Self::UnknownFormula { id: id.into() }
    }

    /// Creates a missing parameter error.
    #[must_use]
    pub fn missing_parameter(formula: impl Into<String>, name: impl Into<String>) -> Self {
        Self::MissingParameter {
            formula: formula.into(),
            name: name.into(),
        }
    }

    /// Creates a wrong parameter type error.
    #[must_use]
    pub fn wrong_parameter_type(
        formula: impl Into<String>,
        name: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::WrongParameterType {
            formula: formula.into(),
            name: name.into(),
            expected: expected.into(),
        }
    }

    /// Creates an unexpected parameter error.
    #[must_use]
    pub fn unexpected_parameter(formula: impl Into<String>, name: impl Into<String>) -> Self {
        Self::UnexpectedParameter {
            formula: formula.into(),
            name: name.into(),
        }
    }

    /// Returns true for a domain violation.
    #[must_use]
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain { .. })
    }

    /// Returns true for an arithmetic failure.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric { .. })
    }
}

/// Returns `value` if it is finite, otherwise a numeric error for `formula`.
///
/// Every formula passes its result through this check so that overflow or
/// an uncaught division by zero surfaces as [`FinanceError::Numeric`]
/// instead of leaking `inf` or `NaN` to the caller.
pub fn ensure_finite(formula: &str, value: f64) -> FinanceResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else if value.is_nan() {
        Err(FinanceError::numeric(formula, "result is not a number"))
    } else {
        Err(FinanceError::numeric(formula, format!("result overflowed to {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FinanceError::domain("pv_perpetuity", "rate must be positive");
        assert_eq!(
            err.to_string(),
            "Domain error in pv_perpetuity: rate must be positive"
        );
    }

    #[test]
    fn test_error_kinds() {
        assert!(FinanceError::domain("f", "x").is_domain());
        assert!(FinanceError::numeric("f", "x").is_numeric());
        assert!(!FinanceError::unknown_formula("f").is_domain());
    }

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite("f", 1.5), Ok(1.5));
        assert!(ensure_finite("f", f64::INFINITY).unwrap_err().is_numeric());
        assert!(ensure_finite("f", f64::NAN).unwrap_err().is_numeric());
    }

    #[test]
    fn test_missing_parameter_message() {
        let err = FinanceError::missing_parameter("npv", "rate");
        assert!(err.to_string().contains("'rate'"));
    }
}
