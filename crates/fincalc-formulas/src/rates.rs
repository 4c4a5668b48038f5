//! Interest rate conversions.

use fincalc_core::{ensure_finite, FinanceResult};

use crate::guards::{periods as require_periods, positive};

/// Rate over `n` periods equivalent to a per-period rate, `(1 + r)^n - 1`.
///
/// `n` may be fractional, e.g. `1.0 / 12.0` converts an annual rate to its
/// monthly equivalent.
pub fn eq_discount_period_conversion(rate: f64, periods: f64) -> FinanceResult<f64> {
    const NAME: &str = "eq_discount_period_conversion";
    positive(NAME, "periods", periods)?;
    ensure_finite(NAME, (1.0 + rate).powf(periods) - 1.0)
}

/// Interest rate per compounding period, `APR / k`.
pub fn interest_rate_per_period(apr: f64, compounding_periods: u32) -> FinanceResult<f64> {
    const NAME: &str = "interest_rate_per_period";
    require_periods(NAME, "compounding_periods", compounding_periods)?;
    ensure_finite(NAME, apr / f64::from(compounding_periods))
}

/// Effective annual rate from an APR, `(1 + APR / k)^k - 1`.
///
/// # Example
///
/// ```rust
/// use fincalc_formulas::rates::apr_to_ear;
///
/// let ear = apr_to_ear(0.12, 12).unwrap();
/// assert!((ear - 0.126825).abs() < 1e-6);
/// ```
pub fn apr_to_ear(apr: f64, compounding_periods: u32) -> FinanceResult<f64> {
    const NAME: &str = "apr_to_ear";
    require_periods(NAME, "compounding_periods", compounding_periods)?;
    let k = f64::from(compounding_periods);
    ensure_finite(NAME, (1.0 + apr / k).powf(k) - 1.0)
}

/// Growth in purchasing power, `(1 + real) / (1 + inflation) - 1`.
pub fn growth_in_purchasing_power(inflation_rate: f64, real_rate: f64) -> FinanceResult<f64> {
    const NAME: &str = "growth_in_purchasing_power";
    ensure_finite(NAME, (1.0 + real_rate) / (1.0 + inflation_rate) - 1.0)
}

/// Real interest rate, `(real - inflation) / (1 + inflation)`.
///
/// `real_rate` here is the stated rate being deflated.
pub fn real_interest_rate(real_rate: f64, inflation_rate: f64) -> FinanceResult<f64> {
    const NAME: &str = "real_interest_rate";
    ensure_finite(NAME, (real_rate - inflation_rate) / (1.0 + inflation_rate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_period_conversion() {
        let two_year = eq_discount_period_conversion(0.05, 2.0).unwrap();
        assert_relative_eq!(two_year, 0.1025, epsilon = 1e-12);

        let monthly = eq_discount_period_conversion(0.12, 1.0 / 12.0).unwrap();
        assert_relative_eq!((1.0 + monthly).powi(12), 1.12, epsilon = 1e-12);

        assert!(eq_discount_period_conversion(0.05, 0.0).unwrap_err().is_domain());
    }

    #[test]
    fn test_rate_per_period() {
        assert_relative_eq!(interest_rate_per_period(0.06, 12).unwrap(), 0.005, epsilon = 1e-15);
        assert!(interest_rate_per_period(0.06, 0).unwrap_err().is_domain());
    }

    #[test]
    fn test_ear_annual_compounding_is_apr() {
        assert_relative_eq!(apr_to_ear(0.07, 1).unwrap(), 0.07, epsilon = 1e-15);
        assert!(apr_to_ear(0.07, 0).unwrap_err().is_domain());
    }

    #[test]
    fn test_purchasing_power() {
        let growth = growth_in_purchasing_power(0.03, 0.05).unwrap();
        assert_relative_eq!(growth, 1.05 / 1.03 - 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_real_rate() {
        let real = real_interest_rate(0.08, 0.03).unwrap();
        assert_relative_eq!(real, 0.05 / 1.03, epsilon = 1e-15);
    }

    #[test]
    fn test_inflation_of_minus_one_is_numeric() {
        assert!(real_interest_rate(0.05, -1.0).unwrap_err().is_numeric());
        assert!(growth_in_purchasing_power(-1.0, 0.05).unwrap_err().is_numeric());
    }
}
