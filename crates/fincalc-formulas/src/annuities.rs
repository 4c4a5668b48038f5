//! Perpetuities and annuities, level and growing.

use fincalc_core::{ensure_finite, FinanceResult};

use crate::guards::{compound, exceeds_growth, periods as require_periods, positive};

/// Present value of a level perpetuity, `C / r`.
pub fn pv_perpetuity(cash_flow: f64, rate: f64) -> FinanceResult<f64> {
    const NAME: &str = "pv_perpetuity";
    positive(NAME, "rate", rate)?;
    ensure_finite(NAME, cash_flow / rate)
}

/// Present value of an ordinary annuity, `C * (1 - (1 + r)^-N) / r`.
///
/// # Example
///
/// ```rust
/// use fincalc_formulas::annuities::pv_annuity;
///
/// let pv = pv_annuity(100.0, 0.05, 10).unwrap();
/// assert!((pv - 772.1735).abs() < 1e-4);
/// ```
pub fn pv_annuity(cash_flow: f64, rate: f64, periods: u32) -> FinanceResult<f64> {
    const NAME: &str = "pv_annuity";
    positive(NAME, "rate", rate)?;
    require_periods(NAME, "periods", periods)?;
    let factor = compound(NAME, rate, f64::from(periods))?;
    ensure_finite(NAME, cash_flow * (1.0 - 1.0 / factor) / rate)
}

/// Future value of an annuity, `PV * ((1 + r)^N - 1) / r`.
///
/// The first argument is the level payment; it is named `present_value`
/// to match the field label the calculators show.
pub fn fv_annuity(present_value: f64, rate: f64, periods: u32) -> FinanceResult<f64> {
    const NAME: &str = "fv_annuity";
    positive(NAME, "rate", rate)?;
    require_periods(NAME, "periods", periods)?;
    let factor = compound(NAME, rate, f64::from(periods))?;
    ensure_finite(NAME, present_value * (factor - 1.0) / rate)
}

/// Present value of a growing perpetuity, `C / (r - g)`.
pub fn pv_perpetuity_growth(cash_flow: f64, rate: f64, growth_rate: f64) -> FinanceResult<f64> {
    const NAME: &str = "pv_perpetuity_growth";
    exceeds_growth(NAME, rate, growth_rate)?;
    ensure_finite(NAME, cash_flow / (rate - growth_rate))
}

/// Present value of a growing annuity,
/// `C / (r - g) * (1 - ((1 + g) / (1 + r))^N)`.
///
/// With `g = 0` this equals [`pv_annuity`].
pub fn pv_growing_annuity(
    cash_flow: f64,
    rate: f64,
    growth_rate: f64,
    periods: u32,
) -> FinanceResult<f64> {
    const NAME: &str = "pv_growing_annuity";
    exceeds_growth(NAME, rate, growth_rate)?;
    require_periods(NAME, "periods", periods)?;
    let ratio = ((1.0 + growth_rate) / (1.0 + rate)).powf(f64::from(periods));
    ensure_finite(NAME, cash_flow / (rate - growth_rate) * (1.0 - ratio))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_perpetuity() {
        assert_relative_eq!(pv_perpetuity(50.0, 0.05).unwrap(), 1000.0, epsilon = 1e-9);
        assert!(pv_perpetuity(50.0, 0.0).unwrap_err().is_domain());
    }

    #[test]
    fn test_annuity_requires_positive_inputs() {
        assert!(pv_annuity(100.0, 0.0, 10).unwrap_err().is_domain());
        assert!(pv_annuity(100.0, 0.05, 0).unwrap_err().is_domain());
        assert!(fv_annuity(100.0, -0.05, 10).unwrap_err().is_domain());
    }

    #[test]
    fn test_fv_annuity() {
        // 100 per period for 3 periods at 10%: 100 * 3.31
        assert_relative_eq!(fv_annuity(100.0, 0.10, 3).unwrap(), 331.0, epsilon = 1e-9);
    }

    #[test]
    fn test_long_annuity_approaches_perpetuity() {
        let perpetuity = pv_perpetuity(100.0, 0.08).unwrap();
        let short = pv_annuity(100.0, 0.08, 10).unwrap();
        let long = pv_annuity(100.0, 0.08, 500).unwrap();

        assert!(short < long);
        assert_relative_eq!(long, perpetuity, epsilon = 1e-9);
    }

    #[test]
    fn test_growth_must_be_below_rate() {
        let err = pv_perpetuity_growth(100.0, 0.05, 0.06).unwrap_err();
        assert!(err.is_domain());
        assert!(pv_perpetuity_growth(100.0, 0.05, 0.05).is_err());
        assert!(pv_growing_annuity(100.0, 0.05, 0.07, 5).unwrap_err().is_domain());
    }

    #[test]
    fn test_growing_annuity_without_growth_is_annuity() {
        let growing = pv_growing_annuity(100.0, 0.06, 0.0, 12).unwrap();
        let level = pv_annuity(100.0, 0.06, 12).unwrap();
        assert_relative_eq!(growing, level, epsilon = 1e-9);
    }

    #[test]
    fn test_growing_perpetuity() {
        assert_relative_eq!(pv_perpetuity_growth(100.0, 0.08, 0.03).unwrap(), 2000.0, epsilon = 1e-9);
    }
}
