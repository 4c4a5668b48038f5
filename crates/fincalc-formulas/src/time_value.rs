//! Time value of money: discounting, compounding and cash-flow streams.
//!
//! Rates are per-period decimals and time is measured in the same periods.

use fincalc_core::{ensure_finite, CashFlowSeries, FinanceError, FinanceResult};

use crate::guards::{compound, non_empty, non_negative};

/// Discount factor `1 / (1 + r)^t`.
///
/// # Example
///
/// ```rust
/// use fincalc_formulas::time_value::discount_factor;
///
/// let df = discount_factor(0.05, 2.0).unwrap();
/// assert!((df - 1.0 / 1.1025).abs() < 1e-12);
/// ```
pub fn discount_factor(rate: f64, time: f64) -> FinanceResult<f64> {
    const NAME: &str = "discount_factor";
    non_negative(NAME, "rate", rate)?;
    let factor = compound(NAME, rate, time)?;
    ensure_finite(NAME, 1.0 / factor)
}

/// Future value `PV * (1 + r)^t`.
pub fn future_value(present_value: f64, rate: f64, time: f64) -> FinanceResult<f64> {
    const NAME: &str = "future_value";
    non_negative(NAME, "rate", rate)?;
    let factor = compound(NAME, rate, time)?;
    ensure_finite(NAME, present_value * factor)
}

/// Present value `FV / (1 + r)^t`.
pub fn present_value(future_value: f64, rate: f64, time: f64) -> FinanceResult<f64> {
    const NAME: &str = "present_value";
    non_negative(NAME, "rate", rate)?;
    let factor = compound(NAME, rate, time)?;
    ensure_finite(NAME, future_value / factor)
}

/// Present value of one flat amount received in every period `0..=periods`.
///
/// Computes `Σ_{n=0}^{N} cash_flow / (1 + r)^n`. The first payment falls on
/// period 0 and is not discounted, so `periods = 0` returns `cash_flow`.
///
/// This takes a single repeating amount, not a per-period vector. Use
/// [`pv_cashflows`] for irregular streams.
pub fn pv_cashflow_stream(cash_flow: f64, rate: f64, periods: u32) -> FinanceResult<f64> {
    const NAME: &str = "pv_cashflow_stream";
    non_negative(NAME, "rate", rate)?;
    let mut total = 0.0;
    for n in 0..=periods {
        total += cash_flow / compound(NAME, rate, f64::from(n))?;
    }
    ensure_finite(NAME, total)
}

/// Present value of an irregular stream, `Σ cf_n / (1 + r)^n` for `n = 0..N`.
///
/// `cash_flows[0]` is received now and is not discounted.
///
/// # Example
///
/// ```rust
/// use fincalc_formulas::time_value::pv_cashflows;
///
/// let pv = pv_cashflows(&[-100.0, 60.0, 60.0], 0.10).unwrap();
/// assert!((pv - 4.1322).abs() < 1e-4);
/// ```
pub fn pv_cashflows(cash_flows: &[f64], rate: f64) -> FinanceResult<f64> {
    const NAME: &str = "pv_cashflows";
    non_negative(NAME, "rate", rate)?;
    non_empty(NAME, "cash_flows", cash_flows)?;
    let series = CashFlowSeries::new(cash_flows.to_vec())
        .map_err(|e| FinanceError::domain(NAME, e.to_string()))?;
    ensure_finite(NAME, series.discount_unchecked(rate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_discount_factor() {
        assert_relative_eq!(discount_factor(0.10, 1.0).unwrap(), 1.0 / 1.1, epsilon = 1e-12);
        assert_relative_eq!(discount_factor(0.0, 7.0).unwrap(), 1.0);
    }

    #[test]
    fn test_negative_rate_rejected() {
        assert!(discount_factor(-0.01, 1.0).unwrap_err().is_domain());
        assert!(future_value(100.0, -0.01, 1.0).unwrap_err().is_domain());
        assert!(present_value(100.0, -0.01, 1.0).unwrap_err().is_domain());
    }

    #[test]
    fn test_future_value() {
        assert_relative_eq!(
            future_value(1000.0, 0.05, 10.0).unwrap(),
            1628.894626777442,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_fractional_time() {
        let fv = future_value(100.0, 0.21, 0.5).unwrap();
        assert_relative_eq!(fv, 110.0, epsilon = 1e-9);
    }

    #[test]
    fn test_overflow_is_numeric() {
        let err = future_value(1.0, 10.0, 1.0e6).unwrap_err();
        assert!(err.is_numeric());
    }

    #[test]
    fn test_pv_cashflow_stream_flat_amount() {
        // 100 now plus 100 at the end of each of the next two periods
        let pv = pv_cashflow_stream(100.0, 0.10, 2).unwrap();
        assert_relative_eq!(pv, 100.0 + 100.0 / 1.1 + 100.0 / 1.21, epsilon = 1e-9);
        assert_relative_eq!(pv_cashflow_stream(100.0, 0.10, 0).unwrap(), 100.0);
    }

    #[test]
    fn test_pv_cashflows_matches_flat_stream() {
        let stream = pv_cashflow_stream(250.0, 0.07, 4).unwrap();
        let vector = pv_cashflows(&[250.0; 5], 0.07).unwrap();
        assert_relative_eq!(stream, vector, epsilon = 1e-9);
    }

    #[test]
    fn test_pv_cashflows_empty_rejected() {
        assert!(pv_cashflows(&[], 0.05).unwrap_err().is_domain());
    }
}
