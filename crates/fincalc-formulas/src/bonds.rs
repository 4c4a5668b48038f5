//! Bond pricing and yield.
//!
//! Yields are per-period and `periods` counts coupon periods to maturity.

use fincalc_core::{ensure_finite, FinanceError, FinanceResult};

use crate::guards::{compound, periods as require_periods, positive};

/// Coupon paid each period, `FV * coupon_rate / N`.
pub fn coupon_payment(face_value: f64, coupon_rate: f64, periods: u32) -> FinanceResult<f64> {
    const NAME: &str = "coupon_payment";
    require_periods(NAME, "periods", periods)?;
    ensure_finite(NAME, face_value * coupon_rate / f64::from(periods))
}

/// Price of a zero-coupon bond, `FV / (1 + YTM)^N`.
///
/// # Example
///
/// ```rust
/// use fincalc_formulas::bonds::zero_coupon_price;
///
/// let price = zero_coupon_price(1000.0, 0.05, 10).unwrap();
/// assert!((price - 613.91).abs() < 0.01);
/// ```
pub fn zero_coupon_price(face_value: f64, ytm: f64, periods: u32) -> FinanceResult<f64> {
    const NAME: &str = "zero_coupon_price";
    require_periods(NAME, "periods", periods)?;
    let factor = compound(NAME, ytm, f64::from(periods))?;
    ensure_finite(NAME, face_value / factor)
}

/// Yield to maturity of a zero-coupon bond, `(FV / P)^(1 / N) - 1`.
pub fn ytm_zero_coupon(face_value: f64, price: f64, periods: u32) -> FinanceResult<f64> {
    const NAME: &str = "ytm_zero_coupon";
    require_periods(NAME, "periods", periods)?;
    positive(NAME, "price", price)?;
    ensure_finite(NAME, (face_value / price).powf(1.0 / f64::from(periods)) - 1.0)
}

/// Price of a coupon bond from its yield,
/// `CPN / YTM * (1 - (1 + YTM)^-N) + FV / (1 + YTM)^N`.
///
/// A yield of exactly zero divides by zero and fails as a numeric error.
pub fn ytm_coupon_bond(
    coupon_payment: f64,
    face_value: f64,
    ytm: f64,
    periods: u32,
) -> FinanceResult<f64> {
    const NAME: &str = "ytm_coupon_bond";
    require_periods(NAME, "periods", periods)?;
    if ytm == 0.0 {
        return Err(FinanceError::numeric(NAME, "division by a zero yield"));
    }
    let factor = compound(NAME, ytm, f64::from(periods))?;
    let coupons = coupon_payment / ytm * (1.0 - 1.0 / factor);
    ensure_finite(NAME, coupons + face_value / factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_coupon_payment() {
        assert_relative_eq!(coupon_payment(1000.0, 0.06, 2).unwrap(), 30.0);
        assert!(coupon_payment(1000.0, 0.06, 0).unwrap_err().is_domain());
    }

    #[test]
    fn test_zero_coupon_round_trip() {
        let price = zero_coupon_price(1000.0, 0.05, 10).unwrap();
        assert_relative_eq!(price, 613.913_253_540_759, epsilon = 1e-9);

        let ytm = ytm_zero_coupon(1000.0, 613.91, 10).unwrap();
        assert_relative_eq!(ytm, 0.05, epsilon = 1e-5);
    }

    #[test]
    fn test_ytm_zero_coupon_requires_price() {
        assert!(ytm_zero_coupon(1000.0, 0.0, 10).unwrap_err().is_domain());
        assert!(ytm_zero_coupon(1000.0, -5.0, 10).unwrap_err().is_domain());
        assert!(ytm_zero_coupon(1000.0, 900.0, 0).unwrap_err().is_domain());
    }

    #[test]
    fn test_par_bond() {
        // Coupon equal to yield prices at par.
        let price = ytm_coupon_bond(50.0, 1000.0, 0.05, 10).unwrap();
        assert_relative_eq!(price, 1000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_yield_is_numeric() {
        let err = ytm_coupon_bond(50.0, 1000.0, 0.0, 10).unwrap_err();
        assert!(err.is_numeric());
    }
}
