//! Option payoffs at expiry.
//!
//! These are intrinsic values only. No pricing model is involved.

use fincalc_core::{ensure_finite, FinanceResult};

use crate::guards::non_negative;

/// Call payoff, `max(S - K, 0)`.
pub fn call_option_payoff(stock_price: f64, strike_price: f64) -> FinanceResult<f64> {
    const NAME: &str = "call_option_payoff";
    non_negative(NAME, "stock_price", stock_price)?;
    non_negative(NAME, "strike_price", strike_price)?;
    ensure_finite(NAME, (stock_price - strike_price).max(0.0))
}

/// Put payoff, `max(K - S, 0)`.
pub fn put_option_payoff(stock_price: f64, strike_price: f64) -> FinanceResult<f64> {
    const NAME: &str = "put_option_payoff";
    non_negative(NAME, "stock_price", stock_price)?;
    non_negative(NAME, "strike_price", strike_price)?;
    ensure_finite(NAME, (strike_price - stock_price).max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_payoff() {
        assert_eq!(call_option_payoff(120.0, 100.0).unwrap(), 20.0);
        assert_eq!(call_option_payoff(80.0, 100.0).unwrap(), 0.0);
    }

    #[test]
    fn test_put_payoff() {
        assert_eq!(put_option_payoff(80.0, 100.0).unwrap(), 20.0);
        assert_eq!(put_option_payoff(120.0, 100.0).unwrap(), 0.0);
    }

    #[test]
    fn test_negative_prices_rejected() {
        assert!(call_option_payoff(-1.0, 100.0).unwrap_err().is_domain());
        assert!(put_option_payoff(100.0, -1.0).unwrap_err().is_domain());
    }

    #[test]
    fn test_put_call_parity_at_expiry() {
        let (s, k) = (93.5, 100.0);
        let call = call_option_payoff(s, k).unwrap();
        let put = put_option_payoff(s, k).unwrap();
        assert!((call - put - (s - k)).abs() < 1e-12);
    }
}
