//! Firm valuation building blocks.

use fincalc_core::{ensure_finite, FinanceResult};

use crate::guards::fraction;

/// Enterprise value, `equity + debt - cash`.
pub fn enterprise_value(equity: f64, debt: f64, cash: f64) -> FinanceResult<f64> {
    ensure_finite("enterprise_value", equity + debt - cash)
}

/// Unlevered free cash flow, `EBIT * (1 - t) + depreciation - capex - ΔNWC`.
pub fn free_cashflow(
    ebit: f64,
    tax_rate: f64,
    depreciation: f64,
    capex: f64,
    nwc_increase: f64,
) -> FinanceResult<f64> {
    const NAME: &str = "free_cashflow";
    fraction(NAME, "tax_rate", tax_rate)?;
    ensure_finite(
        NAME,
        ebit * (1.0 - tax_rate) + depreciation - capex - nwc_increase,
    )
}

/// Net investment, `capex - depreciation`.
pub fn net_investment(capex: f64, depreciation: f64) -> FinanceResult<f64> {
    ensure_finite("net_investment", capex - depreciation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_enterprise_value() {
        assert_eq!(enterprise_value(500.0, 200.0, 50.0).unwrap(), 650.0);
    }

    #[test]
    fn test_free_cashflow() {
        let fcf = free_cashflow(200.0, 0.25, 30.0, 50.0, 10.0).unwrap();
        assert_relative_eq!(fcf, 120.0, epsilon = 1e-12);
        assert!(free_cashflow(200.0, 1.5, 30.0, 50.0, 10.0).unwrap_err().is_domain());
        assert!(free_cashflow(200.0, -0.1, 30.0, 50.0, 10.0).unwrap_err().is_domain());
    }

    #[test]
    fn test_net_investment() {
        assert_eq!(net_investment(80.0, 30.0).unwrap(), 50.0);
    }

    #[test]
    fn test_overflow_is_numeric() {
        assert!(enterprise_value(f64::MAX, f64::MAX, 0.0).unwrap_err().is_numeric());
    }
}
