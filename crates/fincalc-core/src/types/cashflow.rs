//! Period-indexed cash flow series.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ensure_finite, FinanceError, FinanceResult};

/// An ordered sequence of signed amounts for periods `0..N`.
///
/// Period 0 is the initial outlay (conventionally negative) and every later
/// period is discounted at the same per-period rate. A series always holds
/// at least one amount.
///
/// # Example
///
/// ```rust
/// use fincalc_core::types::CashFlowSeries;
///
/// let series = CashFlowSeries::from_outlay(100.0, &[110.0]);
/// assert_eq!(series.amounts(), &[-100.0, 110.0]);
/// assert!(series.present_value(0.10).unwrap().abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct CashFlowSeries {
    amounts: Vec<f64>,
}

impl CashFlowSeries {
    /// Creates a series from amounts indexed by period.
    ///
    /// Fails with a domain error when `amounts` is empty.
    pub fn new(amounts: Vec<f64>) -> FinanceResult<Self> {
        if amounts.is_empty() {
            return Err(FinanceError::domain(
                "cash_flow_series",
                "a cash flow series needs at least one period",
            ));
        }
        Ok(Self { amounts })
    }

    /// Creates a series whose period 0 is `-outlay`, followed by `flows`.
    #[must_use]
    pub fn from_outlay(outlay: f64, flows: &[f64]) -> Self {
        let mut amounts = Vec::with_capacity(flows.len() + 1);
        amounts.push(-outlay);
        amounts.extend_from_slice(flows);
        Self { amounts }
    }

    /// Returns the amounts as a slice, period 0 first.
    #[must_use]
    pub fn amounts(&self) -> &[f64] {
        &self.amounts
    }

    /// Returns the number of periods, including period 0.
    #[must_use]
    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    /// Always false; a series holds at least one period.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    /// Returns an iterator of `(period, amount)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.amounts.iter().copied().enumerate()
    }

    /// Returns true if every amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amounts.iter().all(|a| *a == 0.0)
    }

    /// Counts the sign changes between consecutive non-zero amounts.
    ///
    /// A conventional project has exactly one.
    #[must_use]
    pub fn sign_changes(&self) -> usize {
        let mut changes = 0;
        let mut previous: Option<bool> = None;
        for amount in self.amounts.iter().filter(|a| **a != 0.0) {
            let positive = *amount > 0.0;
            if previous.is_some_and(|p| p != positive) {
                changes += 1;
            }
            previous = Some(positive);
        }
        changes
    }

    /// Sum of the amounts discounted at `rate` per period.
    ///
    /// `rate` must exceed -1 so that every discount factor is defined.
    pub fn present_value(&self, rate: f64) -> FinanceResult<f64> {
        if !rate.is_finite() || rate <= -1.0 {
            return Err(FinanceError::domain(
                "cash_flow_series",
                format!("discount rate must be finite and greater than -1, got {rate}"),
            ));
        }
        let value = self.discount_unchecked(rate);
        ensure_finite("cash_flow_series", value)
    }

    /// Discounted sum without validating `rate` or the result.
    ///
    /// Used inside root-finding loops where the caller owns the bracket.
    #[must_use]
    pub fn discount_unchecked(&self, rate: f64) -> f64 {
        let growth = 1.0 + rate;
        self.amounts
            .iter()
            .enumerate()
            .map(|(period, amount)| amount / growth.powi(period as i32))
            .sum()
    }
}

impl TryFrom<Vec<f64>> for CashFlowSeries {
    type Error = FinanceError;

    fn try_from(amounts: Vec<f64>) -> FinanceResult<Self> {
        Self::new(amounts)
    }
}

impl From<CashFlowSeries> for Vec<f64> {
    fn from(series: CashFlowSeries) -> Self {
        series.amounts
    }
}

impl fmt::Display for CashFlowSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.amounts.iter().map(|a| format!("{a}")).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_series_rejected() {
        let err = CashFlowSeries::new(Vec::new()).unwrap_err();
        assert!(err.is_domain());
    }

    #[test]
    fn test_from_outlay() {
        let series = CashFlowSeries::from_outlay(1000.0, &[500.0, 500.0, 500.0]);
        assert_eq!(series.len(), 4);
        assert_eq!(series.amounts()[0], -1000.0);
    }

    #[test]
    fn test_present_value() {
        let series = CashFlowSeries::from_outlay(1000.0, &[500.0, 500.0, 500.0]);
        let expected = -1000.0 + 500.0 / 1.1 + 500.0 / 1.21 + 500.0 / 1.331;
        assert_relative_eq!(series.present_value(0.10).unwrap(), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_period_zero_is_undiscounted() {
        let series = CashFlowSeries::new(vec![42.0]).unwrap();
        assert_relative_eq!(series.present_value(0.25).unwrap(), 42.0);
    }

    #[test]
    fn test_rate_at_minus_one_rejected() {
        let series = CashFlowSeries::new(vec![1.0, 2.0]).unwrap();
        assert!(series.present_value(-1.0).unwrap_err().is_domain());
    }

    #[test]
    fn test_sign_changes() {
        let conventional = CashFlowSeries::from_outlay(100.0, &[50.0, 0.0, 80.0]);
        assert_eq!(conventional.sign_changes(), 1);

        let unconventional = CashFlowSeries::new(vec![-100.0, 230.0, -132.0]).unwrap();
        assert_eq!(unconventional.sign_changes(), 2);

        let zero = CashFlowSeries::from_outlay(0.0, &[0.0]);
        assert!(zero.is_zero());
        assert_eq!(zero.sign_changes(), 0);
    }

    #[test]
    fn test_serde_shape() {
        let series = CashFlowSeries::from_outlay(10.0, &[11.0]);
        let json = serde_json::to_string(&series).unwrap();
        assert_eq!(json, "[-10.0,11.0]");

        let back: CashFlowSeries = serde_json::from_str(&json).unwrap();
        assert_eq!(back, series);
        assert!(serde_json::from_str::<CashFlowSeries>("[]").is_err());
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn zero_rate_sums_amounts(amounts in prop::collection::vec(-1e6..1e6f64, 1..40)) {
                let series = CashFlowSeries::new(amounts.clone()).unwrap();
                let total: f64 = amounts.iter().sum();
                prop_assert!((series.present_value(0.0).unwrap() - total).abs() < 1e-6);
            }

            #[test]
            fn positive_flows_lose_value_with_rate(
                amounts in prop::collection::vec(1.0..1e4f64, 2..30),
                rate in 0.001..0.5f64,
            ) {
                let series = CashFlowSeries::new(amounts).unwrap();
                let higher = series.present_value(rate + 0.01).unwrap();
                prop_assert!(higher < series.present_value(rate).unwrap());
            }
        }
    }
}
