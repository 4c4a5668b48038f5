//! Capital budgeting: NPV, payback period and IRR.
//!
//! [`npv`] and [`irr`] share one cash flow convention: the initial outlay
//! is a positive number that is subtracted at period 0, and `cash_flows[0]`
//! is received at the end of period 1.

mod irr;

pub use irr::{
    irr, IrrConfig, IrrOutcome, NotFoundReason, DEFAULT_IRR_LOWER, DEFAULT_IRR_MAX_ITERATIONS,
    DEFAULT_IRR_TOLERANCE, DEFAULT_IRR_UPPER,
};

use fincalc_core::{ensure_finite, CashFlowSeries, FinanceResult};

use crate::guards::{non_empty, non_zero, positive};

/// Net present value, `-outlay + Σ cf_t / (1 + r)^t` for `t = 1..=N`.
///
/// # Example
///
/// ```rust
/// use fincalc_formulas::capital_budgeting::npv;
///
/// let value = npv(1000.0, 0.10, &[500.0, 500.0, 500.0]).unwrap();
/// assert!((value - 243.43).abs() < 0.01);
/// ```
pub fn npv(initial_outlay: f64, rate: f64, cash_flows: &[f64]) -> FinanceResult<f64> {
    const NAME: &str = "npv";
    positive(NAME, "rate", rate)?;
    non_empty(NAME, "cash_flows", cash_flows)?;
    let series = CashFlowSeries::from_outlay(initial_outlay, cash_flows);
    ensure_finite(NAME, series.discount_unchecked(rate))
}

/// Payback period, `years_before_recovery + remaining_cost / cash_flow_in_year`.
pub fn payback_period(
    years_before_recovery: f64,
    remaining_cost: f64,
    cash_flow_in_year: f64,
) -> FinanceResult<f64> {
    const NAME: &str = "payback_period";
    non_zero(NAME, "cash_flow_in_year", cash_flow_in_year)?;
    ensure_finite(
        NAME,
        years_before_recovery + remaining_cost / cash_flow_in_year,
    )
}
