//! Domain types for finance formulas.
//!
//! - [`CashFlowSeries`]: Period-indexed cash flows discounted at a uniform rate
//! - [`ParamKind`]: Semantic type of a formula input
//! - [`ParamSpec`]: Named, labelled formula input
//! - [`ParamValue`]: Scalar or series value bound to a parameter

mod cashflow;
mod param;

pub use cashflow::CashFlowSeries;
pub use param::{ParamKind, ParamSpec, ParamValue};
