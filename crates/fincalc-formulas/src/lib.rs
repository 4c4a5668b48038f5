//! # Fincalc Formulas
//!
//! Closed-form corporate finance formulas, a registry that evaluates them by
//! name, and an IRR solver.
//!
//! ## Modules
//!
//! - [`time_value`]: discount factors, present and future values, cash flow streams
//! - [`annuities`]: level and growing perpetuities and annuities
//! - [`rates`]: APR, EAR, real rates and period conversion
//! - [`bonds`]: zero-coupon and coupon bond prices and yields
//! - [`stocks`]: holding-period prices and dividend discount models
//! - [`firm`]: enterprise value and free cash flow
//! - [`options`]: intrinsic payoffs at expiry
//! - [`capital_budgeting`]: NPV, payback period and IRR
//! - [`registry`]: [`FormulaId`], [`Params`] and [`evaluate`]
//!
//! Every function returns a [`FinanceResult`]: a domain error when an input
//! is outside the formula's domain and a numeric error when the result is
//! not finite.
//!
//! ## Example
//!
//! ```rust
//! use fincalc_formulas::prelude::*;
//!
//! let params = Params::new()
//!     .with("face_value", 1000.0)
//!     .with("ytm", 0.05)
//!     .with("periods", 10.0);
//! let price = evaluate(FormulaId::ZeroCouponPrice, &params).unwrap();
//! assert!((price - 613.91).abs() < 0.01);
//!
//! let outcome = irr(100.0, &[110.0], &IrrConfig::default()).unwrap();
//! assert!((outcome.rate().unwrap() - 0.10).abs() < 1e-4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::enum_glob_use)]

mod guards;

pub mod annuities;
pub mod bonds;
pub mod capital_budgeting;
pub mod firm;
pub mod options;
pub mod rates;
pub mod registry;
pub mod stocks;
pub mod time_value;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::capital_budgeting::{irr, IrrConfig, IrrOutcome, NotFoundReason};
    pub use crate::registry::{evaluate, evaluate_named, Category, FormulaId, FormulaSpec, Params};
    pub use fincalc_core::{FinanceError, FinanceResult, ParamKind, ParamValue};
    pub use fincalc_math::solvers::BracketPolicy;
}

pub use capital_budgeting::{irr, IrrConfig, IrrOutcome, NotFoundReason};
pub use fincalc_core::{FinanceError, FinanceResult};
pub use fincalc_math::solvers::BracketPolicy;
pub use registry::{evaluate, evaluate_named, Category, FormulaId, FormulaSpec, Params};
