//! # Fincalc Core
//!
//! Core types and error handling for the Fincalc formula library.
//!
//! This crate provides the foundational building blocks used throughout Fincalc:
//!
//! - **Errors**: [`FinanceError`] with its domain and numeric failure kinds
//! - **Types**: [`CashFlowSeries`], parameter kinds and values
//!
//! ## Example
//!
//! ```rust
//! use fincalc_core::prelude::*;
//!
//! let series = CashFlowSeries::from_outlay(1000.0, &[500.0, 500.0, 500.0]);
//! assert_eq!(series.len(), 4);
//! assert!(series.present_value(0.10).unwrap() > 0.0);
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

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ensure_finite, FinanceError, FinanceResult};
    pub use crate::types::{CashFlowSeries, ParamKind, ParamSpec, ParamValue};
}

// Re-export commonly used types at crate root
pub use error::{ensure_finite, FinanceError, FinanceResult};
pub use types::{CashFlowSeries, ParamKind, ParamSpec, ParamValue};
