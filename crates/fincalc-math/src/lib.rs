//! # Fincalc Math
//!
//! Numerical utilities for the Fincalc formula library.
//!
//! This crate provides:
//!
//! - **Solvers**: Bisection root finding over a bounded bracket, with an
//!   explicit policy for whether the bracket is verified before searching
//!
//! ## Design Philosophy
//!
//! - **Bounded**: Every search has a hard iteration cap
//! - **Explicit**: Bracket, tolerance and cap are caller-supplied values

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]

pub mod error;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{bisection, Bracket, BracketPolicy, SolverConfig, SolverResult};
}

pub use error::{MathError, MathResult};
