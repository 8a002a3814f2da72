//! # cellcalc-formula
//!
//! Infix formula support for cellcalc.
//!
//! This crate provides:
//! - Tokenizing formula text into numbers, variables, operators and parentheses
//! - Construction-time syntax validation (a [`Formula`] is always well formed)
//! - Two-stack evaluation with standard `* /` over `+ -` precedence
//! - Variable extraction and rendering back to text
//!
//! It knows nothing about cells; variables are resolved through a
//! caller-supplied lookup.
//!
//! ## Example
//!
//! ```rust
//! use cellcalc_formula::Formula;
//!
//! let formula = Formula::new("(x + 2) * y").unwrap();
//! let value = formula
//!     .evaluate(|name| match name {
//!         "x" => Some(1.0),
//!         "y" => Some(4.0),
//!         _ => None,
//!     })
//!     .unwrap();
//! assert_eq!(value, 12.0);
//! ```

pub mod error;
mod evaluator;
pub mod formula;
pub mod token;

pub use error::{FormulaError, FormulaResult};
pub use formula::Formula;
pub use token::{Operator, Token};
