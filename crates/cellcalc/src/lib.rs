//! # cellcalc
//!
//! A store of named cells whose contents may be numbers, text, or formulas
//! referencing other cells, kept consistent under arbitrary edits.
//!
//! Every edit goes through [`Spreadsheet::set_contents`], which:
//!
//! - Parses the new contents (number, `=formula`, or text)
//! - Rewires the dependency graph for the edited cell
//! - Rejects the edit if it would create a circular dependency, leaving
//!   every cell and edge as it was
//! - Re-evaluates the edited cell and everything that depends on it, each
//!   cell after all of the cells it reads from
//!
//! Evaluation errors (undefined references, division by zero) are stored as
//! the cell's value and flow on to its dependents; they never fail the edit.
//!
//! ## Example
//!
//! ```rust
//! use cellcalc::prelude::*;
//!
//! let mut sheet = Spreadsheet::new();
//! sheet.set_contents("A1", "3").unwrap();
//! sheet.set_contents("B1", "=A1*A1").unwrap();
//! sheet.set_contents("C1", "=B1+A1").unwrap();
//!
//! assert_eq!(sheet.get_value("C1"), &CellValue::Number(12.0));
//!
//! let affected = sheet.set_contents("A1", "4").unwrap();
//! assert_eq!(affected.len(), 3);
//! assert_eq!(sheet.get_value("C1"), &CellValue::Number(20.0));
//!
//! // A1 -> B1 -> A1 is rejected and nothing changes
//! assert!(sheet.set_contents("A1", "=B1").is_err());
//! assert_eq!(sheet.get_contents("A1"), &CellContents::Number(4.0));
//! ```

pub mod options;
pub mod prelude;
pub mod spreadsheet;

pub use options::SpreadsheetOptions;
pub use spreadsheet::Spreadsheet;

// Re-export core types
pub use cellcalc_core::{
    CellContents, CellStore, CellValue, DependencyGraph, Error, NameValidator, Result,
};

// Re-export formula types
pub use cellcalc_formula::{Formula, FormulaError, FormulaResult, Operator, Token};
