//! Cell-related types
//!
//! This module contains:
//! - [`CellContents`] - What was entered into a cell (number, text or formula)
//! - [`CellValue`] - What a cell evaluates to (number, text or error)

mod contents;
mod value;

pub use contents::CellContents;
pub use value::CellValue;
