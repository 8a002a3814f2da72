//! Convenient re-exports for common use
//!
//! ```rust
//! use cellcalc::prelude::*;
//! ```

pub use crate::{
    CellContents, CellValue, Error, Formula, FormulaError, Result, Spreadsheet,
    SpreadsheetOptions,
};
