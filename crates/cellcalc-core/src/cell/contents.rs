//! Cell contents types

use std::collections::BTreeSet;

use cellcalc_formula::Formula;

use super::CellValue;

/// What was entered into a cell
///
/// A cell whose contents is empty text is considered empty and is not
/// stored.
#[derive(Debug, Clone, PartialEq)]
pub enum CellContents {
    /// Numeric literal
    Number(f64),

    /// Plain text
    Text(String),

    /// Parsed formula
    Formula(Formula),
}

impl CellContents {
    /// The contents of a cell that was never set
    pub const EMPTY: CellContents = CellContents::Text(String::new());

    /// Check if the contents is empty text
    pub fn is_empty(&self) -> bool {
        matches!(self, CellContents::Text(s) if s.is_empty())
    }

    /// Check if the cell contains a formula
    pub fn is_formula(&self) -> bool {
        matches!(self, CellContents::Formula(_))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellContents::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellContents::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_formula(&self) -> Option<&Formula> {
        match self {
            CellContents::Formula(f) => Some(f),
            _ => None,
        }
    }

    /// Cells this contents reads from
    pub fn dependencies(&self) -> BTreeSet<String> {
        match self {
            CellContents::Formula(f) => f.variables(),
            CellContents::Number(_) | CellContents::Text(_) => BTreeSet::new(),
        }
    }

    /// Compute the value of this contents
    ///
    /// `lookup` resolves a referenced cell to its numeric value, or `None`
    /// if the cell has no numeric value.
    pub fn evaluate<F>(&self, lookup: F) -> CellValue
    where
        F: FnMut(&str) -> Option<f64>,
    {
        match self {
            CellContents::Number(n) => CellValue::Number(*n),
            CellContents::Text(s) => CellValue::Text(s.clone()),
            CellContents::Formula(f) => match f.evaluate(lookup) {
                Ok(n) => CellValue::Number(n),
                Err(e) => CellValue::Error(e),
            },
        }
    }

    /// Render the contents as raw text that reproduces it when entered again
    ///
    /// Formulas are prefixed with `marker`.
    pub fn to_raw_text(&self, marker: char) -> String {
        match self {
            CellContents::Number(n) => n.to_string(),
            CellContents::Text(s) => s.clone(),
            CellContents::Formula(f) => format!("{}{}", marker, f.to_text()),
        }
    }
}

impl Default for CellContents {
    fn default() -> Self {
        CellContents::EMPTY
    }
}

impl From<f64> for CellContents {
    fn from(n: f64) -> Self {
        CellContents::Number(n)
    }
}

impl From<&str> for CellContents {
    fn from(s: &str) -> Self {
        CellContents::Text(s.to_string())
    }
}

impl From<String> for CellContents {
    fn from(s: String) -> Self {
        CellContents::Text(s)
    }
}

impl From<Formula> for CellContents {
    fn from(f: Formula) -> Self {
        CellContents::Formula(f)
    }
}
