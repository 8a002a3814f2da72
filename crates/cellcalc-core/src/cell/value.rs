//! Cell value types

use std::fmt;

use cellcalc_formula::FormulaError;

/// The evaluated value of a cell
///
/// Text contents evaluate to themselves, numbers to themselves, and formulas
/// to either a number or an error. An error is data: it is stored as the
/// cell's value and propagates to dependents through failed lookups.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellValue {
    /// Numeric value
    Number(f64),

    /// Text value (empty for cells that were never set)
    Text(String),

    /// Evaluation failure for this cell
    Error(FormulaError),
}

impl CellValue {
    /// The value of a cell that does not exist
    pub const EMPTY: CellValue = CellValue::Text(String::new());

    /// Try to get the value as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get the value as text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the error if this is one
    pub fn error(&self) -> Option<&FormulaError> {
        match self {
            CellValue::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Check if the value is an error
    pub fn is_error(&self) -> bool {
        matches!(self, CellValue::Error(_))
    }

    /// Check if the value is empty text
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Text(s) if s.is_empty())
    }

    /// Get the type name for messages
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Number(_) => "number",
            CellValue::Text(_) => "text",
            CellValue::Error(_) => "error",
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::EMPTY
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Error(FormulaError::DivisionByZero) => write!(f, "#DIV/0!"),
            CellValue::Error(FormulaError::UndefinedVariable(_)) => write!(f, "#REF!"),
            CellValue::Error(FormulaError::Format(_)) => write!(f, "#VALUE!"),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<FormulaError> for CellValue {
    fn from(e: FormulaError) -> Self {
        CellValue::Error(e)
    }
}
