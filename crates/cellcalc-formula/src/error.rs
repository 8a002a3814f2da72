//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur while constructing or evaluating a formula
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormulaError {
    /// Syntax violation found while constructing a formula
    #[error("Formula format error: {0}")]
    Format(String),

    /// The lookup could not produce a value for a variable
    #[error("Undefined variable: {0}")]
    UndefinedVariable(String),

    /// Division by zero during evaluation
    #[error("Division by zero")]
    DivisionByZero,
}

impl FormulaError {
    /// Create a format error with a message
    pub fn format<S: Into<String>>(msg: S) -> Self {
        FormulaError::Format(msg.into())
    }

    /// True for errors raised while constructing a formula
    pub fn is_format(&self) -> bool {
        matches!(self, FormulaError::Format(_))
    }

    /// True for errors raised while evaluating a formula
    pub fn is_evaluation(&self) -> bool {
        !self.is_format()
    }
}
