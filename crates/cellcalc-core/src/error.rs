//! Error types for cellcalc-core

use cellcalc_formula::FormulaError;
use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that reject an operation before anything is mutated
#[derive(Debug, Error)]
pub enum Error {
    /// A required identifier was missing (empty)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Identifier fails the cell-name validity check
    #[error("Invalid cell name: {0}")]
    InvalidName(String),

    /// Formula text could not be parsed
    #[error(transparent)]
    Formula(#[from] FormulaError),

    /// The edit would make a cell depend on itself
    #[error("Circular dependency detected involving cell {0}")]
    CircularDependency(String),

    /// A configured name pattern failed to compile
    #[error("Invalid name pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

impl Error {
    /// Create an invalid-argument error with a message
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        Error::InvalidArgument(msg.into())
    }
}

/// Reject an empty identifier
pub(crate) fn require_id(id: &str) -> Result<()> {
    if id.is_empty() {
        Err(Error::invalid_argument("identifier must not be empty"))
    } else {
        Ok(())
    }
}
