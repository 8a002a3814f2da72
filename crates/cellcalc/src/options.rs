//! Spreadsheet configuration

use cellcalc_core::{NameValidator, Result};
use regex::Regex;

/// Options controlling how a [`Spreadsheet`](crate::Spreadsheet) reads input
#[derive(Debug, Clone)]
pub struct SpreadsheetOptions {
    /// Prefix that marks contents as a formula (default: `=`)
    pub formula_marker: char,
    /// Upper-case cell names and formula variables (default: true)
    pub normalize_names: bool,
    /// Extra pattern every normalized cell name must match
    pub name_pattern: Option<Regex>,
}

impl Default for SpreadsheetOptions {
    fn default() -> Self {
        Self {
            formula_marker: '=',
            normalize_names: true,
            name_pattern: None,
        }
    }
}

impl SpreadsheetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require cell names to also match `pattern`
    pub fn with_name_pattern(mut self, pattern: &str) -> Result<Self> {
        self.name_pattern = Some(Regex::new(pattern)?);
        Ok(self)
    }

    pub fn with_formula_marker(mut self, marker: char) -> Self {
        self.formula_marker = marker;
        self
    }

    /// Keep cell names exactly as written
    pub fn preserve_case(mut self) -> Self {
        self.normalize_names = false;
        self
    }

    /// Apply the configured normalization to a cell name
    pub fn normalize(&self, name: &str) -> String {
        if self.normalize_names {
            name.to_uppercase()
        } else {
            name.to_string()
        }
    }

    pub(crate) fn name_validator(&self) -> NameValidator {
        match &self.name_pattern {
            Some(pattern) => NameValidator::with_pattern(pattern.clone()),
            None => NameValidator::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellcalc_core::Error;

    #[test]
    fn test_defaults() {
        let options = SpreadsheetOptions::default();
        assert_eq!(options.formula_marker, '=');
        assert!(options.normalize_names);
        assert!(options.name_pattern.is_none());
        assert_eq!(options.normalize("a1"), "A1");
    }

    #[test]
    fn test_builders() {
        let options = SpreadsheetOptions::new()
            .with_formula_marker('+')
            .preserve_case()
            .with_name_pattern("^[A-Z]+[0-9]+$")
            .unwrap();
        assert_eq!(options.formula_marker, '+');
        assert_eq!(options.normalize("a1"), "a1");
        assert!(options.name_validator().is_valid("A1"));
        assert!(!options.name_validator().is_valid("a1"));
    }

    #[test]
    fn test_bad_pattern() {
        let err = SpreadsheetOptions::new().with_name_pattern("(").unwrap_err();
        assert!(matches!(err, Error::InvalidPattern(_)));
    }
}
