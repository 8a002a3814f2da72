//! Cell-name validation
//!
//! A valid cell name is one or more ASCII letters, followed by a non-zero
//! digit, followed by zero or more digits (`A1`, `xy32`, `BC7`; not `Z`,
//! `X07` or `hello`). A [`NameValidator`] can narrow this further with an
//! extra pattern that must also match.

use once_cell::sync::Lazy;
use regex::Regex;

static CELL_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z]+[1-9][0-9]*$").expect("cell name regex must compile")
});

/// True if `name` has standard cell-name syntax
pub fn is_cell_name(name: &str) -> bool {
    CELL_NAME_RE.is_match(name)
}

/// Cell-name validity predicate with an optional extra pattern
#[derive(Debug, Clone, Default)]
pub struct NameValidator {
    pattern: Option<Regex>,
}

impl NameValidator {
    /// Accept every name with standard cell-name syntax
    pub fn new() -> Self {
        Self::default()
    }

    /// Additionally require `pattern` to match
    pub fn with_pattern(pattern: Regex) -> Self {
        Self {
            pattern: Some(pattern),
        }
    }

    /// The extra pattern, if any
    pub fn pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }

    pub fn is_valid(&self, name: &str) -> bool {
        is_cell_name(name) && self.pattern.as_ref().map_or(true, |re| re.is_match(name))
    }
}
