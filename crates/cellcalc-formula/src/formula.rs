//! Validated infix formulas

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{FormulaError, FormulaResult};
use crate::token::{tokenize, Token};

/// An immutable, syntactically valid infix expression
///
/// Formulas are built from non-negative numeric literals, variables, the four
/// binary operators and parentheses. Unary `+`/`-` are not supported. Every
/// syntax check happens in the constructor, so evaluation can only fail on
/// undefined variables or division by zero.
///
/// Two formulas are equal when their normalized token sequences are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Formula {
    tokens: Vec<Token>,
}

impl Formula {
    /// Parse a formula without normalizing or validating variables
    ///
    /// # Example
    /// ```rust
    /// use cellcalc_formula::Formula;
    ///
    /// assert!(Formula::new("x*y-2+35/9").is_ok());
    /// assert!(Formula::new("-5.3").is_err());
    /// assert!(Formula::new("2 5 + 3").is_err());
    /// ```
    pub fn new(text: &str) -> FormulaResult<Self> {
        Self::with_normalizer(text, str::to_string, |_| true)
    }

    /// Parse a formula, normalizing each variable and then validating it
    ///
    /// `normalize` is applied to every variable token; the normalized name is
    /// what `validate` sees and what the formula stores. Construction fails if
    /// any normalized variable is rejected.
    pub fn with_normalizer<N, V>(text: &str, normalize: N, validate: V) -> FormulaResult<Self>
    where
        N: Fn(&str) -> String,
        V: Fn(&str) -> bool,
    {
        let mut tokens = tokenize(text)?;

        for token in tokens.iter_mut() {
            if let Token::Variable(name) = token {
                let normalized = normalize(name);
                if !validate(&normalized) {
                    return Err(FormulaError::format(format!(
                        "Invalid variable: {}",
                        normalized
                    )));
                }
                *name = normalized;
            }
        }

        check_structure(&tokens)?;
        Ok(Self { tokens })
    }

    /// The normalized token sequence
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The distinct variables referenced by this formula
    pub fn variables(&self) -> BTreeSet<String> {
        self.tokens
            .iter()
            .filter_map(|token| match token {
                Token::Variable(name) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    /// Render the normalized tokens back to formula text
    ///
    /// Re-parsing the result with the same normalizer and validator yields an
    /// equal formula.
    pub fn to_text(&self) -> String {
        self.tokens.iter().map(Token::to_string).collect()
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

impl FromStr for Formula {
    type Err = FormulaError;

    fn from_str(s: &str) -> FormulaResult<Self> {
        Formula::new(s)
    }
}

fn check_structure(tokens: &[Token]) -> FormulaResult<()> {
    let (Some(first), Some(last)) = (tokens.first(), tokens.last()) else {
        return Err(FormulaError::format(
            "Formula must have at least one token",
        ));
    };

    let mut open = 0usize;
    let mut close = 0usize;

    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::LeftParen => open += 1,
            Token::RightParen => {
                close += 1;
                if close > open {
                    return Err(FormulaError::format(
                        "Closing parenthesis without a matching opening parenthesis",
                    ));
                }
            }
            _ => {}
        }

        let Some(next) = tokens.get(i + 1) else {
            continue;
        };

        if matches!(token, Token::Operator(_) | Token::LeftParen) && !next.opens_operand() {
            return Err(FormulaError::format(format!(
                "Expected a number, variable or '(' after '{}', found '{}'",
                token, next
            )));
        }

        if token.closes_operand() && !next.follows_operand() {
            return Err(FormulaError::format(format!(
                "Expected an operator or ')' after '{}', found '{}'",
                token, next
            )));
        }
    }

    if open > close {
        return Err(FormulaError::format("Unclosed parenthesis"));
    }

    if !first.opens_operand() {
        return Err(FormulaError::format(format!(
            "Formula must begin with a number, variable or '(', found '{}'",
            first
        )));
    }

    if !last.closes_operand() {
        return Err(FormulaError::format(format!(
            "Formula must end with a number, variable or ')', found '{}'",
            last
        )));
    }

    Ok(())
}
