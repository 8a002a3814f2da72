//! Formula tokens and the scanner that produces them.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{FormulaError, FormulaResult};

/// The four binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Parse an operator symbol
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Subtract),
            '*' => Some(Operator::Multiply),
            '/' => Some(Operator::Divide),
            _ => None,
        }
    }

    /// The symbol used when rendering
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }

    /// True for `*` and `/`, which bind tighter than `+` and `-`
    pub fn is_multiplicative(self) -> bool {
        matches!(self, Operator::Multiply | Operator::Divide)
    }

    /// Apply the operator to two operands
    pub fn apply(self, left: f64, right: f64) -> FormulaResult<f64> {
        match self {
            Operator::Add => Ok(left + right),
            Operator::Subtract => Ok(left - right),
            Operator::Multiply => Ok(left * right),
            Operator::Divide => {
                if right == 0.0 {
                    Err(FormulaError::DivisionByZero)
                } else {
                    Ok(left / right)
                }
            }
        }
    }
}

/// A single formula token
///
/// Number literals are always finite and non-negative, so tokens can be
/// compared and hashed by value.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal
    Number(f64),
    /// Variable name (a letter followed by letters and digits)
    Variable(String),
    /// Binary operator
    Operator(Operator),
    LeftParen,
    RightParen,
}

impl Token {
    /// Number, variable or opening parenthesis: a token that can begin an operand
    pub fn opens_operand(&self) -> bool {
        matches!(
            self,
            Token::Number(_) | Token::Variable(_) | Token::LeftParen
        )
    }

    /// Number, variable or closing parenthesis: a token that can end an operand
    pub fn closes_operand(&self) -> bool {
        matches!(
            self,
            Token::Number(_) | Token::Variable(_) | Token::RightParen
        )
    }

    /// Operator or closing parenthesis
    pub fn follows_operand(&self) -> bool {
        matches!(self, Token::Operator(_) | Token::RightParen)
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Token::Number(n) => n.to_bits().hash(state),
            Token::Variable(name) => name.hash(state),
            Token::Operator(op) => op.hash(state),
            Token::LeftParen | Token::RightParen => {}
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Variable(name) => write!(f, "{}", name),
            Token::Operator(op) => write!(f, "{}", op.symbol()),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
        }
    }
}

/// Split formula text into tokens
///
/// Whitespace separates tokens but is never part of one. Any character that
/// cannot start a token is reported as an invalid token.
pub fn tokenize(input: &str) -> FormulaResult<Vec<Token>> {
    let mut scanner = Scanner::new(input);
    let mut tokens = Vec::new();
    while let Some(token) = scanner.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}

struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn next_token(&mut self) -> FormulaResult<Option<Token>> {
        self.skip_whitespace();

        let Some(c) = self.peek_char() else {
            return Ok(None);
        };

        if let Some(op) = Operator::from_char(c) {
            self.advance();
            return Ok(Some(Token::Operator(op)));
        }

        match c {
            '(' => {
                self.advance();
                Ok(Some(Token::LeftParen))
            }
            ')' => {
                self.advance();
                Ok(Some(Token::RightParen))
            }
            c if c.is_ascii_digit() || c == '.' => self.scan_number().map(Some),
            c if c.is_ascii_alphabetic() => Ok(Some(self.scan_variable())),
            other => Err(FormulaError::format(format!("Invalid token: '{}'", other))),
        }
    }

    fn scan_number(&mut self) -> FormulaResult<Token> {
        let start = self.pos;
        let mut digits = 0;

        while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
            digits += 1;
        }

        if self.peek_char() == Some('.') {
            self.advance();
            while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
                self.advance();
                digits += 1;
            }
        }

        if digits == 0 {
            return Err(FormulaError::format(format!(
                "Invalid token: '{}'",
                &self.input[start..self.pos]
            )));
        }

        // Exponent only when digits follow; otherwise the 'e' starts the next token
        if self.peek_char().map_or(false, |c| c == 'e' || c == 'E') {
            let sign = self.peek_char_at(1).map_or(false, |c| c == '+' || c == '-');
            let first_digit = if sign { 2 } else { 1 };
            if self
                .peek_char_at(first_digit)
                .map_or(false, |c| c.is_ascii_digit())
            {
                for _ in 0..first_digit {
                    self.advance();
                }
                while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
                    self.advance();
                }
            }
        }

        let text = &self.input[start..self.pos];
        match text.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(Token::Number(n)),
            Ok(_) => Err(FormulaError::format(format!(
                "Number literal out of range: {}",
                text
            ))),
            Err(_) => Err(FormulaError::format(format!("Invalid token: '{}'", text))),
        }
    }

    fn scan_variable(&mut self) -> Token {
        let start = self.pos;
        while self
            .peek_char()
            .map_or(false, |c| c.is_ascii_alphanumeric())
        {
            self.advance();
        }
        Token::Variable(self.input[start..self.pos].to_string())
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_char_at(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().map_or(false, |c| c.is_whitespace()) {
            self.advance();
        }
    }
}
