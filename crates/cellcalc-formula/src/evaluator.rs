//! Two-stack infix evaluation
//!
//! Operands go on a value stack and operators on an operator stack. `*` and
//! `/` are applied as soon as their right operand is known; `+` and `-` are
//! deferred until the next additive operator, closing parenthesis or the end
//! of the formula, which gives standard precedence with left-to-right
//! associativity.

use crate::error::{FormulaError, FormulaResult};
use crate::formula::Formula;
use crate::token::{Operator, Token};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Pending {
    Op(Operator),
    Open,
}

#[derive(Debug, Default)]
struct Stacks {
    values: Vec<f64>,
    ops: Vec<Pending>,
}

impl Stacks {
    fn top_is(&self, pred: impl Fn(Operator) -> bool) -> Option<Operator> {
        match self.ops.last() {
            Some(Pending::Op(op)) if pred(*op) => Some(*op),
            _ => None,
        }
    }

    fn pop_value(&mut self) -> FormulaResult<f64> {
        self.values
            .pop()
            .ok_or_else(|| FormulaError::format("Malformed expression"))
    }

    /// Push an operand, folding it into a pending `*` or `/`
    fn push_operand(&mut self, value: f64) -> FormulaResult<()> {
        if let Some(op) = self.top_is(Operator::is_multiplicative) {
            self.ops.pop();
            let left = self.pop_value()?;
            self.values.push(op.apply(left, value)?);
        } else {
            self.values.push(value);
        }
        Ok(())
    }

    /// Apply the top operator if it is additive
    fn reduce_additive(&mut self) -> FormulaResult<()> {
        if let Some(op) = self.top_is(|op| !op.is_multiplicative()) {
            self.ops.pop();
            let right = self.pop_value()?;
            let left = self.pop_value()?;
            self.values.push(op.apply(left, right)?);
        }
        Ok(())
    }

    fn close_paren(&mut self) -> FormulaResult<()> {
        self.reduce_additive()?;
        if self.ops.pop() != Some(Pending::Open) {
            return Err(FormulaError::format("Malformed expression"));
        }
        // The parenthesized value is the right operand of any pending * or /
        let value = self.pop_value()?;
        self.push_operand(value)
    }

    fn finish(mut self) -> FormulaResult<f64> {
        self.reduce_additive()?;
        let result = self.pop_value()?;
        if !self.values.is_empty() || !self.ops.is_empty() {
            return Err(FormulaError::format("Malformed expression"));
        }
        Ok(result)
    }
}

impl Formula {
    /// Evaluate the formula
    ///
    /// `lookup` maps a variable name to its value, or returns `None` when the
    /// variable is undefined. Undefined variables and division by zero are
    /// reported as errors; stack state never escapes this call.
    ///
    /// # Example
    /// ```rust
    /// use cellcalc_formula::{Formula, FormulaError};
    ///
    /// let formula = Formula::new("10 - 4 - 3").unwrap();
    /// assert_eq!(formula.evaluate(|_| None), Ok(3.0));
    ///
    /// let formula = Formula::new("1 / x").unwrap();
    /// assert_eq!(formula.evaluate(|_| Some(0.0)), Err(FormulaError::DivisionByZero));
    /// ```
    pub fn evaluate<F>(&self, mut lookup: F) -> FormulaResult<f64>
    where
        F: FnMut(&str) -> Option<f64>,
    {
        let mut stacks = Stacks::default();

        for token in self.tokens() {
            match token {
                Token::Number(n) => stacks.push_operand(*n)?,
                Token::Variable(name) => {
                    let value = lookup(name)
                        .ok_or_else(|| FormulaError::UndefinedVariable(name.clone()))?;
                    stacks.push_operand(value)?;
                }
                Token::Operator(op) => {
                    if !op.is_multiplicative() {
                        stacks.reduce_additive()?;
                    }
                    stacks.ops.push(Pending::Op(*op));
                }
                Token::LeftParen => stacks.ops.push(Pending::Open),
                Token::RightParen => stacks.close_paren()?,
            }
        }

        stacks.finish()
    }
}
