//! Operator-precedence evaluator over a normalized expression stream.
//!
//! The evaluator makes a single left-to-right pass with an operand stack and an
//! operator stack. There is no token list and no tree: digit and letter runs
//! are turned into values as soon as they are scanned, and operators are
//! applied as soon as precedence allows.
//!
//! Unary minus is not an operator of its own. A `-` waiting on the operator
//! stack is folded into the sign of the next operand when more operators are
//! pending than there are operands to combine them with.

use crate::environment::Environment;
use crate::error::{CalcError, Result};
use num_bigint::BigInt;
use num_traits::Zero;
use std::fmt;

/// Entries of the operator stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Add,
    Subtract,
    Multiply,
    Divide,
    OpenParen,
}

impl Symbol {
    /// Map a binary operator character to its symbol
    pub fn binary(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            _ => None,
        }
    }

    /// Binding strength. An open parenthesis never yields to an incoming operator.
    pub fn precedence(self) -> u8 {
        match self {
            Self::OpenParen => 0,
            Self::Add | Self::Subtract => 1,
            Self::Multiply | Self::Divide => 2,
        }
    }

    pub fn is_operator(self) -> bool {
        self != Self::OpenParen
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
            Self::OpenParen => '(',
        };
        write!(f, "{c}")
    }
}

/// Evaluates normalized expressions against a read-only environment
pub struct ExpressionEvaluator<'env> {
    environment: &'env Environment,
}

impl<'env> ExpressionEvaluator<'env> {
    pub fn new(environment: &'env Environment) -> Self {
        Self { environment }
    }

    /// Evaluate a normalized stream to a single value
    pub fn evaluate(&self, stream: &str) -> Result<BigInt> {
        tracing::debug!(stream, "evaluating normalized expression");

        let chars: Vec<char> = stream.chars().collect();
        let mut stacks = Stacks::default();
        let mut position = 0;

        while position < chars.len() {
            let current = chars[position];

            if current.is_ascii_digit() {
                let end = run_end(&chars, position, |c| c.is_ascii_digit());
                let value = chars[position..end]
                    .iter()
                    .filter_map(|c| c.to_digit(10))
                    .fold(BigInt::zero(), |value, digit| value * 10u32 + digit);
                stacks.push_operand(value);
                position = end;
            } else if current.is_ascii_alphabetic() {
                let end = run_end(&chars, position, |c| c.is_ascii_alphabetic());
                let name: String = chars[position..end].iter().collect();
                let value = self.environment.get(&name)?.clone();
                stacks.push_operand(value);
                position = end;
            } else {
                match current {
                    '(' => stacks.operators.push(Symbol::OpenParen),
                    ')' => stacks.close_group()?,
                    _ => {
                        let symbol = Symbol::binary(current).ok_or_else(|| {
                            CalcError::invalid_expression(format!(
                                "unexpected character '{current}'"
                            ))
                        })?;
                        stacks.push_operator(symbol)?;
                    }
                }
                position += 1;
            }
        }

        stacks.finish()
    }
}

fn run_end(chars: &[char], start: usize, belongs: impl Fn(char) -> bool) -> usize {
    chars[start..]
        .iter()
        .position(|&c| !belongs(c))
        .map_or(chars.len(), |offset| start + offset)
}

/// Operand and operator stacks for one evaluation
#[derive(Debug, Default)]
struct Stacks {
    operands: Vec<BigInt>,
    operators: Vec<Symbol>,
}

impl Stacks {
    /// Push an operand, absorbing a pending unary minus into its sign
    fn push_operand(&mut self, value: BigInt) {
        let value = if self.take_unary_minus() { -value } else { value };
        self.operands.push(value);
    }

    /// A `-` on top of the stack is unary when the pending operators outnumber
    /// the operands already pushed.
    fn take_unary_minus(&mut self) -> bool {
        let pending = self.operators.iter().filter(|s| s.is_operator()).count();
        if self.operators.last() == Some(&Symbol::Subtract) && pending > self.operands.len() {
            self.operators.pop();
            true
        } else {
            false
        }
    }

    fn push_operator(&mut self, incoming: Symbol) -> Result<()> {
        while let Some(&top) = self.operators.last() {
            if top.precedence() < incoming.precedence() {
                break;
            }
            self.operators.pop();
            self.apply(top)?;
        }
        self.operators.push(incoming);
        Ok(())
    }

    fn close_group(&mut self) -> Result<()> {
        let open = self
            .operators
            .iter()
            .rposition(|&s| s == Symbol::OpenParen)
            .ok_or_else(|| CalcError::invalid_expression("')' without a matching '('"))?;

        while self.operators.len() > open + 1 {
            if let Some(symbol) = self.operators.pop() {
                self.apply(symbol)?;
            }
        }
        self.operators.truncate(open);
        Ok(())
    }

    fn finish(mut self) -> Result<BigInt> {
        while let Some(symbol) = self.operators.pop() {
            if symbol == Symbol::OpenParen {
                return Err(CalcError::invalid_expression("'(' is never closed"));
            }
            self.apply(symbol)?;
        }

        match (self.operands.pop(), self.operands.is_empty()) {
            (Some(value), true) => Ok(value),
            (None, _) => Err(CalcError::invalid_expression("nothing to evaluate")),
            (Some(_), false) => Err(CalcError::invalid_expression(
                "operands are missing an operator between them",
            )),
        }
    }

    /// Combine the top two operands with `symbol`
    fn apply(&mut self, symbol: Symbol) -> Result<()> {
        let (Some(right), Some(left)) = (self.operands.pop(), self.operands.pop()) else {
            return Err(CalcError::invalid_expression(format!(
                "'{symbol}' is missing an operand"
            )));
        };

        let value = match symbol {
            Symbol::Add => left + right,
            Symbol::Subtract => left - right,
            Symbol::Multiply => left * right,
            Symbol::Divide => {
                if right.is_zero() {
                    return Err(CalcError::DivisionByZero);
                }
                left / right
            }
            Symbol::OpenParen => {
                return Err(CalcError::invalid_expression("'(' cannot be applied"));
            }
        };

        tracing::trace!(operator = %symbol, result = %value, "applied operator");
        self.operands.push(value);
        Ok(())
    }
}
