//! bigcalc interpreter
//!
//! Evaluates signed integer expressions of arbitrary size with `+ - * /`,
//! parentheses and named variables. A line flows through three stages:
//!
//! - validation rejects malformed forms before any arithmetic is attempted
//! - normalization strips whitespace and folds runs of sign characters
//! - evaluation scans the normalized stream once with an operand stack and an
//!   operator stack
//!
//! [`Interpreter`] ties the stages to a persistent [`Environment`] and handles
//! assignment statements.

pub mod environment;
pub mod error;
pub mod evaluator;
pub mod interpreter;
pub mod normalizer;
pub mod test_harness;
pub mod validator;

#[cfg(test)]
#[path = "tests/mod.rs"]
pub mod tests;

// Re-export public API
pub use environment::Environment;
pub use error::{CalcError, Result};
pub use evaluator::{ExpressionEvaluator, Symbol};
pub use interpreter::{Interpreter, Outcome};
pub use num_bigint::BigInt;
pub use test_harness::{CalculatorTestHarness, TestHarnessError};

/// Validate, normalize and evaluate a single expression line
///
/// The environment is only read. Assignment lines must go through
/// [`Interpreter::execute`] instead.
pub fn evaluate_expression(line: &str, environment: &Environment) -> Result<BigInt> {
    let line = line.trim();
    validator::validate_expression(line)?;
    let stream = normalizer::normalize(line);
    ExpressionEvaluator::new(environment).evaluate(&stream)
}
