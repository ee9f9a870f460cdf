//! Test harness for the bigcalc interpreter
//!
//! Wraps an [`Interpreter`] so that tests can:
//! - run a sequence of lines, keeping variables between them (REPL-like)
//! - assert on evaluated values given as decimal strings of any size
//! - assert on the exact error a line produces

use crate::{BigInt, CalcError, Interpreter, Outcome};
use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur during test harness operations
#[derive(Debug, Error, Diagnostic)]
pub enum TestHarnessError {
    #[error("Evaluation error: {source}")]
    Evaluation {
        #[from]
        source: CalcError,
    },

    #[error("Assertion failed for '{input}': expected {expected}, but got {actual}")]
    AssertionFailed {
        input: String,
        expected: String,
        actual: String,
    },

    #[error("Setup error: {message}")]
    Setup { message: String },
}

/// Interpreter session with assertion helpers
#[derive(Debug, Default)]
pub struct CalculatorTestHarness {
    interpreter: Interpreter,
}

impl CalculatorTestHarness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute a line and return what it produced
    pub fn execute(&mut self, line: &str) -> Result<Outcome, TestHarnessError> {
        Ok(self.interpreter.execute(line)?)
    }

    /// Run setup lines (usually assignments), failing on the first error
    pub fn run_all(&mut self, lines: &[&str]) -> Result<(), TestHarnessError> {
        for line in lines {
            self.execute(line)?;
        }
        Ok(())
    }

    /// Read a variable that a test expects to be bound
    pub fn variable(&self, name: &str) -> Result<BigInt, TestHarnessError> {
        self.interpreter
            .environment()
            .get(name)
            .cloned()
            .map_err(|_| TestHarnessError::Setup {
                message: format!("variable '{name}' is not bound"),
            })
    }

    /// Execute code and assert it evaluates to the given decimal value
    pub fn assert_evaluates_to(
        &mut self,
        expression_code: &str,
        expected: &str,
    ) -> Result<(), TestHarnessError> {
        let expected_value: BigInt = expected.parse().map_err(|_| TestHarnessError::Setup {
            message: format!("'{expected}' is not a decimal integer"),
        })?;

        match self.execute(expression_code)? {
            Outcome::Value(value) if value == expected_value => Ok(()),
            other => Err(TestHarnessError::AssertionFailed {
                input: expression_code.to_string(),
                expected: expected.to_string(),
                actual: describe(&other),
            }),
        }
    }

    /// Execute code and assert it evaluates to a specific integer
    pub fn assert_evaluates_to_integer(
        &mut self,
        expression_code: &str,
        expected: i64,
    ) -> Result<(), TestHarnessError> {
        self.assert_evaluates_to(expression_code, &expected.to_string())
    }

    /// Execute code and assert it fails with exactly this error
    pub fn assert_fails_with(
        &mut self,
        code: &str,
        expected: CalcError,
    ) -> Result<(), TestHarnessError> {
        match self.interpreter.execute(code) {
            Err(error) if error == expected => Ok(()),
            Err(error) => Err(TestHarnessError::AssertionFailed {
                input: code.to_string(),
                expected: format!("{expected:?}"),
                actual: format!("{error:?}"),
            }),
            Ok(outcome) => Err(TestHarnessError::AssertionFailed {
                input: code.to_string(),
                expected: format!("{expected:?}"),
                actual: describe(&outcome),
            }),
        }
    }

    /// Execute code and assert it fails with an error of the same kind,
    /// ignoring the detail carried by the variant
    pub fn assert_fails_like(
        &mut self,
        code: &str,
        expected: &CalcError,
    ) -> Result<(), TestHarnessError> {
        match self.interpreter.execute(code) {
            Err(error) if std::mem::discriminant(&error) == std::mem::discriminant(expected) => {
                Ok(())
            }
            Err(error) => Err(TestHarnessError::AssertionFailed {
                input: code.to_string(),
                expected: expected.to_string(),
                actual: error.to_string(),
            }),
            Ok(outcome) => Err(TestHarnessError::AssertionFailed {
                input: code.to_string(),
                expected: expected.to_string(),
                actual: describe(&outcome),
            }),
        }
    }
}

fn describe(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Empty => "no output".to_string(),
        Outcome::Value(value) => value.to_string(),
        Outcome::Assigned { name, value } => format!("assignment {name} = {value}"),
    }
}
