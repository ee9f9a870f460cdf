//! Statement front end for the bigcalc interpreter.
//!
//! An [`Interpreter`] owns the session environment and turns one input line
//! into an [`Outcome`]: nothing for blank input, a stored binding for an
//! assignment, or a value for an expression. Slash commands are handled by
//! the caller.

use crate::environment::Environment;
use crate::error::Result;
use crate::evaluate_expression;
use crate::validator::validate_identifier;
use num_bigint::BigInt;

/// Result of executing one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Blank input
    Empty,

    /// An expression was evaluated
    Value(BigInt),

    /// A variable was (re)bound
    Assigned { name: String, value: BigInt },
}

/// Interpreter session holding variables across lines
#[derive(Debug, Default)]
pub struct Interpreter {
    environment: Environment,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an interpreter over an existing set of bindings
    pub fn with_environment(environment: Environment) -> Self {
        Self { environment }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Execute an assignment or expression line
    pub fn execute(&mut self, line: &str) -> Result<Outcome> {
        let line = line.trim();

        if line.is_empty() {
            Ok(Outcome::Empty)
        } else if line.contains('=') {
            self.assign(line)
        } else {
            self.evaluate(line).map(Outcome::Value)
        }
    }

    /// Evaluate an expression without touching the environment
    pub fn evaluate(&self, expression: &str) -> Result<BigInt> {
        evaluate_expression(expression, &self.environment)
    }

    /// Handle `name = expression`.
    ///
    /// Only the first `=` separates target from expression; anything after it,
    /// including further `=` signs, belongs to the expression. The environment
    /// is only updated once the expression has been evaluated successfully.
    pub fn assign(&mut self, line: &str) -> Result<Outcome> {
        let (target, expression) = line.split_once('=').unwrap_or((line, ""));
        let name = target.trim();
        validate_identifier(name)?;

        let value = self.evaluate(expression.trim())?;
        tracing::debug!(name, %value, "assigned variable");

        self.environment.assign(name, value.clone());
        Ok(Outcome::Assigned {
            name: name.to_string(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalcError;
    use pretty_assertions::assert_eq;

    #[test]
    fn blank_lines_do_nothing() {
        let mut interpreter = Interpreter::new();
        assert_eq!(interpreter.execute(""), Ok(Outcome::Empty));
        assert_eq!(interpreter.execute("   \t"), Ok(Outcome::Empty));
        assert!(interpreter.environment().is_empty());
    }

    #[test]
    fn assignment_then_lookup() {
        let mut interpreter = Interpreter::new();

        assert_eq!(
            interpreter.execute("a = 5"),
            Ok(Outcome::Assigned {
                name: "a".to_string(),
                value: BigInt::from(5)
            })
        );
        assert_eq!(
            interpreter.execute("a + a"),
            Ok(Outcome::Value(BigInt::from(10)))
        );
    }

    #[test]
    fn assignment_target_must_be_letters() {
        let mut interpreter = Interpreter::new();

        for line in ["a1 = 5", "= 5", "_ = 5", "a b = 5"] {
            assert!(
                matches!(
                    interpreter.execute(line),
                    Err(CalcError::InvalidIdentifier { .. })
                ),
                "{line}"
            );
        }
    }

    #[test]
    fn chained_assignment_is_rejected() {
        let mut interpreter = Interpreter::new();

        // Everything after the first `=` is one expression.
        assert_eq!(
            interpreter.execute("a = b = 5"),
            Err(CalcError::unknown_variable("b"))
        );

        interpreter.execute("b = 1").unwrap();
        assert_eq!(
            interpreter.execute("a = b = 5"),
            Err(CalcError::invalid_expression("unexpected character '='"))
        );
        assert!(!interpreter.environment().contains("a"));
    }

    #[test]
    fn failed_assignment_keeps_previous_value() {
        let mut interpreter = Interpreter::new();
        interpreter.execute("x = 7").unwrap();

        assert_eq!(interpreter.execute("x = 1/0"), Err(CalcError::DivisionByZero));
        assert_eq!(
            interpreter.execute("x = y"),
            Err(CalcError::unknown_variable("y"))
        );
        assert_eq!(interpreter.environment().get("x"), Ok(&BigInt::from(7)));
    }

    #[test]
    fn assignment_copies_other_variables() {
        let mut interpreter = Interpreter::new();
        interpreter.execute("a = 3").unwrap();
        interpreter.execute("b = a").unwrap();
        interpreter.execute("a = 4").unwrap();

        assert_eq!(interpreter.evaluate("b"), Ok(BigInt::from(3)));
        assert_eq!(interpreter.evaluate("a"), Ok(BigInt::from(4)));
    }
}
