//! Error types for the bigcalc interpreter.
//!
//! Every stage of the pipeline (validation, normalization, evaluation and
//! assignment) reports failures through [`CalcError`]. The display message is
//! the short text shown to the user; the miette diagnostic carries a code and
//! a help line with the offending detail.

use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur while processing a single input line
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    #[error("Invalid identifier")]
    #[diagnostic(
        code(bigcalc::invalid_identifier),
        help("'{found}' is not a valid identifier: identifiers contain Latin letters only")
    )]
    InvalidIdentifier { found: String },

    #[error("Invalid assignment")]
    #[diagnostic(
        code(bigcalc::invalid_assignment),
        help("'{found}' mixes letters and digits without an operator between them")
    )]
    InvalidAssignment { found: String },

    #[error("Invalid expression")]
    #[diagnostic(code(bigcalc::invalid_expression), help("{reason}"))]
    InvalidExpression { reason: String },

    #[error("Unknown variable")]
    #[diagnostic(
        code(bigcalc::unknown_variable),
        help("Assign a value first, e.g. {name} = 42")
    )]
    UnknownVariable { name: String },

    #[error("Division by zero")]
    #[diagnostic(
        code(bigcalc::division_by_zero),
        help("Ensure the divisor is not zero before division")
    )]
    DivisionByZero,
}

impl CalcError {
    /// Create an invalid identifier error
    pub fn invalid_identifier(found: &str) -> Self {
        Self::InvalidIdentifier {
            found: found.to_string(),
        }
    }

    /// Create an invalid assignment error
    pub fn invalid_assignment(found: &str) -> Self {
        Self::InvalidAssignment {
            found: found.to_string(),
        }
    }

    /// Create an invalid expression error
    pub fn invalid_expression(reason: impl Into<String>) -> Self {
        Self::InvalidExpression {
            reason: reason.into(),
        }
    }

    /// Create an unknown variable error
    pub fn unknown_variable(name: &str) -> Self {
        Self::UnknownVariable {
            name: name.to_string(),
        }
    }
}

/// Type alias for interpreter results
pub type Result<T> = std::result::Result<T, CalcError>;
