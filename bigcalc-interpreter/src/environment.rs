//! Variable environment for the bigcalc interpreter.
//!
//! A flat mapping from identifier to value. Entries are added or overwritten
//! by assignments and are never removed during a session.

use crate::error::{CalcError, Result};
use num_bigint::BigInt;
use std::collections::HashMap;

/// Variable bindings accumulated over a session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    /// Variable name to value mapping (names are case-sensitive)
    variables: HashMap<String, BigInt>,
}

impl Environment {
    /// Create an empty environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a variable value by name
    pub fn get(&self, name: &str) -> Result<&BigInt> {
        self.variables
            .get(name)
            .ok_or_else(|| CalcError::unknown_variable(name))
    }

    /// Bind a value to a name, replacing any previous binding.
    /// Returns the value that was replaced, if any.
    pub fn assign(&mut self, name: impl Into<String>, value: BigInt) -> Option<BigInt> {
        self.variables.insert(name.into(), value)
    }

    /// Check if a variable exists
    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// All bindings, ordered by name
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BigInt)> {
        let mut bindings: Vec<_> = self
            .variables
            .iter()
            .map(|(name, value)| (name.as_str(), value))
            .collect();
        bindings.sort_by(|a, b| a.0.cmp(b.0));
        bindings.into_iter()
    }
}
