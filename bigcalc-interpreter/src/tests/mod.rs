//! Acceptance tests for the bigcalc interpreter
//!
//! These tests drive whole lines through the validator → normalizer →
//! evaluator pipeline, with variables persisting between lines.

pub mod test_sign_runs;
