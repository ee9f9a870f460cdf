//! Structural checks applied to a raw line before it is normalized.
//!
//! The validator only rejects forms the evaluator cannot make sense of. It
//! does no arithmetic and never looks at the environment.

use crate::error::{CalcError, Result};

/// Check a trimmed, non-empty expression line.
///
/// Rules are applied in order and the first violation is reported.
pub fn validate_expression(line: &str) -> Result<()> {
    if is_mixed_word(line) {
        return Err(CalcError::invalid_identifier(line));
    }

    if let Some(found) = letter_digit_contact(line) {
        return Err(CalcError::invalid_assignment(found));
    }

    if has_repeated_multiplicative(line) {
        return Err(CalcError::invalid_expression(
            "'*' and '/' cannot follow one another",
        ));
    }

    let opening = line.chars().filter(|&c| c == '(').count();
    let closing = line.chars().filter(|&c| c == ')').count();
    if opening != closing {
        return Err(CalcError::invalid_expression(format!(
            "unbalanced parentheses: {opening} opening, {closing} closing"
        )));
    }

    Ok(())
}

/// Check an assignment target: one or more letters and nothing else.
pub fn validate_identifier(name: &str) -> Result<()> {
    if !name.is_empty() && name.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(())
    } else {
        Err(CalcError::invalid_identifier(name))
    }
}

/// A single word that is neither a number nor a name, such as `a1` or `x_y`.
fn is_mixed_word(line: &str) -> bool {
    let is_word = !line.is_empty() && line.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    is_word
        && !line.chars().all(|c| c.is_ascii_digit())
        && !line.chars().all(|c| c.is_ascii_alphabetic())
}

/// Returns the offending word when a letter touches a digit.
fn letter_digit_contact(line: &str) -> Option<&str> {
    let bytes = line.as_bytes();
    let position = bytes.windows(2).position(|pair| {
        (pair[0].is_ascii_alphabetic() && pair[1].is_ascii_digit())
            || (pair[0].is_ascii_digit() && pair[1].is_ascii_alphabetic())
    })?;

    let is_word_byte = |b: &u8| b.is_ascii_alphanumeric();
    let start = bytes[..position]
        .iter()
        .rposition(|b| !is_word_byte(b))
        .map_or(0, |i| i + 1);
    let end = bytes[position..]
        .iter()
        .position(|b| !is_word_byte(b))
        .map_or(bytes.len(), |i| position + i);

    line.get(start..end)
}

fn has_repeated_multiplicative(line: &str) -> bool {
    line.as_bytes()
        .windows(2)
        .any(|pair| matches!(pair[0], b'*' | b'/') && matches!(pair[1], b'*' | b'/'))
}
