//! Literal reconstruction
//!
//! Concatenates the decoded values of every string-literal token reachable
//! in a candidate's initializer, in source order, with no separator.
//! Token-level extraction reaches across concatenation operators,
//! parentheses, and any other wrapping expression; non-literal operands
//! (identifiers, calls, interpolation placeholders) contribute no text.
//! That silent drop is a documented approximation, not an error.

use super::scanner::Candidate;
use crate::syntax::TokenKind;

/// Reconstruct the literal text of a candidate.
///
/// Never fails: a candidate without an initializer, or whose initializer
/// holds no string-literal token, yields the empty string.
pub fn reconstruct(candidate: &Candidate<'_>) -> String {
    match candidate.initializer {
        Some(initializer) => initializer
            .tokens_of(TokenKind::StringLiteral)
            .map(|token| token.text.as_str())
            .collect(),
        None => String::new(),
    }
}
