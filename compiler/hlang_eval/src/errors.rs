//! Runtime error type.
//!
//! The front end's three diagnostic kinds live in `hlang_diagnostic`; this
//! is the evaluator's own class, made explicit where the semantics would
//! otherwise fall through to the host's coercion or exception behavior.

use hlang_ir::Token;
use thiserror::Error;

/// Operator applied to incompatible value tags, or an arithmetic fault
/// (zero divisor, overflow) surfaced explicitly.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("[RuntimeError] At ({line}, {column}): {message}")]
pub struct RuntimeError {
    pub message: String,
    pub line: u32,
    pub column: u32,
}

impl RuntimeError {
    pub fn new(message: impl Into<String>, line: u32, column: u32) -> Self {
        RuntimeError {
            message: message.into(),
            line,
            column,
        }
    }

    /// Error positioned at the given token (the operator or literal whose
    /// evaluation failed).
    pub fn at(token: &Token, message: impl Into<String>) -> Self {
        RuntimeError::new(message, token.line, token.column)
    }
}

#[cfg(test)]
mod tests {
    use super::RuntimeError;
    use hlang_ir::{Token, TokenKind};
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_like_the_front_end_diagnostics() {
        let token = Token::new(TokenKind::Slash, "/", 2, 7);
        let err = RuntimeError::at(&token, "Division by zero");
        assert_eq!(err.to_string(), "[RuntimeError] At (2, 7): Division by zero");
    }
}
