//! Error kinds for the HLang front end.
//!
//! Three kinds cross the pipeline boundary, all rendered as
//! `[<Kind>] At (<line>, <column>): <message>`:
//!
//! - [`SyntaxError`]: lexical. Malformed literal, inconsistent indentation,
//!   unknown character. Raised during tokenization.
//! - [`ParseError`]: grammar. Unexpected token in prefix position, missing
//!   expected token. Raised during parsing.
//! - [`LexerError`]: generic lexer-level failure (unreadable source).
//!
//! Runtime type errors are the evaluator's own class and live with it.

use thiserror::Error;

/// Lexical error with the offending position.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("[SyntaxError] At ({line}, {column}): {message}")]
pub struct SyntaxError {
    pub message: String,
    pub line: u32,
    pub column: u32,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, line: u32, column: u32) -> Self {
        SyntaxError {
            message: message.into(),
            line,
            column,
        }
    }
}

/// Grammar error raised by the parser.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("[ParseError] At ({line}, {column}): {message}")]
pub struct ParseError {
    pub message: String,
    pub line: u32,
    pub column: u32,
}

impl ParseError {
    pub fn new(message: impl Into<String>, line: u32, column: u32) -> Self {
        ParseError {
            message: message.into(),
            line,
            column,
        }
    }
}

/// Lexer-level failure outside the lexical grammar itself.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("[LexerError] At ({line}, {column}): {message}")]
pub struct LexerError {
    pub message: String,
    pub line: u32,
    pub column: u32,
}

impl LexerError {
    pub fn new(message: impl Into<String>, line: u32, column: u32) -> Self {
        LexerError {
            message: message.into(),
            line,
            column,
        }
    }
}
