//! Buffered token stream with a clamped cursor.

use std::fmt;

use crate::token::{Token, TokenKind};

/// An append-only buffer of tokens plus a read cursor.
///
/// The lexer materializes the whole stream before the parser reads it. The
/// cursor never advances past one-past-last; reads beyond the end keep
/// yielding the final token, which on a well-formed stream is the terminal
/// `EndOfStream`. A stream that ends without that terminal token is the
/// lexer's failure signal and callers must treat it as such.
#[derive(Clone, Default)]
pub struct TokenStream {
    tokens: Vec<Token>,
    cursor: usize,
}

impl TokenStream {
    pub fn new() -> Self {
        TokenStream {
            tokens: Vec::new(),
            cursor: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        TokenStream {
            tokens: Vec::with_capacity(capacity),
            cursor: 0,
        }
    }

    /// Append a token. Tokens are never removed or reordered.
    #[inline]
    pub fn append(&mut self, token: Token) {
        self.tokens.push(token);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Whether the stream carries its terminal `EndOfStream` token.
    ///
    /// The lexer omits it after a swallowed lexical error, so this doubles
    /// as the well-formedness check for downstream consumers.
    pub fn is_terminated(&self) -> bool {
        self.tokens
            .last()
            .is_some_and(|t| t.kind == TokenKind::EndOfStream)
    }

    /// Index into the buffer, clamped to the last token.
    fn clamped(&self, index: usize) -> Token {
        match self.tokens.get(index.min(self.tokens.len().saturating_sub(1))) {
            Some(token) => token.clone(),
            // Empty stream: synthesize a terminal token instead of panicking.
            None => Token::structural(TokenKind::EndOfStream, 0, 0),
        }
    }

    /// Non-consuming lookahead. `distance` 0 is the token `next()` would
    /// return; lookahead past the end yields the final token.
    #[inline]
    pub fn peek(&self, distance: usize) -> Token {
        self.clamped(self.cursor + distance)
    }

    /// Kind of the token `next()` would return.
    #[inline]
    pub fn peek_kind(&self) -> TokenKind {
        self.peek(0).kind
    }

    /// Consume and return the next token, clamped at the end.
    #[inline]
    pub fn next(&mut self) -> Token {
        let token = self.clamped(self.cursor);
        self.cursor = (self.cursor + 1).min(self.tokens.len());
        token
    }

    /// Rewind the cursor by one token.
    #[inline]
    pub fn unget(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    #[inline]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

impl fmt::Debug for TokenStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenStream({} tokens)", self.tokens.len())
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
