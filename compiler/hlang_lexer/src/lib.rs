//! Indentation-sensitive tokenizer for HLang.
//!
//! Consumes a character source exactly once, left to right, and materializes
//! a [`TokenStream`] terminated by an `EndOfStream` token. Layout is
//! significant: each newline re-measures the leading-whitespace depth and
//! emits `Indent`/`Dedent` markers, with the outstanding balance drained as
//! trailing `Dedent`s at end of input.
//!
//! Two entry points differ only in failure handling. [`Lexer::try_tokenize`]
//! propagates the first lexical error. [`Lexer::tokenize`] logs it and
//! returns the tokens produced so far *without* the terminal token; a
//! truncated stream is the failure signal downstream consumers must check
//! via [`TokenStream::is_terminated`].

mod cursor;

pub use cursor::Cursor;

use hlang_diagnostic::SyntaxError;
use hlang_ir::{Token, TokenKind, TokenStream};

/// Reserved identifier lexemes.
fn keyword_kind(ident: &str) -> Option<TokenKind> {
    match ident {
        "div" => Some(TokenKind::Div),
        "mod" => Some(TokenKind::Mod),
        "and" => Some(TokenKind::And),
        "or" => Some(TokenKind::Or),
        "true" | "false" => Some(TokenKind::BoolLiteral),
        _ => None,
    }
}

/// Operator table: single- and two-character lexemes. Two-character forms
/// are greedily preferred by the dispatcher.
fn operator_kind(lexeme: &str) -> Option<TokenKind> {
    match lexeme {
        "+" => Some(TokenKind::Plus),
        "-" => Some(TokenKind::Minus),
        "*" => Some(TokenKind::Star),
        "**" => Some(TokenKind::DoubleStar),
        "/" => Some(TokenKind::Slash),
        "%" => Some(TokenKind::Percent),
        "=" => Some(TokenKind::Assign),
        "==" => Some(TokenKind::Equal),
        "!" => Some(TokenKind::Not),
        "!=" => Some(TokenKind::NotEqual),
        "<" => Some(TokenKind::Less),
        "<=" => Some(TokenKind::LessOrEqual),
        ">" => Some(TokenKind::Greater),
        ">=" => Some(TokenKind::GreaterOrEqual),
        "<<" => Some(TokenKind::LeftShift),
        ">>" => Some(TokenKind::RightShift),
        "&" => Some(TokenKind::BitwiseAnd),
        "|" => Some(TokenKind::BitwiseOr),
        "^" => Some(TokenKind::BitwiseXor),
        "~" => Some(TokenKind::BitwiseNot),
        "(" => Some(TokenKind::LeftParen),
        ")" => Some(TokenKind::RightParen),
        "?" => Some(TokenKind::Quest),
        ":" => Some(TokenKind::Colon),
        _ => None,
    }
}

#[inline]
fn is_ident_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_'
}

#[inline]
fn is_ident_continue(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// `x`/`b`/`o` after a leading zero, case-insensitive.
#[inline]
fn is_base_prefix(byte: u8) -> bool {
    matches!(byte.to_ascii_lowercase(), b'x' | b'b' | b'o')
}

/// The characters that switch an integer scan to a real scan.
#[inline]
fn is_real_marker(byte: u8) -> bool {
    matches!(byte, b'.' | b'e' | b'E')
}

#[inline]
fn width(text: &str) -> u32 {
    u32::try_from(text.len()).unwrap_or(u32::MAX)
}

fn indent_marker_name(byte: u8) -> &'static str {
    if byte == b'\t' {
        "Tab"
    } else {
        "Space"
    }
}

/// The tokenizer. One instance consumes one source.
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    stream: TokenStream,
    /// First indentation character family seen in the file; lines indented
    /// with the other family are a lexical error.
    indent_style: Option<u8>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer {
            cursor: Cursor::new(source),
            stream: TokenStream::new(),
            indent_style: None,
        }
    }

    /// Tokenize, swallowing the first lexical error.
    ///
    /// The error is logged and scanning stops; the returned stream then
    /// lacks its terminal `EndOfStream` token.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn tokenize(mut self) -> TokenStream {
        if let Err(err) = self.run() {
            tracing::error!(%err, "lexical error, token stream truncated");
        }
        self.stream
    }

    /// Tokenize, propagating the first lexical error.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn try_tokenize(mut self) -> Result<TokenStream, SyntaxError> {
        self.run()?;
        Ok(self.stream)
    }

    fn run(&mut self) -> Result<(), SyntaxError> {
        let mut prev_depth = 0usize;
        let mut indent_balance = 0i64;

        while !self.cursor.is_eof() {
            let current = self.cursor.peek();
            if is_ident_start(current) {
                self.scan_identifier();
            } else if current.is_ascii_digit()
                || (current == b'.' && self.cursor.peek2().is_ascii_digit())
            {
                self.scan_number()?;
            } else {
                match current {
                    b'\n' => {
                        self.cursor.next();
                        self.cursor.start_line();
                        let depth = self.scan_indent_depth()?;
                        if depth > prev_depth {
                            self.stream.append(Token::structural(
                                TokenKind::Indent,
                                self.cursor.line(),
                                0,
                            ));
                            indent_balance += 1;
                        } else if depth < prev_depth {
                            self.stream.append(Token::structural(
                                TokenKind::Dedent,
                                self.cursor.line(),
                                0,
                            ));
                            indent_balance -= 1;
                        }
                        prev_depth = depth;
                    }
                    b'"' => {
                        self.cursor.next();
                        self.scan_string();
                    }
                    b' ' | b'\t' | b'\r' => {
                        self.cursor.next();
                    }
                    _ => self.scan_operator()?,
                }
            }
        }

        // Drain the outstanding indentation balance.
        while indent_balance > 0 {
            self.stream.append(Token::structural(
                TokenKind::Dedent,
                self.cursor.line(),
                self.cursor.column(),
            ));
            indent_balance -= 1;
        }
        self.stream.append(Token::structural(
            TokenKind::EndOfStream,
            self.cursor.line(),
            self.cursor.column(),
        ));
        Ok(())
    }

    /// Greedy identifier/keyword run. The reported column is the position
    /// where the run ended, not where it began.
    fn scan_identifier(&mut self) {
        let mut value = String::new();
        while is_ident_continue(self.cursor.peek()) {
            value.push(char::from(self.cursor.next()));
        }
        let kind = keyword_kind(&value).unwrap_or(TokenKind::Identifier);
        self.stream.append(Token::new(
            kind,
            value,
            self.cursor.line(),
            self.cursor.column(),
        ));
    }

    fn scan_number(&mut self) -> Result<(), SyntaxError> {
        let first = self.cursor.next();

        if first == b'0' && is_base_prefix(self.cursor.peek()) {
            let marker = self.cursor.next();
            let base = match marker.to_ascii_lowercase() {
                b'x' => 16,
                b'b' => 2,
                _ => 8,
            };
            self.scan_radix(base);
            return Ok(());
        }
        if first == b'.' {
            return self.scan_real(String::from("."));
        }

        let mut value = String::new();
        value.push(char::from(first));
        loop {
            let next = self.cursor.peek();
            if next.is_ascii_digit() || next == b'_' {
                value.push(char::from(self.cursor.next()));
            } else if is_real_marker(next) {
                return self.scan_real(value);
            } else {
                break;
            }
        }

        // Digits-only apart from separators, so any lexically long run is
        // accepted; only a trailing separator is malformed.
        if value.ends_with('_') {
            return Err(SyntaxError::new(
                format!("Invalid integer number '{value}'"),
                self.cursor.line(),
                self.cursor.column(),
            ));
        }
        let column = self.cursor.column() - width(&value);
        self.stream.append(Token::new(
            TokenKind::IntLiteral,
            value,
            self.cursor.line(),
            column,
        ));
        Ok(())
    }

    /// Digit run for a based literal; the `0x`/`0b`/`0o` prefix is already
    /// consumed and the reported column is corrected back over it.
    fn scan_radix(&mut self, base: u32) {
        const BASE_PREFIX_LEN: u32 = 2;

        let mut value = String::new();
        loop {
            let next = self.cursor.peek();
            let valid = match base {
                2 => matches!(next, b'0' | b'1'),
                8 => matches!(next, b'0'..=b'7'),
                _ => next.is_ascii_hexdigit(),
            };
            if !valid {
                break;
            }
            value.push(char::from(self.cursor.next()));
        }

        let kind = match base {
            2 => TokenKind::BinLiteral,
            8 => TokenKind::OctLiteral,
            _ => TokenKind::HexLiteral,
        };
        let column = self.cursor.column() - width(&value) - BASE_PREFIX_LEN;
        self.stream
            .append(Token::new(kind, value, self.cursor.line(), column));
    }

    /// Real-literal tail. `parsed` holds whatever the integer scan consumed;
    /// the marker that triggered the switch is consumed here.
    fn scan_real(&mut self, parsed: String) -> Result<(), SyntaxError> {
        let mut tail = String::new();
        tail.push(char::from(self.cursor.next()));
        let mut has_sign = false;

        loop {
            let next = self.cursor.peek();
            if is_real_marker(next) || next.is_ascii_digit() || next == b'_' {
                tail.push(char::from(self.cursor.next()));
            } else if (next == b'+' || next == b'-') && !has_sign {
                // One explicit exponent sign at most.
                has_sign = true;
                tail.push(char::from(self.cursor.next()));
            } else {
                break;
            }
        }

        let value = parsed + &tail;
        let valid = !value.ends_with('_') && value.replace('_', "").parse::<f64>().is_ok();
        if !valid {
            return Err(SyntaxError::new(
                format!("Invalid double literal '{value}'"),
                self.cursor.line(),
                self.cursor.column(),
            ));
        }
        let column = self.cursor.column() - width(&value);
        self.stream.append(Token::new(
            TokenKind::DoubleLiteral,
            value,
            self.cursor.line(),
            column,
        ));
        Ok(())
    }

    /// String body: everything up to the next `"` or newline, no escape
    /// processing. The terminator is consumed and discarded whatever it is,
    /// so an unterminated string is still emitted (known lossy edge).
    fn scan_string(&mut self) {
        let rest = self.cursor.remaining();
        let end = memchr::memchr2(b'"', b'\n', rest.as_bytes()).unwrap_or(rest.len());
        let value = rest.get(..end).unwrap_or_default().to_string();
        self.cursor.advance_by(end);
        self.cursor.next();

        let column = self.cursor.column() - width(&value);
        self.stream.append(Token::new(
            TokenKind::StringLiteral,
            value,
            self.cursor.line(),
            column,
        ));
    }

    /// Leading-whitespace depth of the line just started. Depth is a raw
    /// character count; the first indentation character seen pins the
    /// file's marker family.
    fn scan_indent_depth(&mut self) -> Result<usize, SyntaxError> {
        let mut depth = 0usize;
        loop {
            let next = self.cursor.peek();
            if next != b'\t' && next != b' ' {
                break;
            }
            match self.indent_style {
                None => self.indent_style = Some(next),
                Some(style) if style != next => {
                    return Err(SyntaxError::new(
                        format!(
                            "Inconsistent indentation marker: Expected '{}' but '{}' found",
                            indent_marker_name(style),
                            indent_marker_name(next),
                        ),
                        self.cursor.line(),
                        self.cursor.column(),
                    ));
                }
                Some(_) => {}
            }
            self.cursor.next();
            depth += 1;
        }
        Ok(depth)
    }

    /// Operator dispatch: consume one character, greedily extend to a
    /// two-character operator when the table has one. A character matching
    /// no table entry is pushed back and reported.
    fn scan_operator(&mut self) -> Result<(), SyntaxError> {
        let first = char::from(self.cursor.next());
        let mut lexeme = first.to_string();

        if operator_kind(&lexeme).is_none() {
            self.cursor.unget();
            return Err(SyntaxError::new(
                format!("Unknown character '{first}'"),
                self.cursor.line(),
                self.cursor.column(),
            ));
        }

        let mut longer = lexeme.clone();
        longer.push(char::from(self.cursor.peek()));
        if operator_kind(&longer).is_some() {
            self.cursor.next();
            lexeme = longer;
        }

        // Both the one- and two-character forms were just looked up.
        let Some(kind) = operator_kind(&lexeme) else {
            return Err(SyntaxError::new(
                format!("Unknown operator '{lexeme}'"),
                self.cursor.line(),
                self.cursor.column(),
            ));
        };
        let column = self.cursor.column() - width(&lexeme);
        self.stream
            .append(Token::new(kind, lexeme, self.cursor.line(), column));
        Ok(())
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
