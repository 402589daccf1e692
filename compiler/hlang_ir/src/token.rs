//! Token types for the HLang lexer.

use std::fmt;

/// What kind of token the lexer produced.
///
/// The set is closed: every consumer dispatches on it with an exhaustive
/// match, so adding a variant is a compile-time-checked change everywhere.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum TokenKind {
    EndOfStream,

    IntLiteral,
    DoubleLiteral,
    StringLiteral,
    BoolLiteral,
    HexLiteral,
    OctLiteral,
    BinLiteral,

    Identifier,

    Plus,
    Minus,
    Star,
    Slash,
    Div,
    Percent,
    Mod,
    DoubleStar,

    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,

    And,
    Or,
    Not,

    LeftParen,
    RightParen,

    Assign,

    Quest,
    Colon,

    LeftShift,
    RightShift,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseNot,

    Indent,
    Dedent,
}

impl TokenKind {
    /// Returns `true` for the layout markers (`Indent`/`Dedent`) that carry
    /// no lexeme and never begin or continue an expression.
    #[inline]
    pub fn is_structural(self) -> bool {
        matches!(self, TokenKind::Indent | TokenKind::Dedent)
    }

    /// The variant name, used in grammar errors ("Expected 'RightParen', ...").
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::EndOfStream => "EndOfStream",
            TokenKind::IntLiteral => "IntLiteral",
            TokenKind::DoubleLiteral => "DoubleLiteral",
            TokenKind::StringLiteral => "StringLiteral",
            TokenKind::BoolLiteral => "BoolLiteral",
            TokenKind::HexLiteral => "HexLiteral",
            TokenKind::OctLiteral => "OctLiteral",
            TokenKind::BinLiteral => "BinLiteral",
            TokenKind::Identifier => "Identifier",
            TokenKind::Plus => "Plus",
            TokenKind::Minus => "Minus",
            TokenKind::Star => "Star",
            TokenKind::Slash => "Slash",
            TokenKind::Div => "Div",
            TokenKind::Percent => "Percent",
            TokenKind::Mod => "Mod",
            TokenKind::DoubleStar => "DoubleStar",
            TokenKind::Equal => "Equal",
            TokenKind::NotEqual => "NotEqual",
            TokenKind::Less => "Less",
            TokenKind::LessOrEqual => "LessOrEqual",
            TokenKind::Greater => "Greater",
            TokenKind::GreaterOrEqual => "GreaterOrEqual",
            TokenKind::And => "And",
            TokenKind::Or => "Or",
            TokenKind::Not => "Not",
            TokenKind::LeftParen => "LeftParen",
            TokenKind::RightParen => "RightParen",
            TokenKind::Assign => "Assign",
            TokenKind::Quest => "Quest",
            TokenKind::Colon => "Colon",
            TokenKind::LeftShift => "LeftShift",
            TokenKind::RightShift => "RightShift",
            TokenKind::BitwiseAnd => "BitwiseAnd",
            TokenKind::BitwiseOr => "BitwiseOr",
            TokenKind::BitwiseXor => "BitwiseXor",
            TokenKind::BitwiseNot => "BitwiseNot",
            TokenKind::Indent => "Indent",
            TokenKind::Dedent => "Dedent",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token with its lexeme and source position.
///
/// Immutable once produced; AST nodes hold their originating token verbatim
/// so diagnostics can point back at the source.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: u32,
    pub column: u32,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: u32, column: u32) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            line,
            column,
        }
    }

    /// A lexeme-less token (`Indent`, `Dedent`, `EndOfStream`).
    pub fn structural(kind: TokenKind, line: u32, column: u32) -> Self {
        Token::new(kind, "", line, column)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} {:?} @ ({}, {})",
            self.kind, self.lexeme, self.line, self.column
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn structural_tokens_have_empty_lexeme() {
        let tok = Token::structural(TokenKind::Indent, 3, 0);
        assert_eq!(tok.lexeme, "");
        assert_eq!(tok.line, 3);
        assert!(tok.kind.is_structural());
        assert!(!TokenKind::Plus.is_structural());
    }

    #[test]
    fn kind_display_uses_variant_name() {
        assert_eq!(TokenKind::RightParen.to_string(), "RightParen");
        assert_eq!(TokenKind::Colon.to_string(), "Colon");
    }
}
