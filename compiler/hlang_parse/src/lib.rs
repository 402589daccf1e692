//! Pratt parser for HLang expressions.
//!
//! Two lookup tables map token kinds to parsing rules: prefix rules start an
//! expression, infix rules continue one. [`Parser::parse_precedence`] climbs
//! while the upcoming token's infix binding power strictly exceeds the
//! current threshold; left-associative rules recurse at their own power and
//! right-associative ones (`**`, `=`) at one below it.
//!
//! The parser consumes the stream exactly once, left to right. Repeated
//! [`Parser::parse_expression`] calls pick up where the previous one left
//! off, yielding one AST root per top-level expression.

mod precedence;
mod rules;

pub use precedence::Precedence;

use hlang_diagnostic::ParseError;
use hlang_ir::{Expr, ExprKind, Token, TokenKind, TokenStream};
use rustc_hash::FxHashMap;

use crate::rules::{InfixRule, PrefixRule};

/// Parser state: the borrowed stream plus the rule registries.
pub struct Parser<'a> {
    stream: &'a mut TokenStream,
    prefix_rules: FxHashMap<TokenKind, PrefixRule>,
    infix_rules: FxHashMap<TokenKind, InfixRule>,
}

impl<'a> Parser<'a> {
    pub fn new(stream: &'a mut TokenStream) -> Self {
        let mut parser = Parser {
            stream,
            prefix_rules: FxHashMap::default(),
            infix_rules: FxHashMap::default(),
        };
        parser.register_rules();
        parser
    }

    fn register_rules(&mut self) {
        use TokenKind::{
            And, Assign, BinLiteral, BitwiseAnd, BitwiseNot, BitwiseOr, BitwiseXor, BoolLiteral,
            Div, DoubleLiteral, DoubleStar, Equal, Greater, GreaterOrEqual, HexLiteral, Identifier,
            IntLiteral, LeftParen, LeftShift, Less, LessOrEqual, Minus, Mod, Not, NotEqual,
            OctLiteral, Or, Percent, Plus, Quest, RightShift, Slash, Star, StringLiteral,
        };

        // Leaves.
        for kind in [
            IntLiteral,
            DoubleLiteral,
            StringLiteral,
            BoolLiteral,
            HexLiteral,
            OctLiteral,
            BinLiteral,
        ] {
            self.prefix_rules.insert(kind, PrefixRule::Literal);
        }
        self.prefix_rules.insert(Identifier, PrefixRule::Identifier);

        // Prefix operators and grouping.
        for kind in [Plus, Minus, Not, BitwiseNot] {
            self.prefix_rules.insert(kind, PrefixRule::PrefixOperator);
        }
        self.prefix_rules.insert(LeftParen, PrefixRule::Grouping);

        // Arithmetic.
        for kind in [Plus, Minus] {
            self.register_binary(kind, Precedence::Additive);
        }
        for kind in [Star, Slash, Div, Percent, Mod] {
            self.register_binary(kind, Precedence::Multiplicative);
        }
        self.infix_rules.insert(
            DoubleStar,
            InfixRule::Binary {
                precedence: Precedence::Exponent,
                right_assoc: true,
            },
        );

        // Comparisons.
        for kind in [Equal, NotEqual] {
            self.infix_rules.insert(
                kind,
                InfixRule::Comparison {
                    precedence: Precedence::Equality,
                },
            );
        }
        for kind in [Less, LessOrEqual, Greater, GreaterOrEqual] {
            self.infix_rules.insert(
                kind,
                InfixRule::Comparison {
                    precedence: Precedence::Relational,
                },
            );
        }

        // Logic.
        self.infix_rules.insert(
            And,
            InfixRule::Logical {
                precedence: Precedence::LogicalAnd,
            },
        );
        self.infix_rules.insert(
            Or,
            InfixRule::Logical {
                precedence: Precedence::LogicalOr,
            },
        );

        // Bitwise.
        self.register_bitwise(BitwiseAnd, Precedence::BitwiseAnd);
        self.register_bitwise(BitwiseOr, Precedence::BitwiseOr);
        self.register_bitwise(BitwiseXor, Precedence::BitwiseXor);
        self.register_bitwise(LeftShift, Precedence::BitwiseShift);
        self.register_bitwise(RightShift, Precedence::BitwiseShift);

        // Conditional and assignment.
        self.infix_rules.insert(Quest, InfixRule::Ternary);
        self.infix_rules.insert(Assign, InfixRule::Assignment);
    }

    fn register_binary(&mut self, kind: TokenKind, precedence: Precedence) {
        self.infix_rules.insert(
            kind,
            InfixRule::Binary {
                precedence,
                right_assoc: false,
            },
        );
    }

    fn register_bitwise(&mut self, kind: TokenKind, precedence: Precedence) {
        self.infix_rules
            .insert(kind, InfixRule::Bitwise { precedence });
    }

    /// Parse one expression from where the stream left off.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_precedence(0)
    }

    /// Skip layout tokens (`Indent`/`Dedent`) between top-level expressions.
    pub fn skip_structural(&mut self) {
        while self.stream.peek(0).kind.is_structural() {
            self.stream.next();
        }
    }

    /// Whether the stream has reached its terminal token.
    pub fn at_end(&self) -> bool {
        self.stream.peek(0).kind == TokenKind::EndOfStream
    }

    /// Core climbing loop: build an expression whose operators all bind
    /// more tightly than `min_precedence`.
    pub fn parse_precedence(&mut self, min_precedence: u8) -> Result<Expr, ParseError> {
        let token = self.stream.next();
        let Some(rule) = self.prefix_rules.get(&token.kind).copied() else {
            return Err(ParseError::new(
                format!("Expected expression, but '{}' found", token.lexeme),
                token.line,
                token.column,
            ));
        };
        let mut expr = self.apply_prefix(rule, token)?;

        loop {
            let Some(rule) = self.infix_rules.get(&self.stream.peek(0).kind).copied() else {
                break;
            };
            if rule.precedence() <= min_precedence {
                break;
            }
            let token = self.stream.next();
            expr = self.apply_infix(rule, expr, token)?;
        }

        Ok(expr)
    }

    fn apply_prefix(&mut self, rule: PrefixRule, token: Token) -> Result<Expr, ParseError> {
        match rule {
            PrefixRule::Literal => Ok(Expr::literal(token)),
            PrefixRule::Identifier => Ok(Expr::identifier(token)),
            PrefixRule::PrefixOperator => {
                let operand = self.parse_precedence(Precedence::Unary.power())?;
                Ok(Expr::new(
                    token,
                    ExprKind::Prefix {
                        operand: Box::new(operand),
                    },
                ))
            }
            PrefixRule::Grouping => {
                let expr = self.parse_precedence(0)?;
                self.consume(TokenKind::RightParen)?;
                Ok(expr)
            }
        }
    }

    fn apply_infix(&mut self, rule: InfixRule, left: Expr, token: Token) -> Result<Expr, ParseError> {
        let left = Box::new(left);
        match rule {
            InfixRule::Binary {
                precedence,
                right_assoc,
            } => {
                let threshold = precedence.power() - u8::from(right_assoc);
                let right = Box::new(self.parse_precedence(threshold)?);
                Ok(Expr::new(token, ExprKind::Binary { left, right }))
            }
            InfixRule::Bitwise { precedence } => {
                let right = Box::new(self.parse_precedence(precedence.power())?);
                Ok(Expr::new(token, ExprKind::Bitwise { left, right }))
            }
            InfixRule::Comparison { precedence } => {
                let right = Box::new(self.parse_precedence(precedence.power())?);
                Ok(Expr::new(token, ExprKind::Comparison { left, right }))
            }
            InfixRule::Logical { precedence } => {
                let right = Box::new(self.parse_precedence(precedence.power())?);
                Ok(Expr::new(token, ExprKind::Logical { left, right }))
            }
            InfixRule::Ternary => {
                let if_true = Box::new(self.parse_precedence(0)?);
                self.consume(TokenKind::Colon)?;
                let if_false = Box::new(self.parse_precedence(0)?);
                Ok(Expr::new(
                    token,
                    ExprKind::Ternary {
                        test: left,
                        if_true,
                        if_false,
                    },
                ))
            }
            InfixRule::Assignment => {
                let threshold = Precedence::Assignment.power() - 1;
                let right = Box::new(self.parse_precedence(threshold)?);
                Ok(Expr::new(token, ExprKind::Assignment { left, right }))
            }
        }
    }

    /// Require the next token to be `kind`, consuming it.
    fn consume(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        let token = self.stream.next();
        if token.kind != kind {
            return Err(ParseError::new(
                format!("Expected '{}', but '{}' found", kind, token.lexeme),
                token.line,
                token.column,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
