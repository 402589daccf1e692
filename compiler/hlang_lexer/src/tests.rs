use super::Lexer;
use hlang_ir::{TokenKind, TokenStream};
use pretty_assertions::assert_eq;

fn lex(source: &str) -> TokenStream {
    Lexer::new(source).try_tokenize().unwrap()
}

fn kinds(stream: &TokenStream) -> Vec<TokenKind> {
    stream.tokens().iter().map(|t| t.kind).collect()
}

fn summaries(stream: &TokenStream) -> Vec<(TokenKind, String, u32, u32)> {
    stream
        .tokens()
        .iter()
        .map(|t| (t.kind, t.lexeme.clone(), t.line, t.column))
        .collect()
}

#[test]
fn simple_add() {
    let stream = lex("1+1");
    assert_eq!(
        summaries(&stream),
        vec![
            (TokenKind::IntLiteral, "1".to_string(), 0, 0),
            (TokenKind::Plus, "+".to_string(), 0, 1),
            (TokenKind::IntLiteral, "1".to_string(), 0, 2),
            (TokenKind::EndOfStream, String::new(), 0, 3),
        ]
    );
}

#[test]
fn double_star_binds_two_characters() {
    let stream = lex("1**2>3");
    assert_eq!(
        summaries(&stream),
        vec![
            (TokenKind::IntLiteral, "1".to_string(), 0, 0),
            (TokenKind::DoubleStar, "**".to_string(), 0, 1),
            (TokenKind::IntLiteral, "2".to_string(), 0, 3),
            (TokenKind::Greater, ">".to_string(), 0, 4),
            (TokenKind::IntLiteral, "3".to_string(), 0, 5),
            (TokenKind::EndOfStream, String::new(), 0, 6),
        ]
    );
}

#[test]
fn real_literals_report_start_columns() {
    let stream = lex("1.0+2.0*3.0");
    assert_eq!(
        summaries(&stream),
        vec![
            (TokenKind::DoubleLiteral, "1.0".to_string(), 0, 0),
            (TokenKind::Plus, "+".to_string(), 0, 3),
            (TokenKind::DoubleLiteral, "2.0".to_string(), 0, 4),
            (TokenKind::Star, "*".to_string(), 0, 7),
            (TokenKind::DoubleLiteral, "3.0".to_string(), 0, 8),
            (TokenKind::EndOfStream, String::new(), 0, 11),
        ]
    );
}

#[test]
fn exponent_forms() {
    for source in ["1.2e2", "1.2e+222", "1.2e-222", "1e9", "1e-922", "10e8"] {
        let stream = lex(source);
        assert_eq!(
            kinds(&stream),
            vec![TokenKind::DoubleLiteral, TokenKind::EndOfStream],
            "source {source:?}"
        );
        assert_eq!(stream.tokens()[0].lexeme, source);
    }
}

#[test]
fn second_exponent_sign_ends_the_literal() {
    let stream = lex("1e+2+3");
    assert_eq!(
        kinds(&stream),
        vec![
            TokenKind::DoubleLiteral,
            TokenKind::Plus,
            TokenKind::IntLiteral,
            TokenKind::EndOfStream,
        ]
    );
    assert_eq!(stream.tokens()[0].lexeme, "1e+2");
}

#[test]
fn leading_dot_starts_a_real_literal() {
    let stream = lex(".5");
    assert_eq!(
        summaries(&stream)[0],
        (TokenKind::DoubleLiteral, ".5".to_string(), 0, 0)
    );
}

#[test]
fn underscore_separators_accepted() {
    let stream = lex("1_000_00");
    assert_eq!(stream.tokens()[0].lexeme, "1_000_00");
    assert_eq!(stream.tokens()[0].kind, TokenKind::IntLiteral);
}

#[test]
fn trailing_underscore_is_a_lexical_error() {
    let err = Lexer::new("1_+2*3").try_tokenize().unwrap_err();
    assert!(err.message.contains("Invalid integer number '1_'"), "{err}");
}

#[test]
fn malformed_real_is_a_lexical_error() {
    let err = Lexer::new("1.2.3").try_tokenize().unwrap_err();
    assert!(err.message.contains("Invalid double literal '1.2.3'"), "{err}");
}

#[test]
fn based_literals() {
    let stream = lex("0xaBcDeF 0b1010 0o716 0XFF");
    assert_eq!(
        summaries(&stream),
        vec![
            (TokenKind::HexLiteral, "aBcDeF".to_string(), 0, 0),
            (TokenKind::BinLiteral, "1010".to_string(), 0, 9),
            (TokenKind::OctLiteral, "716".to_string(), 0, 16),
            (TokenKind::HexLiteral, "FF".to_string(), 0, 22),
            (TokenKind::EndOfStream, String::new(), 0, 26),
        ]
    );
}

#[test]
fn keywords_and_identifiers() {
    let stream = lex("a div b mod c and d or true false count_2");
    assert_eq!(
        kinds(&stream),
        vec![
            TokenKind::Identifier,
            TokenKind::Div,
            TokenKind::Identifier,
            TokenKind::Mod,
            TokenKind::Identifier,
            TokenKind::And,
            TokenKind::Identifier,
            TokenKind::Or,
            TokenKind::BoolLiteral,
            TokenKind::BoolLiteral,
            TokenKind::Identifier,
            TokenKind::EndOfStream,
        ]
    );
    assert_eq!(stream.tokens()[10].lexeme, "count_2");
}

#[test]
fn operator_table_covers_two_character_forms() {
    let stream = lex("<= >= == != << >> ** < > = ! ~ & | ^ ( ) ? : % /");
    assert_eq!(
        kinds(&stream),
        vec![
            TokenKind::LessOrEqual,
            TokenKind::GreaterOrEqual,
            TokenKind::Equal,
            TokenKind::NotEqual,
            TokenKind::LeftShift,
            TokenKind::RightShift,
            TokenKind::DoubleStar,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::Assign,
            TokenKind::Not,
            TokenKind::BitwiseNot,
            TokenKind::BitwiseAnd,
            TokenKind::BitwiseOr,
            TokenKind::BitwiseXor,
            TokenKind::LeftParen,
            TokenKind::RightParen,
            TokenKind::Quest,
            TokenKind::Colon,
            TokenKind::Percent,
            TokenKind::Slash,
            TokenKind::EndOfStream,
        ]
    );
}

#[test]
fn string_literal_body_without_quotes() {
    let stream = lex("\"hello world\"");
    assert_eq!(stream.tokens()[0].kind, TokenKind::StringLiteral);
    assert_eq!(stream.tokens()[0].lexeme, "hello world");
}

#[test]
fn unterminated_string_is_still_emitted() {
    let stream = lex("\"abc");
    assert_eq!(
        kinds(&stream),
        vec![TokenKind::StringLiteral, TokenKind::EndOfStream]
    );
    assert_eq!(stream.tokens()[0].lexeme, "abc");
}

#[test]
fn string_newline_terminator_is_swallowed() {
    // The newline that ends the string is consumed as the terminator, so no
    // indentation pass runs and the line counter stays put.
    let stream = lex("\"ab\ncd");
    assert_eq!(
        kinds(&stream),
        vec![
            TokenKind::StringLiteral,
            TokenKind::Identifier,
            TokenKind::EndOfStream,
        ]
    );
    assert_eq!(stream.tokens()[1].line, 0);
}

#[test]
fn indent_and_dedent_tokens() {
    let stream = lex("1\n  1\n    1");
    assert_eq!(
        kinds(&stream),
        vec![
            TokenKind::IntLiteral,
            TokenKind::Indent,
            TokenKind::IntLiteral,
            TokenKind::Indent,
            TokenKind::IntLiteral,
            TokenKind::Dedent,
            TokenKind::Dedent,
            TokenKind::EndOfStream,
        ]
    );
}

#[test]
fn dedent_on_depth_decrease() {
    let stream = lex("1\n  2\n3");
    assert_eq!(
        kinds(&stream),
        vec![
            TokenKind::IntLiteral,
            TokenKind::Indent,
            TokenKind::IntLiteral,
            TokenKind::Dedent,
            TokenKind::IntLiteral,
            TokenKind::EndOfStream,
        ]
    );
}

#[test]
fn equal_depth_emits_no_structural_tokens() {
    let stream = lex("1\n2\n3");
    assert_eq!(
        kinds(&stream),
        vec![
            TokenKind::IntLiteral,
            TokenKind::IntLiteral,
            TokenKind::IntLiteral,
            TokenKind::EndOfStream,
        ]
    );
}

#[test]
fn mixed_indentation_families_raise_an_error() {
    let err = Lexer::new("1\n  1\n\t1").try_tokenize().unwrap_err();
    assert!(
        err.message.contains("Inconsistent indentation marker"),
        "{err}"
    );
    assert_eq!((err.line, err.column), (2, 0));
}

#[test]
fn unknown_character_is_a_lexical_error() {
    let err = Lexer::new("1 @ 2").try_tokenize().unwrap_err();
    assert!(err.message.contains("Unknown character '@'"), "{err}");
    assert_eq!((err.line, err.column), (0, 2));
}

#[test]
fn tokenize_swallows_and_truncates() {
    let stream = Lexer::new("1 @ 2").tokenize();
    assert!(!stream.is_terminated());
    assert_eq!(kinds(&stream), vec![TokenKind::IntLiteral]);
}

#[test]
fn tokenize_terminates_on_success() {
    let stream = Lexer::new("1+1").tokenize();
    assert!(stream.is_terminated());
    assert_eq!(stream.len(), 4);
}
