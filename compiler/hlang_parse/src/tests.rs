use super::Parser;
use hlang_ir::{Expr, ExprKind, TokenKind, TokenStream};
use hlang_lexer::Lexer;
use pretty_assertions::assert_eq;

fn parse(source: &str) -> Expr {
    let mut stream = Lexer::new(source).try_tokenize().unwrap();
    Parser::new(&mut stream).parse_expression().unwrap()
}

fn parse_err(source: &str) -> hlang_diagnostic::ParseError {
    let mut stream = Lexer::new(source).try_tokenize().unwrap();
    Parser::new(&mut stream).parse_expression().unwrap_err()
}

/// Render the tree as a lisp-ish string for shape assertions.
fn shape(expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::Literal | ExprKind::Identifier => expr.token.lexeme.clone(),
        ExprKind::Binary { left, right }
        | ExprKind::Bitwise { left, right }
        | ExprKind::Comparison { left, right }
        | ExprKind::Logical { left, right }
        | ExprKind::Assignment { left, right } => {
            format!("({} {} {})", expr.token.lexeme, shape(left), shape(right))
        }
        ExprKind::Prefix { operand } => format!("({} {})", expr.token.lexeme, shape(operand)),
        ExprKind::Ternary {
            test,
            if_true,
            if_false,
        } => format!("(? {} {} {})", shape(test), shape(if_true), shape(if_false)),
    }
}

#[test]
fn multiplicative_binds_tighter_than_additive() {
    assert_eq!(shape(&parse("1+2*3")), "(+ 1 (* 2 3))");
}

#[test]
fn additive_is_left_associative() {
    assert_eq!(shape(&parse("1-2-3")), "(- (- 1 2) 3)");
    assert_eq!(shape(&parse("1/2/3")), "(/ (/ 1 2) 3)");
}

#[test]
fn exponent_is_right_associative() {
    assert_eq!(shape(&parse("2**3**2")), "(** 2 (** 3 2))");
}

#[test]
fn assignment_is_right_associative() {
    assert_eq!(shape(&parse("a=b=c=1")), "(= a (= b (= c 1)))");
}

#[test]
fn keyword_operators_parse_as_multiplicative() {
    assert_eq!(shape(&parse("a div b mod c")), "(mod (div a b) c)");
    assert_eq!(shape(&parse("1 + a div 2")), "(+ 1 (div a 2))");
}

#[test]
fn equality_binds_tighter_than_bitwise() {
    // The language's own ladder: & | ^ sit below equality, shifts above
    // relational.
    assert_eq!(shape(&parse("1&2==3")), "(& 1 (== 2 3))");
    assert_eq!(shape(&parse("1|2^3&4")), "(| 1 (^ 2 (& 3 4)))");
    assert_eq!(shape(&parse("1<<2+3")), "(<< 1 (+ 2 3))");
    assert_eq!(shape(&parse("1<2<<3")), "(< 1 (<< 2 3))");
}

#[test]
fn logic_sits_below_bitwise() {
    assert_eq!(shape(&parse("a and b or c")), "(or (and a b) c)");
    assert_eq!(shape(&parse("a and 1&2")), "(and a (& 1 2))");
}

#[test]
fn comparison_chains_left() {
    assert_eq!(shape(&parse("1<2==true")), "(== (< 1 2) true)");
}

#[test]
fn prefix_operators_bind_at_unary_level() {
    assert_eq!(shape(&parse("-2*3")), "(* (- 2) 3)");
    // Exponent outbinds unary, so the operand absorbs it.
    assert_eq!(shape(&parse("-2**3")), "(- (** 2 3))");
    assert_eq!(shape(&parse("!a and b")), "(and (! a) b)");
    assert_eq!(shape(&parse("~1&2")), "(& (~ 1) 2)");
}

#[test]
fn grouping_overrides_precedence() {
    assert_eq!(shape(&parse("(1+2)*3")), "(* (+ 1 2) 3)");
}

#[test]
fn ternary_branches_span_the_full_range() {
    assert_eq!(shape(&parse("a ? 1+2 : b=3")), "(? a (+ 1 2) (= b 3))");
    assert_eq!(shape(&parse("a ? b : c ? d : e")), "(? a b (? c d e))");
}

#[test]
fn repeated_calls_parse_successive_expressions() {
    let mut stream = Lexer::new("1+2\n3*4").try_tokenize().unwrap();
    let mut parser = Parser::new(&mut stream);
    let first = parser.parse_expression().unwrap();
    let second = parser.parse_expression().unwrap();
    assert_eq!(shape(&first), "(+ 1 2)");
    assert_eq!(shape(&second), "(* 3 4)");
}

#[test]
fn unexpected_prefix_token_is_a_grammar_error() {
    let err = parse_err("1 + * 2");
    assert_eq!(err.to_string(), "[ParseError] At (0, 4): Expected expression, but '*' found");
}

#[test]
fn missing_close_paren_is_a_grammar_error() {
    let err = parse_err("(1+2");
    assert!(
        err.to_string()
            .contains("Expected 'RightParen', but '' found"),
        "{err}"
    );
}

#[test]
fn missing_ternary_colon_is_a_grammar_error() {
    let err = parse_err("a ? 1 2");
    assert!(err.to_string().contains("Expected 'Colon'"), "{err}");
}

#[test]
fn nodes_carry_originating_tokens() {
    let expr = parse("1+2*3");
    assert_eq!(expr.token.kind, TokenKind::Plus);
    assert_eq!((expr.token.line, expr.token.column), (0, 1));
    let ExprKind::Binary { left, right } = &expr.kind else {
        panic!("expected binary root");
    };
    assert_eq!(left.token.lexeme, "1");
    assert_eq!((left.token.line, left.token.column), (0, 0));
    assert_eq!(right.token.kind, TokenKind::Star);
    assert_eq!((right.token.line, right.token.column), (0, 3));
}

#[test]
fn truncated_stream_errors_instead_of_looping() {
    // A stream cut short by a lexical error has no terminal token; the
    // clamped cursor keeps yielding the last token, which fails as a
    // prefix.
    let mut stream = TokenStream::new();
    stream.append(hlang_ir::Token::new(TokenKind::IntLiteral, "1", 0, 0));
    stream.append(hlang_ir::Token::new(TokenKind::Star, "*", 0, 1));
    let err = Parser::new(&mut stream).parse_expression().unwrap_err();
    assert!(err.to_string().contains("Expected expression"), "{err}");
}
