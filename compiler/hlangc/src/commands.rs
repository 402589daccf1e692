//! Subcommand implementations for the `hlang` binary.
//!
//! The driver is the "caller" the core crates expect: it supplies the raw
//! source, consumes the token stream, AST roots, and values, and renders
//! any diagnostic. Errors abort the stage they occurred in; there is no
//! recovery or partial-success mode.

use std::fs;
use std::process;

use hlang_diagnostic::LexerError;
use hlang_eval::{Interpreter, Value};
use hlang_lexer::Lexer;
use hlang_parse::Parser;

/// Tokenize, then alternately parse and evaluate every top-level
/// expression, collecting one value per expression.
///
/// The returned error is already rendered in the
/// `[<Kind>] At (<line>, <column>): <message>` format.
pub fn run_source(source: &str) -> Result<Vec<Value>, String> {
    let mut stream = Lexer::new(source)
        .try_tokenize()
        .map_err(|err| err.to_string())?;
    let mut parser = Parser::new(&mut stream);
    let mut interpreter = Interpreter::new();
    let mut values = Vec::new();

    parser.skip_structural();
    while !parser.at_end() {
        let expr = parser.parse_expression().map_err(|err| err.to_string())?;
        let value = interpreter.eval(&expr).map_err(|err| err.to_string())?;
        values.push(value);
        parser.skip_structural();
    }
    Ok(values)
}

/// `hlang run <file>`: evaluate a source file, printing each value.
pub fn run_file(path: &str) {
    let source = read_source(path);
    match run_source(&source) {
        Ok(values) => {
            for value in values {
                println!("{value}");
            }
        }
        Err(message) => {
            eprintln!("{message}");
            process::exit(1);
        }
    }
}

/// `hlang lex <file>`: dump the token stream.
///
/// Uses the swallowing tokenizer entry point, so a lexical error leaves a
/// truncated stream; the missing terminal token is reported as the failure.
pub fn lex_file(path: &str) {
    let source = read_source(path);
    let stream = Lexer::new(&source).tokenize();
    for token in &stream {
        println!("{token:?}");
    }
    if !stream.is_terminated() {
        eprintln!("error: token stream truncated by a lexical error");
        process::exit(1);
    }
}

/// `hlang parse <file>`: dump one AST per top-level expression.
pub fn parse_file(path: &str) {
    let source = read_source(path);
    let mut stream = match Lexer::new(&source).try_tokenize() {
        Ok(stream) => stream,
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    };
    let mut parser = Parser::new(&mut stream);
    parser.skip_structural();
    while !parser.at_end() {
        match parser.parse_expression() {
            Ok(expr) => println!("{expr:#?}"),
            Err(err) => {
                eprintln!("{err}");
                process::exit(1);
            }
        }
        parser.skip_structural();
    }
}

fn read_source(path: &str) -> String {
    match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("{}", LexerError::new(format!("cannot read '{path}': {err}"), 0, 0));
            process::exit(1);
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::run_source;
    use hlang_eval::Value;
    use pretty_assertions::assert_eq;

    #[test]
    fn runs_a_single_expression() {
        assert_eq!(run_source("1+2*3").unwrap(), vec![Value::Int(7)]);
    }

    #[test]
    fn runs_expressions_across_indented_lines() {
        let values = run_source("x = 2\n  x ** 3\n10").unwrap();
        assert_eq!(
            values,
            vec![Value::Int(2), Value::Float(8.0), Value::Int(10)]
        );
    }

    #[test]
    fn empty_source_yields_no_values() {
        assert_eq!(run_source("").unwrap(), Vec::<Value>::new());
    }

    #[test]
    fn lexical_errors_render_their_kind() {
        let err = run_source("1 @ 2").unwrap_err();
        assert!(err.starts_with("[SyntaxError]"), "{err}");
    }

    #[test]
    fn grammar_errors_render_their_kind() {
        let err = run_source("(1+2").unwrap_err();
        assert!(err.starts_with("[ParseError]"), "{err}");
    }

    #[test]
    fn runtime_errors_render_their_kind() {
        let err = run_source("1/0").unwrap_err();
        assert!(err.starts_with("[RuntimeError]"), "{err}");
    }
}
