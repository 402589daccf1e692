//! The tree-walking evaluator.

use hlang_ir::{Expr, ExprKind, Token, TokenKind};

use crate::environment::SymbolTable;
use crate::errors::RuntimeError;
use crate::operators;
use crate::unary_operators;
use crate::value::Value;

/// Evaluates expression trees against an owned symbol table.
///
/// One instance corresponds to one evaluation session: the table is created
/// with the interpreter, lives as long as it, and is mutated only by
/// assignment nodes.
#[derive(Debug, Default)]
pub struct Interpreter {
    symbols: SymbolTable,
}

impl Interpreter {
    pub fn new() -> Self {
        Interpreter {
            symbols: SymbolTable::new(),
        }
    }

    /// Evaluate one expression tree to a value.
    ///
    /// A runtime type error aborts the whole call; no partial result is
    /// produced, though assignments already performed remain in the table.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn eval(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match &expr.kind {
            ExprKind::Literal => literal_value(&expr.token),
            ExprKind::Identifier => Ok(self
                .symbols
                .lookup(&expr.token.lexeme)
                .cloned()
                // Unresolved names evaluate to their own name as text.
                .unwrap_or_else(|| Value::Text(expr.token.lexeme.clone()))),
            ExprKind::Binary { left, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                operators::evaluate_binary(&expr.token, left, right)
            }
            ExprKind::Bitwise { left, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                operators::evaluate_bitwise(&expr.token, left, right)
            }
            ExprKind::Comparison { left, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                operators::evaluate_comparison(&expr.token, left, right)
            }
            ExprKind::Logical { left, right } => {
                // Both operands are always evaluated before combining.
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                operators::evaluate_logical(&expr.token, left, right)
            }
            ExprKind::Prefix { operand } => {
                let operand = self.eval(operand)?;
                unary_operators::evaluate_prefix(&expr.token, operand)
            }
            ExprKind::Ternary {
                test,
                if_true,
                if_false,
            } => {
                let test_value = self.eval(test)?;
                let Value::Bool(test_bool) = test_value else {
                    return Err(RuntimeError::at(
                        &expr.token,
                        format!(
                            "Ternary test must be a boolean, got {}",
                            test_value.type_name()
                        ),
                    ));
                };
                // Only the selected branch is evaluated.
                if test_bool {
                    self.eval(if_true)
                } else {
                    self.eval(if_false)
                }
            }
            ExprKind::Assignment { left, right } => {
                let value = self.eval(right)?;
                // The evaluated left-hand side is the bind key; the node's
                // own lexeme is the fallback when it cannot be evaluated.
                // Inner links of a chained assignment evaluate to the
                // assigned value, so the outer links must fall through to
                // their token text.
                let key = match self.eval(left) {
                    Ok(evaluated) => evaluated.to_string(),
                    Err(_) => left.token.lexeme.clone(),
                };
                self.symbols.bind(key, value.clone());
                Ok(value)
            }
        }
    }

    /// Look up a bound name.
    pub fn symbol(&self, name: &str) -> Option<&Value> {
        self.symbols.lookup(name)
    }

    /// The symbol table, for inspection by the driver and tests.
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }
}

/// Convert a literal token's text into its tagged value.
fn literal_value(token: &Token) -> Result<Value, RuntimeError> {
    match token.kind {
        TokenKind::IntLiteral => token
            .lexeme
            .replace('_', "")
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| invalid_literal(token)),
        TokenKind::BinLiteral => parse_radix(token, 2),
        TokenKind::OctLiteral => parse_radix(token, 8),
        TokenKind::HexLiteral => parse_radix(token, 16),
        TokenKind::DoubleLiteral => token
            .lexeme
            .replace('_', "")
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| invalid_literal(token)),
        TokenKind::BoolLiteral => Ok(Value::Bool(token.lexeme == "true")),
        TokenKind::StringLiteral => Ok(Value::Text(token.lexeme.clone())),
        _ => Err(invalid_literal(token)),
    }
}

fn parse_radix(token: &Token, radix: u32) -> Result<Value, RuntimeError> {
    i64::from_str_radix(&token.lexeme, radix)
        .map(Value::Int)
        .map_err(|_| invalid_literal(token))
}

fn invalid_literal(token: &Token) -> RuntimeError {
    RuntimeError::at(
        token,
        format!("Invalid literal '{}'", token.lexeme),
    )
}
