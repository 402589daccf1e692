//! Prefix operator implementations.

use hlang_ir::{Token, TokenKind};

use crate::errors::RuntimeError;
use crate::operators::EvalResult;
use crate::value::Value;

/// Prefix `+ - ! ~`. A wrong operand tag is a runtime type error.
pub(crate) fn evaluate_prefix(token: &Token, operand: Value) -> EvalResult {
    match token.kind {
        TokenKind::Minus => match operand {
            Value::Int(v) => v
                .checked_neg()
                .map(Value::Int)
                .ok_or_else(|| RuntimeError::at(token, "Integer overflow in negation")),
            Value::Float(v) => Ok(Value::Float(-v)),
            other => Err(RuntimeError::at(
                token,
                format!("Operator '-' requires a numeric operand, got {}", other.type_name()),
            )),
        },
        // Identity on numerics.
        TokenKind::Plus => match operand {
            Value::Int(_) | Value::Float(_) => Ok(operand),
            other => Err(RuntimeError::at(
                token,
                format!("Operator '+' requires a numeric operand, got {}", other.type_name()),
            )),
        },
        TokenKind::Not => match operand {
            Value::Bool(v) => Ok(Value::Bool(!v)),
            other => Err(RuntimeError::at(
                token,
                format!("Operator '!' requires a boolean operand, got {}", other.type_name()),
            )),
        },
        TokenKind::BitwiseNot => match operand {
            Value::Int(v) => Ok(Value::Int(!v)),
            other => Err(RuntimeError::at(
                token,
                format!("Operator '~' requires an integer operand, got {}", other.type_name()),
            )),
        },
        _ => Err(RuntimeError::at(
            token,
            format!("'{}' is not a prefix operator", token.lexeme),
        )),
    }
}
