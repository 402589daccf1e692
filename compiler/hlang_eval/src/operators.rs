//! Binary operator implementations.
//!
//! The value tag set is fixed, so every operator is an exhaustive match
//! over the operand tags, not a trait object. Mixed integer/float operands
//! are promoted to float before the operator applies; the float result then
//! keeps the float tag.
//!
//! Arithmetic faults the host would surface as exceptions or silent
//! coercions (zero divisors, integer overflow, bitwise on floats) are
//! explicit [`RuntimeError`]s here.

use hlang_ir::{Token, TokenKind};

use crate::errors::RuntimeError;
use crate::value::Value;

pub(crate) type EvalResult = Result<Value, RuntimeError>;

/// Operand pair after numeric promotion.
enum Promoted {
    Ints(i64, i64),
    Floats(f64, f64),
}

#[expect(
    clippy::cast_precision_loss,
    reason = "int-to-float promotion is the language's defined coercion"
)]
fn promote(token: &Token, left: &Value, right: &Value) -> Result<Promoted, RuntimeError> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Ok(Promoted::Ints(*a, *b)),
        (Value::Int(a), Value::Float(b)) => Ok(Promoted::Floats(*a as f64, *b)),
        (Value::Float(a), Value::Int(b)) => Ok(Promoted::Floats(*a, *b as f64)),
        (Value::Float(a), Value::Float(b)) => Ok(Promoted::Floats(*a, *b)),
        _ => Err(RuntimeError::at(
            token,
            format!(
                "Operator '{}' requires numeric operands, got {} and {}",
                token.lexeme,
                left.type_name(),
                right.type_name()
            ),
        )),
    }
}

fn overflow(token: &Token) -> RuntimeError {
    RuntimeError::at(
        token,
        format!("Integer overflow in operator '{}'", token.lexeme),
    )
}

fn division_by_zero(token: &Token) -> RuntimeError {
    RuntimeError::at(token, "Division by zero")
}

/// Arithmetic operators: `+ - * / div % mod **`.
pub(crate) fn evaluate_binary(token: &Token, left: Value, right: Value) -> EvalResult {
    match token.kind {
        TokenKind::Plus => {
            // Text + Text concatenates.
            if let (Value::Text(a), Value::Text(b)) = (&left, &right) {
                return Ok(Value::Text(format!("{a}{b}")));
            }
            match promote(token, &left, &right)? {
                Promoted::Ints(a, b) => a
                    .checked_add(b)
                    .map(Value::Int)
                    .ok_or_else(|| overflow(token)),
                Promoted::Floats(a, b) => Ok(Value::Float(a + b)),
            }
        }
        TokenKind::Minus => match promote(token, &left, &right)? {
            Promoted::Ints(a, b) => a
                .checked_sub(b)
                .map(Value::Int)
                .ok_or_else(|| overflow(token)),
            Promoted::Floats(a, b) => Ok(Value::Float(a - b)),
        },
        TokenKind::Star => match promote(token, &left, &right)? {
            Promoted::Ints(a, b) => a
                .checked_mul(b)
                .map(Value::Int)
                .ok_or_else(|| overflow(token)),
            Promoted::Floats(a, b) => Ok(Value::Float(a * b)),
        },
        // Slash always yields a float, even for integer operands.
        TokenKind::Slash => match promote(token, &left, &right)? {
            #[expect(clippy::cast_precision_loss, reason = "slash is defined as float division")]
            Promoted::Ints(a, b) => {
                if b == 0 {
                    return Err(division_by_zero(token));
                }
                Ok(Value::Float(a as f64 / b as f64))
            }
            Promoted::Floats(a, b) => {
                if b == 0.0 {
                    return Err(division_by_zero(token));
                }
                Ok(Value::Float(a / b))
            }
        },
        TokenKind::Div => match promote(token, &left, &right)? {
            Promoted::Ints(a, b) => {
                if b == 0 {
                    return Err(division_by_zero(token));
                }
                floor_div(token, a, b).map(Value::Int)
            }
            Promoted::Floats(a, b) => {
                if b == 0.0 {
                    return Err(division_by_zero(token));
                }
                truncate_to_int(token, a / b).map(Value::Int)
            }
        },
        // Truncating remainder: sign follows the dividend.
        TokenKind::Percent => match promote(token, &left, &right)? {
            Promoted::Ints(a, b) => {
                if b == 0 {
                    return Err(division_by_zero(token));
                }
                a.checked_rem(b)
                    .map(Value::Int)
                    .ok_or_else(|| overflow(token))
            }
            Promoted::Floats(a, b) => {
                if b == 0.0 {
                    return Err(division_by_zero(token));
                }
                Ok(Value::Float(a % b))
            }
        },
        // True mathematical modulo: sign follows the divisor,
        // computed as ((a % b) + b) % b.
        TokenKind::Mod => match promote(token, &left, &right)? {
            Promoted::Ints(a, b) => {
                if b == 0 {
                    return Err(division_by_zero(token));
                }
                let r = a.checked_rem(b).ok_or_else(|| overflow(token))?;
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "((r + b) % b) lies strictly within (-|b|, |b|), so it fits i64"
                )]
                let m = ((i128::from(r) + i128::from(b)) % i128::from(b)) as i64;
                Ok(Value::Int(m))
            }
            Promoted::Floats(a, b) => {
                if b == 0.0 {
                    return Err(division_by_zero(token));
                }
                Ok(Value::Float(((a % b) + b) % b))
            }
        },
        // Exponent always computes through the float power function, so
        // integer operands still produce a float result.
        #[expect(clippy::cast_precision_loss, reason = "exponent is defined as float pow")]
        TokenKind::DoubleStar => match promote(token, &left, &right)? {
            Promoted::Ints(a, b) => Ok(Value::Float((a as f64).powf(b as f64))),
            Promoted::Floats(a, b) => Ok(Value::Float(a.powf(b))),
        },
        _ => Err(RuntimeError::at(
            token,
            format!("'{}' is not an arithmetic operator", token.lexeme),
        )),
    }
}

/// Quotient rounded toward negative infinity, pairing with `mod`'s
/// sign-of-divisor remainder.
fn floor_div(token: &Token, a: i64, b: i64) -> Result<i64, RuntimeError> {
    let q = a.checked_div(b).ok_or_else(|| overflow(token))?;
    let r = a % b;
    if r != 0 && (r < 0) != (b < 0) {
        Ok(q - 1)
    } else {
        Ok(q)
    }
}

/// Truncate a float quotient into the integer range.
#[expect(
    clippy::cast_precision_loss,
    reason = "range guard only; exact bounds are not required"
)]
#[expect(
    clippy::cast_possible_truncation,
    reason = "guarded to the i64 range before casting"
)]
fn truncate_to_int(token: &Token, quotient: f64) -> Result<i64, RuntimeError> {
    let truncated = quotient.trunc();
    if !truncated.is_finite() || truncated < i64::MIN as f64 || truncated > i64::MAX as f64 {
        return Err(overflow(token));
    }
    Ok(truncated as i64)
}

/// Bitwise operators: `& | ^ << >>`. Integer operands only.
pub(crate) fn evaluate_bitwise(token: &Token, left: Value, right: Value) -> EvalResult {
    let (Value::Int(a), Value::Int(b)) = (&left, &right) else {
        return Err(RuntimeError::at(
            token,
            format!(
                "Bitwise operator '{}' requires integer operands, got {} and {}",
                token.lexeme,
                left.type_name(),
                right.type_name()
            ),
        ));
    };
    let (a, b) = (*a, *b);
    // Shift counts use the low six bits of the right operand.
    let shift = u32::try_from(b & 63).unwrap_or(0);
    match token.kind {
        TokenKind::BitwiseAnd => Ok(Value::Int(a & b)),
        TokenKind::BitwiseOr => Ok(Value::Int(a | b)),
        TokenKind::BitwiseXor => Ok(Value::Int(a ^ b)),
        TokenKind::LeftShift => Ok(Value::Int(a.wrapping_shl(shift))),
        TokenKind::RightShift => Ok(Value::Int(a.wrapping_shr(shift))),
        _ => Err(RuntimeError::at(
            token,
            format!("'{}' is not a bitwise operator", token.lexeme),
        )),
    }
}

/// Comparison operators: `== != < <= > >=` with numeric promotion;
/// equality alone is defined on matching bool/text tags.
pub(crate) fn evaluate_comparison(token: &Token, left: Value, right: Value) -> EvalResult {
    match (&left, &right) {
        (Value::Bool(a), Value::Bool(b)) => equality_only(token, a == b),
        (Value::Text(a), Value::Text(b)) => equality_only(token, a == b),
        _ => match promote(token, &left, &right)? {
            Promoted::Ints(a, b) => compare_ints(token, a, b),
            Promoted::Floats(a, b) => compare_floats(token, a, b),
        },
    }
}

fn equality_only(token: &Token, equal: bool) -> EvalResult {
    match token.kind {
        TokenKind::Equal => Ok(Value::Bool(equal)),
        TokenKind::NotEqual => Ok(Value::Bool(!equal)),
        _ => Err(RuntimeError::at(
            token,
            format!("Operator '{}' requires numeric operands", token.lexeme),
        )),
    }
}

fn compare_ints(token: &Token, a: i64, b: i64) -> EvalResult {
    let result = match token.kind {
        TokenKind::Equal => a == b,
        TokenKind::NotEqual => a != b,
        TokenKind::Less => a < b,
        TokenKind::LessOrEqual => a <= b,
        TokenKind::Greater => a > b,
        TokenKind::GreaterOrEqual => a >= b,
        _ => {
            return Err(RuntimeError::at(
                token,
                format!("'{}' is not a comparison operator", token.lexeme),
            ))
        }
    };
    Ok(Value::Bool(result))
}

/// IEEE 754 comparison through `partial_cmp`: NaN compares unequal and
/// unordered against everything.
fn compare_floats(token: &Token, a: f64, b: f64) -> EvalResult {
    use std::cmp::Ordering;
    let ord = a.partial_cmp(&b);
    let result = match token.kind {
        TokenKind::Equal => ord == Some(Ordering::Equal),
        TokenKind::NotEqual => ord != Some(Ordering::Equal),
        TokenKind::Less => ord == Some(Ordering::Less),
        TokenKind::LessOrEqual => {
            matches!(ord, Some(Ordering::Less | Ordering::Equal))
        }
        TokenKind::Greater => ord == Some(Ordering::Greater),
        TokenKind::GreaterOrEqual => {
            matches!(ord, Some(Ordering::Greater | Ordering::Equal))
        }
        _ => {
            return Err(RuntimeError::at(
                token,
                format!("'{}' is not a comparison operator", token.lexeme),
            ))
        }
    };
    Ok(Value::Bool(result))
}

/// Logical `and`/`or`. Both operands were already evaluated by the caller;
/// there is no short-circuit skip of side effects.
pub(crate) fn evaluate_logical(token: &Token, left: Value, right: Value) -> EvalResult {
    let (Value::Bool(a), Value::Bool(b)) = (&left, &right) else {
        return Err(RuntimeError::at(
            token,
            format!(
                "Operator '{}' requires boolean operands, got {} and {}",
                token.lexeme,
                left.type_name(),
                right.type_name()
            ),
        ));
    };
    match token.kind {
        TokenKind::And => Ok(Value::Bool(*a && *b)),
        TokenKind::Or => Ok(Value::Bool(*a || *b)),
        _ => Err(RuntimeError::at(
            token,
            format!("'{}' is not a logical operator", token.lexeme),
        )),
    }
}
