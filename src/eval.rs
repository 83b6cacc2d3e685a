//! Assignment expression evaluation

use crate::ast::{BinaryOp, Expression};
use crate::error::LoadError;
use crate::registry::Scope;
use crate::value::Value;

/// Evaluate `expr` against the variables in `scope`.
///
/// Numbers support `+ - * / %` and unary minus. `+` concatenates when either
/// side is text, formatting numbers the same way placeholders do.
///
/// # Errors
///
/// Returns `Err` if a variable is not in scope, or an operator other than
/// `+` is applied to text. `line` is only used in the error.
pub fn evaluate(expr: &Expression, scope: &Scope, line: usize) -> Result<Value, LoadError> {
    match expr {
        Expression::Number(n) => Ok(Value::Number(*n)),
        Expression::Text(s) => Ok(Value::Text(s.clone())),
        Expression::Variable(name) => {
            scope
                .get(name)
                .cloned()
                .ok_or_else(|| LoadError::UnknownVariable {
                    name: name.clone(),
                    line,
                })
        }
        Expression::Negate(inner) => match evaluate(inner, scope, line)? {
            Value::Number(n) => Ok(Value::Number(-n)),
            Value::Text(_) => Err(LoadError::TextOperand { op: '-', line }),
        },
        Expression::Binary { op, left, right } => {
            let left = evaluate(left, scope, line)?;
            let right = evaluate(right, scope, line)?;
            apply(*op, left, right, line)
        }
    }
}

fn apply(op: BinaryOp, left: Value, right: Value, line: usize) -> Result<Value, LoadError> {
    match (op, left, right) {
        (_, Value::Number(a), Value::Number(b)) => Ok(Value::Number(match op {
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
            BinaryOp::Mul => a * b,
            BinaryOp::Div => a / b,
            BinaryOp::Rem => a % b,
        })),
        (BinaryOp::Add, a, b) => Ok(Value::Text(a.render() + &b.render())),
        (op, _, _) => Err(LoadError::TextOperand {
            op: op.symbol(),
            line,
        }),
    }
}
