//! Assignment expression building

use super::{line_of, Pair, ParseError, Rule};
use crate::ast::{BinaryOp, Expression};

/// Build an [`Expression`] from an `expression`, `term` or `factor` pair.
pub(super) fn build(pair: Pair<'_>, source: &str) -> Result<Expression, ParseError> {
    match pair.as_rule() {
        Rule::expression | Rule::term => {
            let mut inner = pair.into_inner();
            let Some(first) = inner.next() else {
                return Ok(Expression::Text(String::new()));
            };
            let mut left = build(first, source)?;
            while let (Some(op), Some(operand)) = (inner.next(), inner.next()) {
                left = Expression::Binary {
                    op: binary_op(op.as_str()),
                    left: Box::new(left),
                    right: Box::new(build(operand, source)?),
                };
            }
            Ok(left)
        }
        Rule::factor => {
            let mut negate = false;
            let mut value = None;
            for part in pair.into_inner() {
                if part.as_rule() == Rule::neg {
                    negate = true;
                } else {
                    value = Some(build(part, source)?);
                }
            }
            let value = value.unwrap_or(Expression::Text(String::new()));
            Ok(if negate {
                Expression::Negate(Box::new(value))
            } else {
                value
            })
        }
        Rule::number => pair
            .as_str()
            .parse::<f64>()
            .map(Expression::Number)
            .map_err(|_| {
                ParseError::at_line(format!("Invalid number '{}'", pair.as_str()), line_of(&pair), source)
            }),
        Rule::string => Ok(Expression::Text(unescape(
            pair.into_inner().next().map_or("", |p| p.as_str()),
        ))),
        Rule::identifier => Ok(Expression::Variable(pair.as_str().to_string())),
        _ => Err(ParseError::at_line(
            format!("Unexpected '{}' in expression", pair.as_str()),
            line_of(&pair),
            source,
        )),
    }
}

fn binary_op(symbol: &str) -> BinaryOp {
    match symbol {
        "-" => BinaryOp::Sub,
        "*" => BinaryOp::Mul,
        "/" => BinaryOp::Div,
        "%" => BinaryOp::Rem,
        _ => BinaryOp::Add,
    }
}

/// Resolve `\\` and `\"`; the grammar admits no other escapes.
pub(super) fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}
