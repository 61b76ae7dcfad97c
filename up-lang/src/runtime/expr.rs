use crate::error::UpError;
use crate::ir::ast::Token;
use crate::literal;

use super::environment::Environment;
use super::value::{Value, VarKind};

const NOT: &str = "not";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
}

impl Comparison {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "eq" | "==" => Some(Self::Equal),
            "ne" | "!=" => Some(Self::NotEqual),
            "lt" | "<" => Some(Self::Less),
            "gt" | ">" => Some(Self::Greater),
            "le" | "<=" => Some(Self::LessEqual),
            "ge" | ">=" => Some(Self::GreaterEqual),
            _ => None,
        }
    }

    fn is_equality(&self) -> bool {
        matches!(self, Self::Equal | Self::NotEqual)
    }

    fn apply<T: PartialOrd>(&self, left: T, right: T) -> bool {
        match self {
            Self::Equal => left == right,
            Self::NotEqual => left != right,
            Self::Less => left < right,
            Self::Greater => left > right,
            Self::LessEqual => left <= right,
            Self::GreaterEqual => left >= right,
        }
    }
}

/// Evaluates `not <bool>` or `<lhs> <op> <rhs>` over declared variables.
pub fn eval_bool(env: &Environment, tokens: &[Token], line: usize) -> Result<bool, UpError> {
    match tokens {
        [not, operand] if not == NOT => match operand_value(env, operand, line)? {
            Value::Bool(b) => Ok(!b),
            other => Err(UpError::type_error(
                line,
                format!("'not' needs a bool, '{}' is a {}", operand, other.kind()),
            )),
        },
        [lhs, op, rhs] => {
            let comparison = Comparison::from_token(op).ok_or_else(|| {
                UpError::syntax(line, format!("unknown comparison operator '{}'", op))
            })?;
            let left = operand_value(env, lhs, line)?;
            let right = operand_value(env, rhs, line)?;
            compare(comparison, left, right, line)
        }
        _ => Err(UpError::syntax(
            line,
            format!("malformed boolean expression '{}'", tokens.join(" ")),
        )),
    }
}

fn operand_value(env: &Environment, name: &str, line: usize) -> Result<Value, UpError> {
    if !env.is_declared(name) {
        return Err(UpError::syntax(line, format!("'{}' is not a declared operand", name)));
    }
    env.load(name, line)
}

fn compare(comparison: Comparison, left: Value, right: Value, line: usize) -> Result<bool, UpError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(comparison.apply(a, b)),
        (Value::Symbol(a), Value::Symbol(b)) if comparison.is_equality() => {
            Ok(comparison.apply(a, b))
        }
        (Value::Bool(a), Value::Bool(b)) if comparison.is_equality() => Ok(comparison.apply(a, b)),
        (Value::Symbol(_), Value::Symbol(_)) | (Value::Bool(_), Value::Bool(_)) => Err(
            UpError::type_error(line, "symbols and bools only compare with eq and ne"),
        ),
        (Value::Line(_), Value::Line(_)) => {
            Err(UpError::type_error(line, "line values cannot be compared"))
        }
        (left, right) => Err(UpError::type_error(
            line,
            format!("cannot compare {} with {}", left.kind(), right.kind()),
        )),
    }
}

/// Value of an assignment right-hand side for a target holding `kind`.
/// A single token naming a declared variable always means that variable.
pub fn eval_assigned(
    env: &Environment,
    kind: VarKind,
    tokens: &[Token],
    line: usize,
) -> Result<Value, UpError> {
    if let [name] = tokens {
        if env.is_declared(name) {
            let value = env.load(name, line)?;
            if value.kind() != kind {
                return Err(UpError::compile(
                    line,
                    format!("cannot assign {} '{}' to a {}", value.kind(), name, kind),
                ));
            }
            return Ok(value);
        }
    }

    let mismatch = || {
        UpError::compile(
            line,
            format!("'{}' is not a {} value", tokens.join(" "), kind),
        )
    };
    match (kind, tokens) {
        (VarKind::Number, [token]) => literal::numeric_literal(token)
            .map(Value::Number)
            .ok_or_else(mismatch),
        (VarKind::Symbol, [token]) => {
            let mut chars = token.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Value::Symbol(c)),
                _ => Err(mismatch()),
            }
        }
        (VarKind::Bool, [token]) => parse_bool(token).map(Value::Bool).ok_or_else(mismatch),
        (VarKind::Bool, [_, _] | [_, _, _]) => eval_bool(env, tokens, line).map(Value::Bool),
        (VarKind::Line, _) => Ok(Value::Line(tokens.join(" "))),
        _ => Err(mismatch()),
    }
}

pub fn parse_bool(token: &str) -> Option<bool> {
    match token {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
