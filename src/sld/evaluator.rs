//! Evaluation of arithmetic, string and boolean expressions.

use thiserror::Error;

use super::located;
use crate::syntax::{LiteralValue, Operator, Span, Term};

/// Evaluation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("Evaluation Error: undefined variable {name}{}", located(.at))]
    UndefinedVariable { name: String, at: Option<Span> },
    #[error("Evaluation Error: cannot evaluate {kind} '{term}'{}", located(.at))]
    CannotEvaluate {
        kind: &'static str,
        term: String,
        at: Option<Span>,
    },
    #[error("Evaluation Error: invalid operation '{expression}'")]
    InvalidOperation { expression: String },
    #[error("Evaluation Error: cannot compare {left} with {right}")]
    CannotCompare { left: String, right: String },
}

/// Evaluate an expression whose variables have already been substituted.
pub fn evaluate(term: &Term) -> Result<LiteralValue, EvalError> {
    match term {
        Term::Number(n) => Ok(LiteralValue::Number(*n)),
        Term::Str(s) => Ok(LiteralValue::Str(s.clone())),
        Term::Value(v) => Ok(v.clone()),
        Term::BinOp { left, op, right } => binary(*op, evaluate(left)?, evaluate(right)?),
        Term::UnOp { op, operand } => match (op, evaluate(operand)?) {
            (Operator::Plus, LiteralValue::Number(n)) => Ok(LiteralValue::Number(n)),
            (Operator::Minus, LiteralValue::Number(n)) => Ok(LiteralValue::Number(-n)),
            (op, value) => Err(EvalError::InvalidOperation {
                expression: format!("{}{}", op.symbol(), value),
            }),
        },
        Term::Variable(v) => Err(EvalError::UndefinedVariable {
            name: v.name().to_string(),
            at: Some(v.span()),
        }),
        Term::Functor(_)
        | Term::EmptyList
        | Term::Cons { .. }
        | Term::Cut(_)
        | Term::Underscore => Err(EvalError::CannotEvaluate {
            kind: term.kind_name(),
            term: term.to_string(),
            at: term.span(),
        }),
    }
}

fn binary(
    op: Operator,
    left: LiteralValue,
    right: LiteralValue,
) -> Result<LiteralValue, EvalError> {
    use LiteralValue::{Bool, Number, Str};

    let value = match (op, &left, &right) {
        (Operator::Plus, Number(a), Number(b)) => Number(a + b),
        (Operator::Plus, Str(a), Str(b)) => Str(format!("{}{}", a, b)),
        (Operator::Minus, Number(a), Number(b)) => Number(a - b),
        (Operator::Times, Number(a), Number(b)) => Number(a * b),
        (Operator::Divide, Number(a), Number(b)) => Number(a / b),
        (Operator::Power, Number(a), Number(b)) => Number(a.powf(*b)),
        (Operator::And, Bool(a), Bool(b)) => Bool(*a && *b),
        (Operator::Or, Bool(a), Bool(b)) => Bool(*a || *b),
        _ => {
            return Err(EvalError::InvalidOperation {
                expression: format!("{} {} {}", left, op.symbol(), right),
            })
        }
    };
    Ok(value)
}
