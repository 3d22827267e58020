//! Literal values produced by evaluating expressions.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

/// The result of evaluating an arithmetic, string or boolean expression.
///
/// Parsed number and string literals stay [`Term`](super::Term) nodes; a `LiteralValue` only
/// appears once the evaluator has run, for example as the value bound by `is/2`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LiteralValue {
    Number(f64),
    Str(String),
    Bool(bool),
}

impl LiteralValue {
    /// Short name of the value's kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            LiteralValue::Number(_) => "number",
            LiteralValue::Str(_) => "string",
            LiteralValue::Bool(_) => "boolean",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            LiteralValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Order two values of the same kind. Numbers compare numerically, strings
    /// lexicographically; anything else has no ordering.
    pub fn compare(&self, other: &LiteralValue) -> Option<Ordering> {
        match (self, other) {
            (LiteralValue::Number(a), LiteralValue::Number(b)) => a.partial_cmp(b),
            (LiteralValue::Str(a), LiteralValue::Str(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Number(n) => write!(f, "{}", n),
            LiteralValue::Str(s) => write!(f, "\"{}\"", s),
            LiteralValue::Bool(b) => write!(f, "{}", b),
        }
    }
}
