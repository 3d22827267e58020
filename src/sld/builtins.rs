//! Builtin predicates.

use std::cmp::Ordering;

use super::comparer::structurally_equal;
use super::evaluator::{evaluate, EvalError};
use super::SolveError;
use crate::syntax::{Functor, LiteralValue, Term};
use crate::unify::{unify, Bindings};

/// Goals handled by the interpreter instead of by program clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Is,
    Less,
    Greater,
    LessOrEqual,
    GreaterOrEqual,
    ValueEqual,
    StructEqual,
    Unify,
    Fail,
}

impl Builtin {
    /// The builtin a goal calls, if any.
    pub fn lookup(goal: &Functor) -> Option<Builtin> {
        let builtin = match (goal.name.as_str(), goal.arity()) {
            ("is", 2) => Builtin::Is,
            ("<", 2) => Builtin::Less,
            (">", 2) => Builtin::Greater,
            ("=<", 2) => Builtin::LessOrEqual,
            (">=", 2) => Builtin::GreaterOrEqual,
            ("=:=", 2) => Builtin::ValueEqual,
            ("==", 2) => Builtin::StructEqual,
            ("=", 2) => Builtin::Unify,
            ("fail", 0) => Builtin::Fail,
            _ => return None,
        };
        Some(builtin)
    }

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Is => "is",
            Builtin::Less => "<",
            Builtin::Greater => ">",
            Builtin::LessOrEqual => "=<",
            Builtin::GreaterOrEqual => ">=",
            Builtin::ValueEqual => "=:=",
            Builtin::StructEqual => "==",
            Builtin::Unify => "=",
            Builtin::Fail => "fail",
        }
    }

    /// Run the builtin on already-substituted arguments.
    ///
    /// `Ok(None)` is failure; on success the bindings the builtin made are returned.
    pub fn call(self, args: &[Term]) -> Result<Option<Bindings>, SolveError> {
        let (left, right) = match (self, args) {
            (Builtin::Fail, _) => return Ok(None),
            (_, [left, right]) => (left, right),
            _ => {
                return Err(SolveError::semantic(
                    format!("{} expects two arguments", self.name()),
                    None,
                ))
            }
        };

        match self {
            Builtin::Is => {
                let value = evaluate(right)?;
                Ok(unify(left, &Term::Value(value))?)
            }
            Builtin::Unify => Ok(unify(left, right)?),
            Builtin::StructEqual => Ok(succeed_if(structurally_equal(left, right))),
            Builtin::ValueEqual => Ok(succeed_if(evaluate(left)? == evaluate(right)?)),
            Builtin::Less | Builtin::Greater | Builtin::LessOrEqual | Builtin::GreaterOrEqual => {
                let ordering = order(&evaluate(left)?, &evaluate(right)?)?;
                let holds = match self {
                    Builtin::Less => ordering == Ordering::Less,
                    Builtin::Greater => ordering == Ordering::Greater,
                    Builtin::LessOrEqual => ordering != Ordering::Greater,
                    _ => ordering != Ordering::Less,
                };
                Ok(succeed_if(holds))
            }
            Builtin::Fail => Ok(None),
        }
    }
}

fn succeed_if(holds: bool) -> Option<Bindings> {
    holds.then(Bindings::new)
}

fn order(left: &LiteralValue, right: &LiteralValue) -> Result<Ordering, EvalError> {
    left.compare(right).ok_or_else(|| EvalError::CannotCompare {
        left: left.to_string(),
        right: right.to_string(),
    })
}
