//! SLD resolution: goal evaluation, builtins and derivation trees.

mod builtins;
mod comparer;
mod evaluator;
mod resolution;
mod tree;

pub use builtins::Builtin;
pub use comparer::structurally_equal;
pub use evaluator::{evaluate, EvalError};
pub use resolution::{Answers, Interpreter, SolveOptions};
pub use tree::{objective_text, DerivationNode, NodeKind};

use thiserror::Error;

use crate::syntax::Span;
use crate::unify::ResolveError;

/// Errors that abort a query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("Semantic Error: {message}{}", located(.at))]
    Semantic { message: String, at: Option<Span> },
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl SolveError {
    pub fn semantic(message: impl Into<String>, at: Option<Span>) -> Self {
        SolveError::Semantic {
            message: message.into(),
            at,
        }
    }
}

/// ` at line L column C`, or nothing when the position is unknown.
fn located(at: &Option<Span>) -> String {
    match at {
        Some(span) if *span != Span::default() => {
            format!(" at line {} column {}", span.line, span.column)
        }
        _ => String::new(),
    }
}
