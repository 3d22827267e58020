//! Resolving terms through a binding store.

use std::collections::HashSet;

use thiserror::Error;

use super::bindings::{Bindings, Lookup};
use crate::syntax::{Functor, Term, Variable};

/// Errors raised while substituting bindings into a term.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A variable's value refers back to the variable itself.
    #[error("Recursive Type Error: variable {variable} is bound to a term that contains itself")]
    RecursiveType { variable: String },
    /// A list cell whose tail is not a list or variable.
    #[error("Invalid list tail: list tails can only be lists or variables, found {kind} '{tail}'")]
    NonListTail { tail: String, kind: &'static str },
}

/// Substitute every bound variable in `term`, recursively.
///
/// Unbound variables are replaced by the preferred name of their class. The occurs check is
/// performed here, lazily: a variable met again while its own value is being resolved fails
/// with [`ResolveError::RecursiveType`].
pub fn resolve(term: &Term, bindings: &Bindings) -> Result<Term, ResolveError> {
    Resolver {
        bindings,
        visiting: HashSet::new(),
    }
    .resolve(term)
}

struct Resolver<'a> {
    bindings: &'a Bindings,
    /// Classes whose value is currently being resolved.
    visiting: HashSet<usize>,
}

impl Resolver<'_> {
    fn resolve(&mut self, term: &Term) -> Result<Term, ResolveError> {
        crate::grow_stack(|| self.resolve_term(term))
    }

    fn resolve_term(&mut self, term: &Term) -> Result<Term, ResolveError> {
        match term {
            Term::Variable(v) => self.resolve_variable(v),
            Term::Functor(f) => Ok(Term::Functor(Functor {
                name: f.name.clone(),
                args: self.resolve_all(&f.args)?,
                origin: f.origin,
                span: f.span,
            })),
            Term::BinOp { left, op, right } => Ok(Term::BinOp {
                left: Box::new(self.resolve(left)?),
                op: *op,
                right: Box::new(self.resolve(right)?),
            }),
            Term::UnOp { op, operand } => Ok(Term::UnOp {
                op: *op,
                operand: Box::new(self.resolve(operand)?),
            }),
            Term::Cons { head, tail } => {
                let head = self.resolve(head)?;
                let tail = self.resolve(tail)?;
                if !tail.is_list_tail() {
                    return Err(ResolveError::NonListTail {
                        tail: tail.to_string(),
                        kind: tail.kind_name(),
                    });
                }
                Ok(Term::cons(head, tail))
            }
            Term::Number(_)
            | Term::Str(_)
            | Term::Value(_)
            | Term::EmptyList
            | Term::Cut(_)
            | Term::Underscore => Ok(term.clone()),
        }
    }

    fn resolve_all(&mut self, terms: &[Term]) -> Result<Vec<Term>, ResolveError> {
        terms.iter().map(|t| self.resolve(t)).collect()
    }

    fn resolve_variable(&mut self, v: &Variable) -> Result<Term, ResolveError> {
        match self.bindings.lookup(v.name()) {
            Lookup::Free => Ok(Term::Variable(v.clone())),
            Lookup::Unbound(preferred) => Ok(Term::Variable(Variable::at(preferred, v.span()))),
            Lookup::Bound(root, value) => {
                if !self.visiting.insert(root) {
                    return Err(ResolveError::RecursiveType {
                        variable: v.name().to_string(),
                    });
                }
                let resolved = self.resolve(value);
                self.visiting.remove(&root);
                resolved
            }
        }
    }
}
