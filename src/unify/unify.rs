//! Structural unification of terms.

use super::bindings::Bindings;
use super::resolve::ResolveError;
use crate::syntax::Term;

impl Bindings {
    /// Unify two terms, recording the bindings this requires in `self`.
    ///
    /// `Ok(false)` is an ordinary mismatch. Errors are reserved for malformed lists met while
    /// resolving bound values.
    pub fn unify_terms(&mut self, a: &Term, b: &Term) -> Result<bool, ResolveError> {
        crate::grow_stack(|| self.unify_step(a, b))
    }

    fn unify_step(&mut self, a: &Term, b: &Term) -> Result<bool, ResolveError> {
        match (a, b) {
            (Term::Underscore, _) | (_, Term::Underscore) => Ok(true),
            (Term::Variable(x), _) => self.try_assign(x, b),
            (_, Term::Variable(y)) => self.try_assign(y, a),
            (Term::Cut(_), _) | (_, Term::Cut(_)) => Ok(false),
            (Term::Functor(f), Term::Functor(g)) => {
                if f.name != g.name || f.arity() != g.arity() {
                    return Ok(false);
                }
                self.unify_pairs(f.args.iter().zip(&g.args))
            }
            (
                Term::BinOp {
                    left: l1,
                    op: o1,
                    right: r1,
                },
                Term::BinOp {
                    left: l2,
                    op: o2,
                    right: r2,
                },
            ) => {
                if o1 != o2 {
                    return Ok(false);
                }
                self.unify_pairs([(&**l1, &**l2), (&**r1, &**r2)])
            }
            (
                Term::UnOp {
                    op: o1,
                    operand: x1,
                },
                Term::UnOp {
                    op: o2,
                    operand: x2,
                },
            ) => Ok(o1 == o2 && self.unify_terms(x1, x2)?),
            (Term::EmptyList, Term::EmptyList) => Ok(true),
            (Term::Cons { head: h1, tail: t1 }, Term::Cons { head: h2, tail: t2 }) => {
                self.unify_pairs([(&**h1, &**h2), (&**t1, &**t2)])
            }
            _ => match (a.as_literal(), b.as_literal()) {
                (Some(x), Some(y)) => Ok(x == y),
                _ => Ok(false),
            },
        }
    }

    fn unify_pairs<'t>(
        &mut self,
        pairs: impl IntoIterator<Item = (&'t Term, &'t Term)>,
    ) -> Result<bool, ResolveError> {
        for (x, y) in pairs {
            if !self.unify_terms(x, y)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Most general unifier of two terms, built in a fresh store.
///
/// `Ok(None)` when the terms do not unify, including when a binding would have to read a
/// self-referential value.
pub fn unify(a: &Term, b: &Term) -> Result<Option<Bindings>, ResolveError> {
    let mut bindings = Bindings::new();
    match bindings.unify_terms(a, b) {
        Ok(true) => Ok(Some(bindings)),
        Ok(false) | Err(ResolveError::RecursiveType { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}
