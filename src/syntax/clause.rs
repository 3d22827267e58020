//! Program clauses: a head and a flat, disjunction-free body.

use std::fmt;

use super::{Functor, Term};

/// A Horn clause `head :- body`. Facts have an empty body.
///
/// Bodies never contain `;`: disjunctions are expanded into sibling clauses when the
/// program is parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    pub head: Functor,
    pub body: Vec<Term>,
}

impl Clause {
    pub fn fact(head: Functor) -> Self {
        Clause {
            head,
            body: Vec::new(),
        }
    }

    pub fn rule(head: Functor, body: Vec<Term>) -> Self {
        Clause { head, body }
    }

    pub fn is_fact(&self) -> bool {
        self.body.is_empty()
    }

    pub fn name(&self) -> &str {
        &self.head.name
    }

    pub fn arity(&self) -> usize {
        self.head.arity()
    }

    /// Fresh copy of the clause for one use during resolution.
    ///
    /// Every variable is renamed with the invocation id as alias, and every cut in the body is
    /// stamped with the invocation id so it knows which choice point it commits.
    pub fn instantiate(&self, invocation: u64) -> Clause {
        Clause {
            head: self.head.instantiate(invocation),
            body: self.body.iter().map(|t| t.instantiate(invocation)).collect(),
        }
    }

    pub fn variables(&self) -> Vec<String> {
        let mut out = Vec::new();
        for arg in &self.head.args {
            arg.collect_variables(&mut out);
        }
        for goal in &self.body {
            goal.collect_variables(&mut out);
        }
        out
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.head)?;
        if !self.body.is_empty() {
            write!(f, " :- ")?;
            for (i, goal) in self.body.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", goal)?;
            }
        }
        write!(f, ".")
    }
}
