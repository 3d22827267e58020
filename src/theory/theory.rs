//! Theory: the ordered clause database of a program.

use std::fmt;

use indexmap::IndexMap;

use crate::parser::{parse_clauses, ParseError};
use crate::syntax::Clause;

/// An ordered list of clauses.
///
/// Clause order is the order in which resolution tries alternatives. Each clause gets a
/// display label `name_k`, where `k` counts the clauses with that name from 1.
#[derive(Debug, Clone, Default)]
pub struct Theory {
    clauses: Vec<Clause>,
    labels: Vec<String>,
    /// Clauses seen so far per predicate name.
    ordinals: IndexMap<String, usize>,
}

impl Theory {
    /// Create an empty theory.
    pub fn new() -> Self {
        Theory::default()
    }

    /// Parse a program into a theory.
    pub fn from_source(source: &str) -> Result<Self, ParseError> {
        let mut theory = Theory::new();
        theory.extend(parse_clauses(source)?);
        Ok(theory)
    }

    /// Add a clause after all existing ones.
    pub fn add_clause(&mut self, clause: Clause) {
        let ordinal = self.ordinals.entry(clause.name().to_string()).or_insert(0);
        *ordinal += 1;
        self.labels.push(format!("{}_{}", clause.name(), ordinal));
        self.clauses.push(clause);
    }

    pub fn extend(&mut self, clauses: impl IntoIterator<Item = Clause>) {
        for clause in clauses {
            self.add_clause(clause);
        }
    }

    /// Get the clauses in this theory.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Label of the clause at `index`.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Clauses whose head has the given name and arity, with their index.
    pub fn clauses_for<'a>(
        &'a self,
        name: &'a str,
        arity: usize,
    ) -> impl Iterator<Item = (usize, &'a Clause)> + 'a {
        self.clauses
            .iter()
            .enumerate()
            .filter(move |(_, c)| c.name() == name && c.arity() == arity)
    }

    /// Remove every clause.
    pub fn clear(&mut self) {
        self.clauses.clear();
        self.labels.clear();
        self.ordinals.clear();
    }
}

impl fmt::Display for Theory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for clause in &self.clauses {
            writeln!(f, "{}", clause)?;
        }
        Ok(())
    }
}
