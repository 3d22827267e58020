//! Parser output types.

use crate::syntax::{Clause, Term};

/// Result of parsing one expression.
///
/// `:-` is expanded into clauses as soon as it is parsed, so an expression is either a plain
/// term or the clauses a rule denotes.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Term(Term),
    Clauses(Vec<Clause>),
}

/// A statement in a source file.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// The clauses one fact or rule expands to
    Clauses(Vec<Clause>),
    /// A `?- goal.` statement: alternative goal lists
    Query(Vec<Vec<Term>>),
}

/// An interactive directive, written `:name args`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Consult a program file
    Load(String),
    /// Change a session setting
    Set(Setting),
    /// Print the current program
    Listing,
    /// Drop every clause
    Clear,
    Help,
    Quit,
}

/// A session setting changed by `:set`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Setting {
    MaxDepth(Option<usize>),
    MaxSolutions(Option<usize>),
    /// Print derivation trees after each query
    ShowTrees(bool),
}
