//! Semantic tests for the parser, unifier and interpreter.
//!
//! These exercise whole-language properties across module boundaries: how source text nests,
//! what a unifier guarantees, and which answers and trees resolution produces.

use indexmap::IndexMap;

use crate::parser::parse_term;
use crate::session::{solve, SolveOutput};
use crate::sld::SolveOptions;
use crate::syntax::Term;

/// Parse a single term, panicking on bad test input.
fn term(source: &str) -> Term {
    parse_term(source).unwrap_or_else(|e| panic!("cannot parse {:?}: {}", source, e))
}

/// Solve with no limits.
fn run(program: &str, query: &str) -> SolveOutput {
    solve(program, query, SolveOptions::default())
}

/// Values of one variable across all solutions.
fn column(output: &SolveOutput, var: &str) -> Vec<String> {
    output
        .solutions
        .iter()
        .filter_map(|s| s.get(var).cloned())
        .collect()
}

fn answer(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

mod cut_semantics;
mod parser_semantics;
mod proptests;
mod resolution_semantics;
mod tree_semantics;
mod unification_semantics;
