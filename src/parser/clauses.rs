//! Clause extraction: expanding bodies with `;` into flat conjunctive clauses.
//!
//! A body is compiled into the list of goal lists it denotes. Conjunction takes the cartesian
//! product of its sides' alternatives, disjunction their union. `foo :- (a ; b), c.` becomes the
//! two clauses `foo :- a, c.` and `foo :- b, c.`

use super::ast::Node;
use super::parser::ParseError;
use crate::syntax::{Clause, Operator, Span, Term};

/// The clauses a parsed top-level expression stands for.
pub fn extract_clause_possibilities(node: Node, at: Span) -> Result<Vec<Clause>, ParseError> {
    match node {
        Node::Clauses(clauses) => Ok(clauses),
        Node::Term(Term::Functor(head)) => Ok(vec![Clause::fact(head)]),
        Node::Term(other) => Err(ParseError::syntax(
            format!(
                "expected a fact or a rule, found {} '{}'",
                other.kind_name(),
                other
            ),
            other.span().unwrap_or(at),
        )),
    }
}

/// Build the clauses of `head :- body`.
pub(crate) fn build_rule(head: Node, body: Node, at: Span) -> Result<Node, ParseError> {
    let head = match head {
        Node::Term(Term::Functor(f)) => f,
        Node::Term(other) => {
            return Err(ParseError::syntax(
                format!(
                    "the head of a clause must be a functor, found {} '{}'",
                    other.kind_name(),
                    other
                ),
                other.span().unwrap_or(at),
            ))
        }
        Node::Clauses(_) => {
            return Err(ParseError::syntax(
                "the head of a clause cannot itself be a clause",
                at,
            ))
        }
    };
    let body = match body {
        Node::Term(t) => t,
        Node::Clauses(_) => {
            return Err(ParseError::syntax(
                "the body of a clause cannot itself be a clause",
                at,
            ))
        }
    };

    let clauses = goal_possibilities(&body, at)?
        .into_iter()
        .map(|goals| Clause::rule(head.clone(), goals))
        .collect();
    Ok(Node::Clauses(clauses))
}

/// The goal lists of a query.
pub(crate) fn extract_query(node: Node, at: Span) -> Result<Vec<Vec<Term>>, ParseError> {
    match node {
        Node::Term(term) => goal_possibilities(&term, at),
        Node::Clauses(_) => Err(ParseError::syntax("a query cannot be a rule", at)),
    }
}

/// Alternative goal lists denoted by a body.
///
/// Functors and cuts are goals. Variables, lists and literals are passed through and rejected
/// when resolution reaches them; arithmetic is never a goal.
pub fn goal_possibilities(term: &Term, at: Span) -> Result<Vec<Vec<Term>>, ParseError> {
    match term {
        Term::BinOp {
            left,
            op: Operator::Comma,
            right,
        } => {
            let lefts = goal_possibilities(left, at)?;
            let rights = goal_possibilities(right, at)?;
            let mut product = Vec::with_capacity(lefts.len() * rights.len());
            for l in &lefts {
                for r in &rights {
                    let mut goals = l.clone();
                    goals.extend(r.iter().cloned());
                    product.push(goals);
                }
            }
            Ok(product)
        }
        Term::BinOp {
            left,
            op: Operator::Semicolon,
            right,
        } => {
            let mut union = goal_possibilities(left, at)?;
            union.extend(goal_possibilities(right, at)?);
            Ok(union)
        }
        Term::BinOp { .. } | Term::UnOp { .. } => Err(ParseError::syntax(
            format!("expression '{}' cannot be used as a goal", term),
            term.span().unwrap_or(at),
        )),
        Term::Functor(_)
        | Term::Cut(_)
        | Term::Variable(_)
        | Term::Number(_)
        | Term::Str(_)
        | Term::Value(_)
        | Term::EmptyList
        | Term::Cons { .. }
        | Term::Underscore => Ok(vec![vec![term.clone()]]),
    }
}
