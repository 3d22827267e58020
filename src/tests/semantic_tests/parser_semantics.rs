use super::*;
use crate::parser::{parse_clauses, parse_query, ParseError};
use crate::syntax::Operator;

// =============================================================================
// PARSER SEMANTIC PROPERTIES
// =============================================================================
//
// How source text nests into terms and expands into clauses.

#[test]
fn rule_body_is_flat_goal_list() {
    let clauses = parse_clauses("grand(X, Z) :- parent(X, Y), parent(Y, Z).").expect("parse");
    assert_eq!(clauses.len(), 1);
    let clause = &clauses[0];
    assert_eq!(clause.name(), "grand");
    assert_eq!(clause.arity(), 2);
    assert_eq!(clause.body, vec![term("parent(X, Y)"), term("parent(Y, Z)")]);
}

#[test]
fn three_goal_body_keeps_goal_order() {
    let clauses = parse_clauses("a(c) :- b(c), d(c), h(c).").expect("parse");
    assert_eq!(clauses.len(), 1);
    assert_eq!(clauses[0].body, vec![term("b(c)"), term("d(c)"), term("h(c)")]);
}

#[test]
fn chained_rule_operator_is_a_syntax_error() {
    let err = parse_clauses("foo(X) :- bar(X) :- baz(X).").unwrap_err();
    assert!(matches!(err, ParseError::Syntax { .. }), "got {:?}", err);
    assert_eq!((err.line(), err.column()), (1, 18));
    assert!(err.to_string().contains("':-'"), "got {}", err);
}

#[test]
fn fact_has_empty_body() {
    let clauses = parse_clauses("likes(mary, \"wine\").").expect("parse");
    assert!(clauses[0].is_fact());
    assert_eq!(clauses[0].head.args[1], Term::string("wine"));
}

#[test]
fn nested_disjunction_expands_to_five_clauses() {
    let source = "foo(X) :- ((a(X);e(X)) ; ((b(X),f(X)) ; (c(X);d(X)))).";
    let clauses = parse_clauses(source).expect("parse");
    assert_eq!(clauses.len(), 5);
    let bodies: Vec<String> = clauses
        .iter()
        .map(|c| {
            c.body
                .iter()
                .map(Term::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        })
        .collect();
    assert_eq!(bodies, vec!["a(X)", "e(X)", "b(X), f(X)", "c(X)", "d(X)"]);
}

#[test]
fn disjunctions_in_conjunction_expand_to_cartesian_product() {
    let source = "foo(X) :- ((a(X);e(X)) ; ((b(X),f(X)) ; (c(X);d(X)))), (g;h), ((i;j),k).";
    let clauses = parse_clauses(source).expect("parse");
    assert_eq!(clauses.len(), 20);
    assert!(clauses.iter().all(|c| c.name() == "foo"));
    // Every expansion ends with the last conjunct.
    assert!(clauses
        .iter()
        .all(|c| c.body.last() == Some(&Term::atom("k"))));
}

#[test]
fn query_disjunction_gives_alternatives() {
    let alternatives = parse_query("?- a(X), (b(X) ; c(X)).").expect("parse");
    assert_eq!(alternatives.len(), 2);
    assert_eq!(alternatives[0], vec![term("a(X)"), term("b(X)")]);
    assert_eq!(alternatives[1], vec![term("a(X)"), term("c(X)")]);
}

#[test]
fn list_tail_nests_innermost() {
    let list = term("[1,2,3|A]");
    let Term::Cons { tail, .. } = &list else {
        panic!("expected list cell, got {:?}", list);
    };
    let Term::Cons { tail, .. } = tail.as_ref() else {
        panic!("expected second cell");
    };
    let Term::Cons { head, tail } = tail.as_ref() else {
        panic!("expected third cell");
    };
    assert_eq!(head.as_ref(), &Term::number(3.0));
    assert_eq!(tail.as_ref(), &Term::var("A"));
}

#[test]
fn comparison_binds_looser_than_arithmetic() {
    let goal = term("X + 1 >= Y * 2");
    assert_eq!(
        goal,
        Term::functor(
            ">=",
            vec![
                Term::binop(Term::var("X"), Operator::Plus, Term::number(1.0)),
                Term::binop(Term::var("Y"), Operator::Times, Term::number(2.0)),
            ]
        )
    );
}

#[test]
fn underscore_names_are_anonymous() {
    assert_eq!(
        term("f(_, _Ignored)"),
        Term::functor("f", vec![Term::Underscore, Term::Underscore])
    );
}

#[test]
fn display_reparses_to_same_term() {
    for source in [
        "f(X, [1, 2 | T], \"s\")",
        "(1 + 2) * 3",
        "1 - (2 - 3)",
        "2 ^ 3 ^ 4",
        "X is -Y + 1",
        "g(a = b, (c, d))",
    ] {
        let parsed = term(source);
        assert_eq!(term(&parsed.to_string()), parsed, "round trip of {}", source);
    }
}

#[test]
fn arithmetic_at_goal_position_is_a_syntax_error() {
    assert!(parse_clauses("p :- 1 + 2.").is_err());
    assert!(parse_query("X + 1.").is_err());
}
