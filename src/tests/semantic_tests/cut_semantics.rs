use super::*;
use crate::session::Phase;

// =============================================================================
// CUT SEMANTIC PROPERTIES
// =============================================================================
//
// A cut commits to the clause it appears in: remaining clauses for that call are dropped,
// solutions already found below the cut are kept, and callers are unaffected.

const CUT_THEN_LIST: &str = "p(2) :- !. p(X) :- [X | T].";

#[test]
fn cut_clause_succeeds_without_reaching_bad_clause() {
    let output = run(CUT_THEN_LIST, "p(2).");
    assert!(!output.has_errors(), "errors: {:?}", output.errors);
    assert_eq!(output.solutions, vec![answer(&[])]);
}

#[test]
fn list_goal_is_a_semantic_error() {
    let output = run(CUT_THEN_LIST, "p(1).");
    assert!(output.solutions.is_empty());
    assert_eq!(output.errors[0].phase, Phase::Interpret);
    assert!(output.errors[0].messages[0].starts_with("Semantic Error"));
}

#[test]
fn cut_keeps_solutions_found_before_it() {
    let program = "t(1). t(2). t(3). first(X) :- t(X), !.";
    let output = run(program, "first(X).");
    assert_eq!(column(&output, "X"), vec!["1"]);
}

#[test]
fn cut_after_failure_point_does_not_fire() {
    // The first clause fails before reaching its cut, so the second is still tried.
    let program = "s(X, pos) :- X > 0, !. s(_, other).";
    assert_eq!(column(&run(program, "s(5, R)."), "R"), vec!["pos"]);
    assert_eq!(column(&run(program, "s(-5, R)."), "R"), vec!["other"]);
}

#[test]
fn cut_does_not_prune_the_caller() {
    let program = "
        c(1). c(2).
        once_c(X) :- c(X), !.
        both(X, Y) :- once_c(X), c(Y).
    ";
    let output = run(program, "both(X, Y).");
    assert_eq!(column(&output, "X"), vec!["1", "1"]);
    assert_eq!(column(&output, "Y"), vec!["1", "2"]);
}

#[test]
fn goals_after_cut_still_backtrack() {
    let program = "
        c(1). c(2).
        d(a). d(b).
        pick(X, Y) :- c(X), !, d(Y).
    ";
    let output = run(program, "pick(X, Y).");
    assert_eq!(column(&output, "X"), vec!["1", "1"]);
    assert_eq!(column(&output, "Y"), vec!["a", "b"]);
}

#[test]
fn nested_cuts_only_commit_their_own_clause() {
    let program = "
        inner(1). inner(2).
        mid(X) :- inner(X), !.
        mid(9).
        outer(X) :- mid(X).
        outer(7).
    ";
    let output = run(program, "outer(X).");
    assert_eq!(column(&output, "X"), vec!["1", "7"]);
}

#[test]
fn query_cut_commits_the_query() {
    let output = run("c(1). c(2). c(3).", "c(X), !.");
    assert_eq!(column(&output, "X"), vec!["1"]);
    let output = run("c(1). c(2). c(3).", "c(X), X > 1, !.");
    assert_eq!(column(&output, "X"), vec!["2"]);
}

#[test]
fn cut_in_one_query_alternative_leaves_the_other() {
    let output = run("c(1). c(2).", "(c(X), !) ; c(X).");
    assert_eq!(column(&output, "X"), vec!["1", "1", "2"]);
}

#[test]
fn cut_inside_disjunctive_body_belongs_to_its_expansion() {
    // `(a, !) ; b` expands into two sibling clauses; the cut commits the first of them.
    let program = "v(1). v(2). w(X) :- (v(X), !) ; X = 5.";
    let output = run(program, "w(X).");
    assert_eq!(column(&output, "X"), vec!["1"]);
}
