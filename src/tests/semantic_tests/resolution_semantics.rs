use super::*;
use crate::session::Phase;

// =============================================================================
// RESOLUTION SEMANTIC PROPERTIES
// =============================================================================
//
// Depth-first, left-to-right SLD resolution in clause order, with builtins evaluated on
// already-substituted goals.

const FIB: &str = "
    fib(0, 0).
    fib(1, 1).
    fib(N, F) :-
        N > 1,
        N1 is N - 1,
        N2 is N - 2,
        fib(N1, F1),
        fib(N2, F2),
        F is F1 + F2.
";

const LISTS: &str = "
    member(X, [X | _]).
    member(X, [_ | T]) :- member(X, T).

    append([], L, L).
    append([H | T], L, [H | R]) :- append(T, L, R).

    len([], 0).
    len([_ | T], N) :- len(T, M), N is M + 1.
";

#[test]
fn rule_then_fact() {
    let output = run("a(X) :- b(X). b(1).", "a(X).");
    assert!(!output.has_errors());
    assert_eq!(output.solutions, vec![answer(&[("X", "1")])]);
}

#[test]
fn fibonacci() {
    let output = run(FIB, "fib(5, X).");
    assert_eq!(output.solutions, vec![answer(&[("X", "8")])]);
}

#[test]
fn member_enumerates_in_list_order() {
    let output = run(LISTS, "member(X, [a, b, c]).");
    assert_eq!(column(&output, "X"), vec!["a", "b", "c"]);
}

#[test]
fn append_splits_a_list_every_way() {
    let output = run(LISTS, "append(X, Y, [1, 2]).");
    assert_eq!(column(&output, "X"), vec!["[]", "[1]", "[1, 2]"]);
    assert_eq!(column(&output, "Y"), vec!["[1, 2]", "[2]", "[]"]);
}

#[test]
fn list_length_uses_arithmetic() {
    let output = run(LISTS, "len([x, y, z], N).");
    assert_eq!(column(&output, "N"), vec!["3"]);
}

#[test]
fn substitution_collapses_transitively() {
    let output = run("", "A = [1, B], B = 3.");
    assert_eq!(output.solutions.len(), 1);
    assert_eq!(
        output.solutions[0].get("A").map(String::as_str),
        Some("[1, 3]")
    );
}

#[test]
fn invalid_list_tail_is_an_interpret_error() {
    let output = run("", "C = 3, A = [1 | B], B = [1 | C].");
    assert!(output.solutions.is_empty());
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].phase, Phase::Interpret);
    assert!(output.errors[0].messages[0].contains("Invalid list tail"));
}

#[test]
fn cyclic_binding_fails_the_branch_quietly() {
    let output = run("", "A = [1 | A], A is 3.");
    assert!(output.solutions.is_empty());
    assert!(!output.has_errors());
}

#[test]
fn unbound_query_variables_are_omitted() {
    let output = run("p(_, 1).", "p(X, Y).");
    assert_eq!(output.solutions, vec![answer(&[("Y", "1")])]);
}

#[test]
fn aliased_query_variables_show_each_other() {
    let output = run("same(Z, Z).", "same(X, Y).");
    assert_eq!(output.solutions.len(), 1);
    assert_eq!(output.solutions[0].get("Y").map(String::as_str), Some("X"));
}

#[test]
fn clause_variables_never_leak_into_answers() {
    let output = run("p(f(A, B)) :- B = 2.", "p(X).");
    let shown = &output.solutions[0]["X"];
    assert!(shown.starts_with("f(A#"), "got {}", shown);
    assert!(shown.ends_with(", 2)"), "got {}", shown);
    assert!(!output.solutions[0].contains_key("A"));
}

#[test]
fn builtins_compare_and_evaluate() {
    let output = run(
        "big(X) :- X > 10. small(X) :- X =< 10.",
        "big(12), small(3), 2 * 3 =:= 6, \"ab\" == \"ab\".",
    );
    assert_eq!(output.solutions, vec![answer(&[])]);

    let output = run("", "X is \"sld\" + \"log\".");
    assert_eq!(column(&output, "X"), vec!["\"sldlog\""]);
}

#[test]
fn fail_prunes_nothing_but_its_branch() {
    let output = run("p(1). p(2). q(X) :- p(X), X > 1. q(3) :- fail.", "q(X).");
    assert_eq!(column(&output, "X"), vec!["2"]);
}

#[test]
fn true_is_an_ordinary_atom() {
    let output = run("", "true.");
    assert!(output.solutions.is_empty());
    assert!(!output.has_errors());
    let output = run("true.", "true.");
    assert_eq!(output.solutions.len(), 1);
}

#[test]
fn undefined_variable_in_arithmetic_is_reported() {
    let output = run("", "X is Y + 1.");
    assert!(output.solutions.is_empty());
    let message = &output.errors[0].messages[0];
    assert!(message.contains("undefined variable Y"), "got {}", message);
}

#[test]
fn max_solutions_and_max_depth_limits() {
    let nat = "nat(0). nat(N) :- nat(M), N is M + 1.";
    let limited = solve(
        nat,
        "nat(X).",
        SolveOptions {
            max_solutions: Some(4),
            ..SolveOptions::default()
        },
    );
    assert_eq!(column(&limited, "X"), vec!["0", "1", "2", "3"]);

    let shallow = solve(
        nat,
        "nat(X).",
        SolveOptions {
            max_depth: Some(6),
            ..SolveOptions::default()
        },
    );
    assert!(!shallow.solutions.is_empty());
    assert!(shallow.solutions.len() < 6);
}

const COUNT: &str = "
    count(N, N).
    count(I, N) :- I < N, J is I + 1, count(J, N).
";

#[test]
fn deep_recursion_completes() {
    let output = run(COUNT, "count(0, 10000).");
    assert!(!output.has_errors(), "errors: {:?}", output.errors);
    assert_eq!(output.solutions, vec![answer(&[])]);
    // Three steps per level: the clause, `<` and `is`.
    assert!(output.derivation_trees[0].size() > 30_000);
}

#[test]
fn query_alternatives_concatenate_solutions() {
    let output = run("a(1). b(2). b(3).", "a(X) ; b(X).");
    assert_eq!(column(&output, "X"), vec!["1", "2", "3"]);
    assert_eq!(output.derivation_trees.len(), 2);
}
