use super::*;
use crate::unify::{unify, Bindings, ResolveError};

// =============================================================================
// UNIFICATION SEMANTIC PROPERTIES
// =============================================================================
//
// A unifier makes both sides equal once applied. Binding stores are values: composing two
// stores never changes either of them.

fn mgu(a: &str, b: &str) -> Option<Bindings> {
    unify(&term(a), &term(b)).expect("unify")
}

// -------------------------------------------------------------------------
// Property: applying the unifier to both sides gives the same term
// -------------------------------------------------------------------------
#[test]
fn unifier_equalizes_both_sides() {
    let pairs = [
        ("f(X, g(Y))", "f(a, g(b))"),
        ("p(X, X)", "p(Y, 3)"),
        ("[H | T]", "[1, 2, 3]"),
        ("q(A, [B | C])", "q(B, [1 | D])"),
        ("r(X, Y, Z)", "r(Y, Z, \"end\")"),
    ];
    for (a, b) in pairs {
        let s = mgu(a, b).unwrap_or_else(|| panic!("{} and {} should unify", a, b));
        assert_eq!(
            s.apply(&term(a)).expect("apply"),
            s.apply(&term(b)).expect("apply"),
            "unifier of {} and {}",
            a,
            b
        );
    }
}

#[test]
fn empty_list_never_matches_a_cell() {
    assert!(mgu("member(X, [])", "member(X, [X | T])").is_none());
    assert!(mgu("[]", "[_ | _]").is_none());
    assert!(mgu("[A]", "[1, 2]").is_none());
}

#[test]
fn variable_chains_collapse_transitively() {
    let s = mgu("f(A, B, C)", "f(B, C, 7)").expect("unifiable");
    for name in ["A", "B", "C"] {
        assert_eq!(s.apply(&Term::var(name)).expect("apply"), Term::number(7.0));
    }
}

#[test]
fn query_variable_names_survive_renaming() {
    let head = term("a(X)").instantiate(4);
    let s = unify(&head, &term("a(Q)")).expect("unify").expect("unifiable");
    assert_eq!(s.preferred_name("X#4"), Some("Q"));
    assert_eq!(
        s.apply(&Term::var("X#4")).expect("apply"),
        Term::var("Q")
    );
}

#[test]
fn cyclic_value_is_detected_when_read() {
    let s = mgu("A", "[1 | A]").expect("stored lazily");
    let err = s.apply(&term("A")).unwrap_err();
    assert_eq!(
        err,
        ResolveError::RecursiveType {
            variable: "A".to_string()
        }
    );
    assert!(err.to_string().starts_with("Recursive Type Error"));
}

#[test]
fn binding_through_a_cycle_fails_instead_of_erroring() {
    let mut s = mgu("A", "f(A)").expect("stored lazily");
    // Reading A to compare it with g(1) would loop, so the binding is refused.
    assert!(!s
        .try_assign(&crate::syntax::Variable::new("A"), &term("g(1)"))
        .expect("assign"));
}

#[test]
fn composition_keeps_inputs_untouched() {
    let first = mgu("A", "[1, B]").expect("unifiable");
    let second = mgu("B", "3").expect("unifiable");
    let merged = first.compose(&second).expect("compose");

    assert_eq!(merged.apply(&term("A")).expect("apply"), term("[1, 3]"));
    assert_eq!(first.apply(&term("A")).expect("apply"), term("[1, B]"));
    assert!(!second.contains("A"));
}

#[test]
fn composition_surfaces_invalid_list_tail() {
    let first = mgu("A", "[1 | B]").expect("unifiable");
    let second = mgu("B", "3").expect("unifiable");
    assert!(matches!(
        first.compose(&second),
        Err(ResolveError::NonListTail { .. })
    ));
}
