use super::*;
use crate::sld::structurally_equal;
use crate::unify::{unify, ResolveError};
use proptest::prelude::*;

// =============================================================================
// PROPERTY-BASED TESTS
// =============================================================================
//
// Small vocabularies keep generated terms overlapping often enough to unify.

fn arb_var() -> impl Strategy<Value = Term> {
    prop_oneof![Just("X"), Just("Y"), Just("Z"), Just("W")].prop_map(Term::var)
}

fn arb_constant() -> impl Strategy<Value = Term> {
    prop_oneof![
        prop_oneof![Just("a"), Just("b"), Just("c")].prop_map(Term::atom),
        (0u8..4).prop_map(|n| Term::number(f64::from(n))),
    ]
}

fn arb_ground_term(depth: u32) -> impl Strategy<Value = Term> {
    if depth == 0 {
        arb_constant().boxed()
    } else {
        prop_oneof![
            arb_constant(),
            (
                prop_oneof![Just("f"), Just("g")],
                prop::collection::vec(arb_ground_term(depth - 1), 1..=3)
            )
                .prop_map(|(name, args)| Term::functor(name, args)),
            prop::collection::vec(arb_ground_term(depth - 1), 0..=3).prop_map(Term::list),
        ]
        .boxed()
    }
}

fn arb_term(depth: u32) -> impl Strategy<Value = Term> {
    if depth == 0 {
        prop_oneof![arb_var(), arb_constant()].boxed()
    } else {
        prop_oneof![
            arb_var(),
            arb_constant(),
            (
                prop_oneof![Just("f"), Just("g")],
                prop::collection::vec(arb_term(depth - 1), 1..=3)
            )
                .prop_map(|(name, args)| Term::functor(name, args)),
            (
                prop::collection::vec(arb_term(depth - 1), 1..=3),
                arb_var()
            )
                .prop_map(|(items, tail)| Term::list_with_tail(items, tail)),
        ]
        .boxed()
    }
}

// -------------------------------------------------------------------------
//  Self-unification always succeeds
// -------------------------------------------------------------------------
proptest! {
    #[test]
    fn self_unification_succeeds(t in arb_term(2)) {
        prop_assert!(unify(&t, &t).expect("unify").is_some());
    }
}

// -------------------------------------------------------------------------
//  A unifier makes both sides equal, unless reading them back hits a cycle
//  or a list tail bound to a non-list
// -------------------------------------------------------------------------
proptest! {
    #[test]
    fn unifier_equalizes_terms(a in arb_term(2), b in arb_term(2)) {
        let s = match unify(&a, &b) {
            Ok(Some(s)) => s,
            Ok(None) | Err(ResolveError::NonListTail { .. }) => return Ok(()),
            Err(e) => return Err(TestCaseError::fail(format!("unexpected error {}", e))),
        };
        match (s.apply(&a), s.apply(&b)) {
            (Ok(ra), Ok(rb)) => prop_assert_eq!(ra, rb),
            (Err(ResolveError::RecursiveType { .. }), _)
            | (_, Err(ResolveError::RecursiveType { .. }))
            | (Err(ResolveError::NonListTail { .. }), _)
            | (_, Err(ResolveError::NonListTail { .. })) => {}
        }
    }
}

// -------------------------------------------------------------------------
//  Ground terms unify exactly when they are structurally equal
// -------------------------------------------------------------------------
proptest! {
    #[test]
    fn ground_unification_is_equality(a in arb_ground_term(2), b in arb_ground_term(2)) {
        let unifies = unify(&a, &b).expect("unify").is_some();
        prop_assert_eq!(unifies, structurally_equal(&a, &b));
    }
}

// -------------------------------------------------------------------------
//  Printing a term and parsing it back gives the same term
// -------------------------------------------------------------------------
proptest! {
    #[test]
    fn display_round_trips_through_parser(t in arb_term(3)) {
        let shown = t.to_string();
        let reparsed = parse_term(&shown).expect("reparse");
        prop_assert_eq!(reparsed, t);
    }
}

// -------------------------------------------------------------------------
//  Instantiation renames every variable and nothing else
// -------------------------------------------------------------------------
proptest! {
    #[test]
    fn instantiation_aliases_all_variables(t in arb_term(3), id in 1u64..1000) {
        let copy = t.instantiate(id);
        let expected: Vec<String> = t
            .variables()
            .into_iter()
            .map(|v| format!("{}#{}", v, id))
            .collect();
        prop_assert_eq!(copy.variables(), expected);
    }
}

// -------------------------------------------------------------------------
//  Facts are enumerated in program order
// -------------------------------------------------------------------------
proptest! {
    #[test]
    fn facts_are_answered_in_order(values in prop::collection::vec(0u32..100, 1..8)) {
        let program: String = values.iter().map(|v| format!("n({}). ", v)).collect();
        let output = run(&program, "n(X).");
        let expected: Vec<String> = values.iter().map(u32::to_string).collect();
        prop_assert_eq!(column(&output, "X"), expected);
    }
}
