//! Structural term equality (`==`).

use crate::syntax::Term;

/// True when `a` and `b` are the same term without binding anything.
///
/// Variables are equal only to themselves; numbers compare by value whether they were read or
/// computed.
pub fn structurally_equal(a: &Term, b: &Term) -> bool {
    match (a, b) {
        (Term::Variable(x), Term::Variable(y)) => x == y,
        (Term::Underscore, Term::Underscore) => true,
        (Term::Cut(_), Term::Cut(_)) => true,
        (Term::EmptyList, Term::EmptyList) => true,
        (Term::Functor(f), Term::Functor(g)) => {
            f.name == g.name
                && f.arity() == g.arity()
                && f.args.iter().zip(&g.args).all(|(x, y)| structurally_equal(x, y))
        }
        (
            Term::BinOp {
                left: l1,
                op: o1,
                right: r1,
            },
            Term::BinOp {
                left: l2,
                op: o2,
                right: r2,
            },
        ) => o1 == o2 && structurally_equal(l1, l2) && structurally_equal(r1, r2),
        (
            Term::UnOp {
                op: o1,
                operand: x1,
            },
            Term::UnOp {
                op: o2,
                operand: x2,
            },
        ) => o1 == o2 && structurally_equal(x1, x2),
        (Term::Cons { head: h1, tail: t1 }, Term::Cons { head: h2, tail: t2 }) => {
            structurally_equal(h1, h2) && structurally_equal(t1, t2)
        }
        _ => match (a.as_literal(), b.as_literal()) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_term;

    fn same(a: &str, b: &str) -> bool {
        structurally_equal(
            &parse_term(a).expect("parse"),
            &parse_term(b).expect("parse"),
        )
    }

    #[test]
    fn test_variables_are_not_bound() {
        assert!(same("X", "X"));
        assert!(!same("X", "Y"));
        assert!(!same("X", "1"));
    }

    #[test]
    fn test_compound_terms() {
        assert!(same("f(a, [1, 2 | T])", "f(a, [1, 2 | T])"));
        assert!(!same("f(a)", "f(a, b)"));
        assert!(!same("1 + 2", "3"));
        assert!(same("1 + 2", "1 + 2"));
    }

    #[test]
    fn test_literals_by_value() {
        assert!(same("1", "1.0"));
        assert!(!same("\"1\"", "1"));
    }
}
