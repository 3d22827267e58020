//! Static operator table driving the precedence-climbing parser.

use super::lexer::TokenKind;
use crate::syntax::{Operator, COMPARISON_PRECEDENCE, PREFIX_PRECEDENCE};

/// The highest precedence in the table. Parenthesised expressions and whole clauses parse
/// with this ceiling.
pub const MAX_PRECEDENCE: u16 = 1200;

/// Associativity class of an infix operator, in standard Prolog notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixity {
    /// Non-associative: `a :- b :- c` is rejected.
    Xfx,
    /// Right-associative: `1^2^3` is `1^(2^3)`.
    Xfy,
    /// Left-associative: `1-2-3` is `(1-2)-3`.
    Yfx,
}

/// What an infix application builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixBuilder {
    /// `:-`, expanded into clauses on the spot.
    Rule,
    /// Conjunction, disjunction and arithmetic.
    BinOp(Operator),
    /// Comparisons, `=` and `is`: a two-argument functor named by the operator.
    Relation(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfixOp {
    pub precedence: u16,
    pub fixity: Fixity,
    pub builder: InfixBuilder,
}

impl InfixOp {
    /// Highest precedence allowed for the left and right operands.
    pub fn operand_bounds(&self) -> (u16, u16) {
        let p = self.precedence;
        match self.fixity {
            Fixity::Xfx => (p - 1, p - 1),
            Fixity::Xfy => (p - 1, p),
            Fixity::Yfx => (p, p - 1),
        }
    }
}

fn binop(op: Operator) -> InfixOp {
    InfixOp {
        precedence: op.precedence(),
        fixity: if op.is_right_associative() {
            Fixity::Xfy
        } else {
            Fixity::Yfx
        },
        builder: InfixBuilder::BinOp(op),
    }
}

fn relation(name: &'static str) -> InfixOp {
    InfixOp {
        precedence: COMPARISON_PRECEDENCE,
        fixity: Fixity::Xfx,
        builder: InfixBuilder::Relation(name),
    }
}

/// Infix entry for a token, if it is an infix operator.
pub fn infix(kind: TokenKind) -> Option<InfixOp> {
    let op = match kind {
        TokenKind::Implies => InfixOp {
            precedence: MAX_PRECEDENCE,
            fixity: Fixity::Xfx,
            builder: InfixBuilder::Rule,
        },
        TokenKind::Semicolon => binop(Operator::Semicolon),
        TokenKind::Comma => binop(Operator::Comma),
        TokenKind::Is => relation("is"),
        TokenKind::Greater => relation(">"),
        TokenKind::GreaterOrEqual => relation(">="),
        TokenKind::Less => relation("<"),
        TokenKind::LessOrEqual => relation("=<"),
        TokenKind::Unify => relation("="),
        TokenKind::ValueEqual => relation("=:="),
        TokenKind::StructEqual => relation("=="),
        TokenKind::Plus => binop(Operator::Plus),
        TokenKind::Minus => binop(Operator::Minus),
        TokenKind::And => binop(Operator::And),
        TokenKind::Or => binop(Operator::Or),
        TokenKind::Times => binop(Operator::Times),
        TokenKind::Divide => binop(Operator::Divide),
        TokenKind::Power => binop(Operator::Power),
        _ => return None,
    };
    Some(op)
}

/// Prefix (`fy`) entry for a token.
pub fn prefix(kind: TokenKind) -> Option<(u16, Operator)> {
    match kind {
        TokenKind::Plus => Some((PREFIX_PRECEDENCE, Operator::Plus)),
        TokenKind::Minus => Some((PREFIX_PRECEDENCE, Operator::Minus)),
        _ => None,
    }
}
