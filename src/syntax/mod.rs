//! Syntax types: terms, clauses and evaluated literal values.

mod clause;
mod term;
mod value;

pub use clause::Clause;
pub use term::{
    is_aliased_name, Cut, Functor, Operator, Span, Term, Variable, ALIAS_SEPARATOR,
    ARGUMENT_PRECEDENCE, COMPARISON_OPERATORS, COMPARISON_PRECEDENCE, PREFIX_PRECEDENCE,
};
pub use value::LiteralValue;
