//! sldlog: a small Prolog-like logic programming language
//!
//! Programs are Horn clauses with arithmetic, comparison builtins and cut. Queries are answered
//! by depth-first SLD resolution, and every answer comes with the derivation tree that produced
//! it.

pub mod parser;
pub mod repl;
pub mod session;
pub mod sld;
pub mod syntax;
pub mod theory;
pub mod unify;

/// Free stack below which recursive passes move onto a fresh segment.
const STACK_RED_ZONE: usize = 256 * 1024;
/// Size of each fresh stack segment.
const STACK_SEGMENT: usize = 8 * 1024 * 1024;

/// Run `f`, first switching to a new stack segment when the current one is nearly exhausted.
///
/// Resolution, term resolution and tree serialization call this once per level of recursion.
pub(crate) fn grow_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT, f)
}

#[cfg(test)]
mod tests;
