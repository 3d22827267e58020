//! Unification: binding stores, term resolution and most general unifiers.

mod bindings;
mod dsu;
mod resolve;
mod unify;

pub use bindings::{Bindings, Restricted};
pub use dsu::DisjointSets;
pub use resolve::{resolve, ResolveError};
pub use unify::unify;
