//! Program clause databases.

mod theory;

pub use theory::Theory;
