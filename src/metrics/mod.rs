//! Derived metrics appended to a loaded table.

pub mod yoy;

pub use yoy::*;
