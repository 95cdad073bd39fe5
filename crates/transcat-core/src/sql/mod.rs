//! SQL statement construction.
//!
//! Statements are rendered from schema metadata rather than written by hand,
//! so every lookup, mutation, and migration step goes through the same small
//! set of builders.

mod builder;
mod condition;
mod ddl;
mod value;

pub use builder::{Delete, Insert, Select, Statement, Update};
pub use condition::Condition;
pub use value::Value;
