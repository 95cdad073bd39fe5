//! Storage layer over the embedded SQLite database.

mod stats;
mod store;

pub use stats::StatementStats;
pub use store::Store;
