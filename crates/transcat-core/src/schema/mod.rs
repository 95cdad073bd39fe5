//! Entity model metadata.
//!
//! Table definitions describe the stored layout of every catalog entity; row
//! types decode stored values and convert them into protocol records.

mod row;
mod table;
pub mod tables;

pub use row::{Entity, ExpressionRow, ProjectExpressionRow, ProjectRow, TranslationRow};
pub use table::{ColumnDef, DataType, IndexDef, TableDef};
