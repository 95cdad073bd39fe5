//! Forward schema steps.
//!
//! Each step moves the schema from the previous version to its own version.
//! Steps only add nullable columns and indexes, so rows written by older
//! versions stay valid.

use crate::error::{Error, Result};
use crate::schema::tables::{self, expression, translation};
use crate::storage::Store;

/// Apply the step that produces `version`.
pub(crate) fn apply(store: &Store, version: u32) -> Result<()> {
    match version {
        2 => store.execute_ddl(&expression::FEATURE.add_column_sql(), "add expression feature"),
        3 => {
            store.execute_ddl(&translation::SCRIPT.add_column_sql(), "add translation script")?;
            store.execute_ddl(
                &tables::TRANSLATION_EXPRESSION_INDEX.create_sql(),
                "create translation index",
            )
        }
        other => Err(Error::UnsupportedSchemaVersion(other)),
    }
}

/// Create every table and index at the current version.
pub(crate) fn create_current(store: &Store) -> Result<()> {
    for table in tables::ALL_TABLES {
        store.execute_ddl(&table.create_sql(), "create table")?;
    }
    for index in tables::ALL_INDEXES {
        store.execute_ddl(&index.create_sql(), "create index")?;
    }
    Ok(())
}
