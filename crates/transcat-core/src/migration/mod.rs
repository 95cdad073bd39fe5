//! Schema versioning and migration.
//!
//! The schema version lives in SQLite's `user_version` header field. A value
//! of zero means the marker was never written: the database is either fresh
//! or predates versioning, in which case it is treated as version 1.
//!
//! | Version | Change |
//! |---------|--------|
//! | 1 | Initial catalog tables |
//! | 2 | `expression.feature` |
//! | 3 | `translation.script_code` and `translation_expression_idx` |
//!
//! Migration only moves forward, one version per transaction. The marker is
//! written in the same transaction as the step, so an interrupted migration
//! resumes from the last completed step.

mod steps;

use tracing::info;

use crate::error::{Error, Result};
use crate::schema::tables;
use crate::storage::Store;

/// Schema version produced by this build.
pub const CURRENT_SCHEMA_VERSION: u32 = 3;

/// Version reported for a database with no tables and no marker.
pub const FRESH_SCHEMA_VERSION: u32 = 0;

/// Version assumed for catalog tables found without a marker.
pub const LEGACY_SCHEMA_VERSION: u32 = 1;

/// Reads and advances the schema version of a store.
pub struct SchemaManager<'a> {
    store: &'a Store,
}

impl<'a> SchemaManager<'a> {
    /// Create a manager for `store`.
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// The version this build migrates to.
    pub fn current_version(&self) -> u32 {
        CURRENT_SCHEMA_VERSION
    }

    /// The version of the stored schema.
    pub fn stored_version(&self) -> Result<u32> {
        let marker = self.store.user_version()?;
        if marker != FRESH_SCHEMA_VERSION {
            return Ok(marker);
        }

        let names = self.store.table_names()?;
        let legacy = tables::ALL_TABLES
            .iter()
            .any(|table| names.iter().any(|name| name == table.name));

        Ok(if legacy {
            LEGACY_SCHEMA_VERSION
        } else {
            FRESH_SCHEMA_VERSION
        })
    }

    /// Bring the stored schema to version `to`.
    pub fn migrate(&self, to: u32) -> Result<()> {
        if to > CURRENT_SCHEMA_VERSION {
            return Err(Error::UnsupportedSchemaVersion(to));
        }

        let stored = self.stored_version()?;

        if stored == FRESH_SCHEMA_VERSION {
            if to != CURRENT_SCHEMA_VERSION {
                return Err(Error::UnsupportedSchemaVersion(to));
            }
            self.store.transaction(|store| {
                steps::create_current(store)?;
                store.set_user_version(to)
            })?;
            info!(version = to, "Created catalog schema");
            return Ok(());
        }

        if to < stored {
            return Err(Error::MigrationDirection {
                stored,
                requested: to,
            });
        }
        if to == stored {
            return Ok(());
        }

        let next = stored + 1;
        self.store.transaction(|store| {
            steps::apply(store, next)?;
            store.set_user_version(next)
        })?;
        info!(from = stored, to = next, "Migrated catalog schema");

        self.migrate(to)
    }
}
