//! The catalog engine.
//!
//! [`Catalog`] owns the store for its whole lifetime and is the only way
//! records are created, changed, or removed. Every operation runs to
//! completion before returning; multi-statement operations run inside a
//! single transaction.
//!
//! Records are addressed by their UUID. Storage rows are linked by integer
//! row keys, so most operations start by resolving a UUID to its row.

mod expression;
mod link;
mod project;
mod resolve;
mod translation;

use std::collections::HashMap;

use tracing::info;
use transcat_proto::{Expression, ExpressionId, ProjectId, Translation, TranslationId, Uuid};

use crate::config::{CatalogConfig, KeyCollision};
use crate::error::{Error, Result};
use crate::migration::{SchemaManager, CURRENT_SCHEMA_VERSION};
use crate::schema::tables;
use crate::schema::{ColumnDef, Entity, ExpressionRow, ProjectRow, TableDef, TranslationRow};
use crate::sql::{Condition, Select, Update, Value};
use crate::storage::{StatementStats, Store};

/// Options for creating an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateOptions {
    /// Also create the nested translations.
    pub cascade: bool,
    /// What to do when the key is already in use.
    pub key_collision: KeyCollision,
}

impl CreateOptions {
    /// Cascade with the given collision policy.
    pub fn new(key_collision: KeyCollision) -> Self {
        Self {
            cascade: true,
            key_collision,
        }
    }

    /// Ignore nested translations.
    pub fn shallow(mut self) -> Self {
        self.cascade = false;
        self
    }
}

/// A localization catalog backed by a single SQLite file.
#[derive(Debug)]
pub struct Catalog {
    store: Store,
    config: CatalogConfig,
}

impl Catalog {
    /// Open the catalog described by `config`, creating or migrating the
    /// schema as needed.
    pub fn open(config: CatalogConfig) -> Result<Self> {
        let store = Store::open(&config)?;
        let manager = SchemaManager::new(&store);
        let stored = manager.stored_version()?;
        manager.migrate(CURRENT_SCHEMA_VERSION)?;

        info!(
            path = %config.path.display(),
            stored_version = stored,
            schema_version = CURRENT_SCHEMA_VERSION,
            "Opened catalog"
        );

        Ok(Self { store, config })
    }

    /// The configuration the catalog was opened with.
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// The stored schema version.
    pub fn schema_version(&self) -> Result<u32> {
        SchemaManager::new(&self.store).stored_version()
    }

    /// Statements executed since the catalog was opened.
    pub fn statement_stats(&self) -> StatementStats {
        self.store.stats()
    }

    /// Creation options from the configuration.
    pub fn create_options(&self) -> CreateOptions {
        CreateOptions::new(self.config.key_collision)
    }

    /// An unsaved expression in the configured default language.
    pub fn draft_expression(&self, key: impl Into<String>, name: impl Into<String>) -> Expression {
        Expression::new(key, name, self.config.default_language.clone())
    }

    fn find<E: Entity>(&self, column: ColumnDef, value: impl Into<Value>, action: &str) -> Result<Option<E>> {
        debug_assert!(
            E::table().columns.contains(&column),
            "column {} is not in table {}",
            column.name,
            E::table().name
        );
        self.store
            .select_one(Select::new(E::table()).filter(Condition::eq(column, value)), action)
    }

    fn project_row(&self, id: ProjectId) -> Result<ProjectRow> {
        self.find(tables::project::UUID, id, "find project")?
            .ok_or(Error::UnknownProject(id))
    }

    fn expression_row(&self, id: ExpressionId) -> Result<ExpressionRow> {
        self.find(tables::expression::UUID, id, "find expression")?
            .ok_or(Error::UnknownExpression(id))
    }

    fn translation_row(&self, id: TranslationId) -> Result<TranslationRow> {
        self.find(tables::translation::UUID, id, "find translation")?
            .ok_or(Error::UnknownTranslation(id))
    }

    fn expression_row_by_key(&self, key: &str) -> Result<Option<ExpressionRow>> {
        self.find(tables::expression::KEY, key, "find expression by key")
    }

    fn expression_uuid(&self, row_id: i64) -> Result<Uuid> {
        self.find::<ExpressionRow>(tables::expression::ID, row_id, "find translation expression")?
            .ok_or(Error::UnknownPrimaryKey {
                table: tables::expression::TABLE,
                key: row_id,
            })?
            .uuid()
    }

    fn uuid_exists(&self, table: &'static TableDef, column: ColumnDef, id: Uuid) -> Result<bool> {
        let statement = Select::new(table)
            .only(&[column])
            .filter(Condition::eq(column, id))
            .limit(1)
            .build();
        self.store.exists(&statement, "check identifier")
    }

    /// Translations of one expression, in insertion order.
    fn translations_of(&self, row: &ExpressionRow) -> Result<Vec<Translation>> {
        let uuid = row.uuid()?;
        let rows: Vec<TranslationRow> = self.store.select(
            Select::new(&tables::TRANSLATION)
                .filter(Condition::eq(tables::translation::EXPRESSION_ID, row.id))
                .order_by(tables::translation::ID),
            "list expression translations",
        )?;
        rows.into_iter().map(|t| t.into_translation(uuid)).collect()
    }

    /// Convert translation rows that may belong to different expressions.
    fn translation_records(&self, rows: Vec<TranslationRow>) -> Result<Vec<Translation>> {
        let mut owners: HashMap<i64, Uuid> = HashMap::new();
        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let owner = match owners.get(&row.expression_id) {
                Some(uuid) => *uuid,
                None => {
                    let uuid = self.expression_uuid(row.expression_id)?;
                    owners.insert(row.expression_id, uuid);
                    uuid
                }
            };
            records.push(row.into_translation(owner)?);
        }
        Ok(records)
    }

    fn update_column(
        &self,
        table: &'static TableDef,
        key: ColumnDef,
        row_id: i64,
        column: ColumnDef,
        value: impl Into<Value>,
    ) -> Result<()> {
        let statement = Update::new(table)
            .set(column, value)
            .filter(Condition::eq(key, row_id))
            .build();
        self.store.execute(&statement, &format!("update {}.{}", table.name, column.name))?;
        Ok(())
    }
}

/// Optional text with empty strings treated as absent.
fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}
