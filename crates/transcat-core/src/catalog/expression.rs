use tracing::debug;
use transcat_proto::{Expression, ExpressionId, ExpressionQuery, ExpressionUpdate, Locale, Uuid};

use super::{non_empty, Catalog, CreateOptions};
use crate::config::KeyCollision;
use crate::error::{Error, Result};
use crate::schema::tables::{self, expression, project_expression, translation};
use crate::schema::{ColumnDef, ExpressionRow};
use crate::sql::{Condition, Delete, Insert, Select, Value};

impl Catalog {
    /// Every expression, without translations.
    pub fn expressions(&self) -> Result<Vec<Expression>> {
        let rows: Vec<ExpressionRow> = self.store.select(
            Select::new(&tables::EXPRESSION).order_by(expression::ID),
            "list expressions",
        )?;
        rows.into_iter().map(ExpressionRow::into_expression).collect()
    }

    /// Expressions matching a query.
    ///
    /// [`ExpressionQuery::Hierarchy`] returns every expression with its
    /// translations. The other variants return shallow records, each
    /// expression at most once.
    pub fn expressions_matching(&self, query: &ExpressionQuery) -> Result<Vec<Expression>> {
        let select = Select::new(&tables::EXPRESSION);
        let rows: Vec<ExpressionRow> = match query {
            ExpressionQuery::Hierarchy => {
                let rows: Vec<ExpressionRow> = self
                    .store
                    .select(select.order_by(expression::ID), "list expressions")?;
                return rows
                    .into_iter()
                    .map(|row| {
                        let translations = self.translations_of(&row)?;
                        row.into_expression_with(translations)
                    })
                    .collect();
            }
            ExpressionQuery::PrimaryKey(key) => self
                .find::<ExpressionRow>(expression::ID, *key, "find expression")?
                .into_iter()
                .collect(),
            ExpressionQuery::Id(id) => self
                .find::<ExpressionRow>(expression::UUID, *id, "find expression")?
                .into_iter()
                .collect(),
            ExpressionQuery::ProjectId(project_id) => {
                let project = self.project_row(*project_id)?;
                self.linked_expression_rows(project.id)?
            }
            ExpressionQuery::Key(key) => self.expression_row_by_key(key)?.into_iter().collect(),
            ExpressionQuery::Named(name) => self.store.select(
                select
                    .filter(Condition::contains(expression::NAME, name))
                    .order_by(expression::ID),
                "find expressions by name",
            )?,
            ExpressionQuery::Having(language, script, region) => self.store.select(
                select
                    .distinct()
                    .join(&tables::TRANSLATION, expression::ID, translation::EXPRESSION_ID)
                    .filter(Condition::and([
                        Condition::eq(translation::LANGUAGE, language),
                        Condition::when(translation::SCRIPT, *script),
                        Condition::when(translation::REGION, region.as_ref()),
                    ]))
                    .order_by(expression::ID),
                "find expressions having locale",
            )?,
            ExpressionQuery::HavingOnly(language) => self.store.select(
                select
                    .distinct()
                    .join(&tables::TRANSLATION, expression::ID, translation::EXPRESSION_ID)
                    .filter(Condition::and([
                        Condition::eq(translation::LANGUAGE, language),
                        Condition::IsNull(translation::SCRIPT),
                        Condition::IsNull(translation::REGION),
                    ]))
                    .order_by(expression::ID),
                "find expressions having base language",
            )?,
        };

        rows.into_iter().map(ExpressionRow::into_expression).collect()
    }

    /// A single expression, without translations.
    pub fn expression(&self, id: ExpressionId) -> Result<Expression> {
        self.expression_row(id)?.into_expression()
    }

    /// The single expression identified by a query.
    ///
    /// Only [`ExpressionQuery::PrimaryKey`], [`ExpressionQuery::Id`], and
    /// [`ExpressionQuery::Key`] identify a single expression.
    pub fn expression_matching(&self, query: &ExpressionQuery) -> Result<Expression> {
        match query {
            ExpressionQuery::PrimaryKey(key) => self
                .find::<ExpressionRow>(expression::ID, *key, "find expression")?
                .ok_or(Error::UnknownPrimaryKey {
                    table: expression::TABLE,
                    key: *key,
                })?
                .into_expression(),
            ExpressionQuery::Id(id) => self.expression(*id),
            ExpressionQuery::Key(key) => self
                .expression_row_by_key(key)?
                .ok_or_else(|| Error::UnknownExpressionKey(key.clone()))?
                .into_expression(),
            _ => Err(Error::InvalidQuery(format!(
                "{query:?} does not identify a single expression"
            ))),
        }
    }

    /// Create an expression and its nested translations with the configured
    /// key collision policy.
    pub fn create_expression(&self, expression: &Expression) -> Result<ExpressionId> {
        self.create_expression_with(expression, self.create_options())
    }

    /// Create an expression.
    ///
    /// When the key is already in use, [`KeyCollision::Merge`] returns the
    /// existing identifier and, if cascading, adds each nested translation
    /// whose locale the existing expression lacks. [`KeyCollision::Reject`]
    /// fails instead.
    pub fn create_expression_with(
        &self,
        expression: &Expression,
        options: CreateOptions,
    ) -> Result<ExpressionId> {
        if expression.key.is_empty() {
            return Err(Error::InvalidAction("expression key is empty".into()));
        }
        if !expression.id.is_nil()
            && self.uuid_exists(&tables::EXPRESSION, expression::UUID, expression.id)?
        {
            return Err(Error::ExistingExpressionWithId(expression.id));
        }

        self.store.transaction(|store| {
            if let Some(existing) = self.expression_row_by_key(&expression.key)? {
                if options.key_collision == KeyCollision::Reject {
                    return Err(Error::ExistingExpressionWithKey(expression.key.clone()));
                }

                let id = existing.uuid()?;
                let mut added = 0;
                if options.cascade {
                    for nested in &expression.translations {
                        if !self.has_locale(existing.id, &nested.locale())? {
                            self.insert_translation(existing.id, nested)?;
                            added += 1;
                        }
                    }
                }
                debug!(expression = %id, key = %expression.key, added, "Merged expression into existing key");
                return Ok(id);
            }

            let id = Uuid::new_v4();
            let statement = Insert::new(&tables::EXPRESSION)
                .value(expression::UUID, id)
                .value(expression::KEY, expression.key.as_str())
                .value(expression::NAME, expression.name.as_str())
                .value(expression::DEFAULT_LANGUAGE, &expression.default_language)
                .value(expression::CONTEXT, non_empty(expression.context.as_deref()))
                .value(expression::FEATURE, non_empty(expression.feature.as_deref()))
                .build();
            store.execute(&statement, "insert expression")?;
            let row = store.last_insert_rowid();

            if options.cascade {
                for nested in &expression.translations {
                    self.insert_translation(row, nested)?;
                }
            }

            debug!(expression = %id, key = %expression.key, "Created expression");
            Ok(id)
        })
    }

    /// Apply a single change to an expression. Unchanged values are not
    /// written.
    pub fn update_expression(&self, id: ExpressionId, update: ExpressionUpdate) -> Result<()> {
        let row = self.expression_row(id)?;
        let changed = match update {
            ExpressionUpdate::Key(key) => {
                if key.is_empty() {
                    return Err(Error::InvalidAction("expression key is empty".into()));
                }
                if key == row.key {
                    false
                } else {
                    if let Some(other) = self.expression_row_by_key(&key)? {
                        if other.id != row.id {
                            return Err(Error::ExistingExpressionWithKey(key));
                        }
                    }
                    self.set_expression(&row, expression::KEY, key)?
                }
            }
            ExpressionUpdate::Name(name) if name != row.name => {
                self.set_expression(&row, expression::NAME, name)?
            }
            ExpressionUpdate::DefaultLanguage(language) if language.as_str() != row.default_language => {
                self.set_expression(&row, expression::DEFAULT_LANGUAGE, &language)?
            }
            ExpressionUpdate::Context(context) => {
                let context = non_empty(context.as_deref());
                if context != row.context {
                    self.set_expression(&row, expression::CONTEXT, context)?
                } else {
                    false
                }
            }
            ExpressionUpdate::Feature(feature) => {
                let feature = non_empty(feature.as_deref());
                if feature != row.feature {
                    self.set_expression(&row, expression::FEATURE, feature)?
                } else {
                    false
                }
            }
            ExpressionUpdate::LinkProject(project_id) => {
                let project = self.project_row(project_id)?;
                self.link_rows(project.id, row.id)?;
                false
            }
            ExpressionUpdate::UnlinkProject(project_id) => {
                let project = self.project_row(project_id)?;
                self.unlink_rows(project.id, row.id)?;
                false
            }
            ExpressionUpdate::Name(_) | ExpressionUpdate::DefaultLanguage(_) => false,
        };

        if changed {
            debug!(expression = %id, "Updated expression");
        }
        Ok(())
    }

    /// Remove an expression, its translations, and its project links.
    pub fn delete_expression(&self, id: ExpressionId) -> Result<()> {
        let row = self.expression_row(id)?;
        self.store.transaction(|store| {
            let translations = Delete::new(&tables::TRANSLATION)
                .filter(Condition::eq(translation::EXPRESSION_ID, row.id))
                .build();
            let translations = store.execute(&translations, "delete expression translations")?;

            let links = Delete::new(&tables::PROJECT_EXPRESSION)
                .filter(Condition::eq(project_expression::EXPRESSION_ID, row.id))
                .build();
            let links = store.execute(&links, "delete expression links")?;

            let expression = Delete::new(&tables::EXPRESSION)
                .filter(Condition::eq(expression::ID, row.id))
                .build();
            store.execute(&expression, "delete expression")?;

            debug!(expression = %id, translations, links, "Deleted expression");
            Ok(())
        })
    }

    /// Whether an expression row has a translation with exactly this locale.
    pub(super) fn has_locale(&self, expression_row: i64, locale: &Locale) -> Result<bool> {
        let statement = Select::new(&tables::TRANSLATION)
            .only(&[translation::ID])
            .filter(super::translation::locale_condition(expression_row, locale))
            .limit(1)
            .build();
        self.store.exists(&statement, "check translation locale")
    }

    fn set_expression(
        &self,
        row: &ExpressionRow,
        column: ColumnDef,
        value: impl Into<Value>,
    ) -> Result<bool> {
        self.update_column(&tables::EXPRESSION, expression::ID, row.id, column, value)?;
        Ok(true)
    }
}
