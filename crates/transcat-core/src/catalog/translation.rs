use tracing::debug;
use transcat_proto::{
    Locale, RegionCode, Translation, TranslationId, TranslationQuery, TranslationUpdate, Uuid,
};

use super::Catalog;
use crate::error::{Error, Result};
use crate::schema::tables::{self, translation};
use crate::schema::{ColumnDef, TranslationRow};
use crate::sql::{Condition, Delete, Insert, Select, Value};

/// Translations of an expression row with exactly this locale tuple.
pub(super) fn locale_condition(expression_row: i64, locale: &Locale) -> Condition {
    Condition::and([
        Condition::eq(translation::EXPRESSION_ID, expression_row),
        Condition::eq(translation::LANGUAGE, &locale.language),
        Condition::optional_eq(translation::SCRIPT, locale.script),
        Condition::optional_eq(translation::REGION, locale.region.as_ref()),
    ])
}

impl Catalog {
    /// Every translation.
    pub fn translations(&self) -> Result<Vec<Translation>> {
        let rows: Vec<TranslationRow> = self.store.select(
            Select::new(&tables::TRANSLATION).order_by(translation::ID),
            "list translations",
        )?;
        self.translation_records(rows)
    }

    /// Translations matching a query.
    ///
    /// [`TranslationQuery::Having`] matches the locale tuple exactly: an absent
    /// script or region only matches translations without one.
    pub fn translations_matching(&self, query: &TranslationQuery) -> Result<Vec<Translation>> {
        match query {
            TranslationQuery::PrimaryKey(key) => {
                let rows = self
                    .find::<TranslationRow>(translation::ID, *key, "find translation")?
                    .into_iter()
                    .collect();
                self.translation_records(rows)
            }
            TranslationQuery::Id(id) => {
                let rows = self
                    .find::<TranslationRow>(translation::UUID, *id, "find translation")?
                    .into_iter()
                    .collect();
                self.translation_records(rows)
            }
            TranslationQuery::ExpressionId(expression_id) => {
                let expression = self.expression_row(*expression_id)?;
                self.translations_of(&expression)
            }
            TranslationQuery::Having(expression_id, language, script, region) => {
                let locale = Locale {
                    language: language.clone(),
                    script: *script,
                    region: region.clone(),
                };
                self.translations_with_locale(*expression_id, &locale)
            }
            TranslationQuery::HavingOnly(expression_id, language) => {
                self.translations_with_locale(*expression_id, &Locale::new(language.clone()))
            }
        }
    }

    /// A single translation.
    pub fn translation(&self, id: TranslationId) -> Result<Translation> {
        let row = self.translation_row(id)?;
        let owner = self.expression_uuid(row.expression_id)?;
        row.into_translation(owner)
    }

    /// The single translation identified by a query.
    ///
    /// Only [`TranslationQuery::PrimaryKey`] and [`TranslationQuery::Id`]
    /// identify a single translation.
    pub fn translation_matching(&self, query: &TranslationQuery) -> Result<Translation> {
        match query {
            TranslationQuery::PrimaryKey(key) => {
                let row = self
                    .find::<TranslationRow>(translation::ID, *key, "find translation")?
                    .ok_or(Error::UnknownPrimaryKey {
                        table: translation::TABLE,
                        key: *key,
                    })?;
                let owner = self.expression_uuid(row.expression_id)?;
                row.into_translation(owner)
            }
            TranslationQuery::Id(id) => self.translation(*id),
            _ => Err(Error::InvalidQuery(format!(
                "{query:?} does not identify a single translation"
            ))),
        }
    }

    /// Create a translation for an existing expression.
    ///
    /// Translations are not deduplicated by locale; query with
    /// [`TranslationQuery::Having`] first when at most one is wanted.
    pub fn create_translation(&self, translation: &Translation) -> Result<TranslationId> {
        let expression = self.expression_row(translation.expression_id)?;
        self.insert_translation(expression.id, translation)
    }

    /// Apply a single change to a translation. Unchanged values are not
    /// written.
    pub fn update_translation(&self, id: TranslationId, update: TranslationUpdate) -> Result<()> {
        let row = self.translation_row(id)?;
        let (column, value): (ColumnDef, Value) = match update {
            TranslationUpdate::Language(language) if language.as_str() != row.language => {
                (translation::LANGUAGE, Value::from(&language))
            }
            TranslationUpdate::Script(script)
                if script.map(|s| s.as_str()) != row.script.as_deref() =>
            {
                (translation::SCRIPT, Value::from(script))
            }
            TranslationUpdate::Region(region)
                if region.as_ref().map(RegionCode::as_str) != row.region.as_deref() =>
            {
                (translation::REGION, Value::from(region.as_ref()))
            }
            TranslationUpdate::Value(value) if value != row.value => {
                (translation::VALUE, Value::from(value))
            }
            _ => return Ok(()),
        };

        self.update_column(&tables::TRANSLATION, translation::ID, row.id, column, value)?;
        debug!(translation = %id, column = column.name, "Updated translation");
        Ok(())
    }

    /// Remove a single translation.
    pub fn delete_translation(&self, id: TranslationId) -> Result<()> {
        let row = self.translation_row(id)?;
        let statement = Delete::new(&tables::TRANSLATION)
            .filter(Condition::eq(translation::ID, row.id))
            .build();
        self.store.execute(&statement, "delete translation")?;
        debug!(translation = %id, "Deleted translation");
        Ok(())
    }

    /// Insert a translation owned by an expression row and return its new
    /// identifier.
    pub(super) fn insert_translation(
        &self,
        expression_row: i64,
        translation: &Translation,
    ) -> Result<TranslationId> {
        if !translation.id.is_nil()
            && self.uuid_exists(&tables::TRANSLATION, translation::UUID, translation.id)?
        {
            return Err(Error::ExistingTranslationWithId(translation.id));
        }

        let id = Uuid::new_v4();
        let statement = Insert::new(&tables::TRANSLATION)
            .value(translation::UUID, id)
            .value(translation::EXPRESSION_ID, expression_row)
            .value(translation::LANGUAGE, &translation.language)
            .value(translation::SCRIPT, translation.script)
            .value(translation::REGION, translation.region.as_ref())
            .value(translation::VALUE, translation.value.as_str())
            .build();
        self.store.execute(&statement, "insert translation")?;

        debug!(
            translation = %id,
            expression_row,
            locale = %translation.locale(),
            "Created translation"
        );
        Ok(id)
    }

    /// Translations of an expression whose locale tuple equals `locale`.
    pub(super) fn translation_rows_with_locale(
        &self,
        expression_row: i64,
        locale: &Locale,
    ) -> Result<Vec<TranslationRow>> {
        self.store.select(
            Select::new(&tables::TRANSLATION)
                .filter(locale_condition(expression_row, locale))
                .order_by(translation::ID),
            "find translations having locale",
        )
    }

    fn translations_with_locale(
        &self,
        expression_id: Uuid,
        locale: &Locale,
    ) -> Result<Vec<Translation>> {
        let expression = self.expression_row(expression_id)?;
        self.translation_rows_with_locale(expression.id, locale)?
            .into_iter()
            .map(|row| row.into_translation(expression_id))
            .collect()
    }
}
