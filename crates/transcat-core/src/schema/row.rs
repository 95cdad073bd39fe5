//! Stored rows and their conversion to catalog records.
//!
//! Rows hold raw column values exactly as read from storage. Converting a row
//! into a record validates identifiers and locale codes; a failure there means
//! the file was modified outside the engine.

use std::str::FromStr;

use rusqlite::Row;
use transcat_proto::{
    Expression, LanguageCode, Project, RegionCode, ScriptCode, Translation, Uuid,
};

use super::table::TableDef;
use super::tables::{self, expression, project, translation};
use crate::error::{Error, Result};

/// A row type that can be selected from its table.
///
/// Decoders read columns by position, in the order of [`TableDef::columns`].
pub trait Entity: Sized {
    /// The table this row is stored in.
    fn table() -> &'static TableDef;

    /// Decode a row selected with every column of [`Entity::table`].
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

/// A stored project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRow {
    /// Row key.
    pub id: i64,
    /// External identifier text.
    pub uuid: String,
    /// Project name.
    pub name: String,
}

/// A stored expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionRow {
    /// Row key.
    pub id: i64,
    /// External identifier text.
    pub uuid: String,
    /// Unique key.
    pub key: String,
    /// Human-readable name.
    pub name: String,
    /// Default language text.
    pub default_language: String,
    /// Translator context.
    pub context: Option<String>,
    /// Feature tag.
    pub feature: Option<String>,
}

/// A stored translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRow {
    /// Row key.
    pub id: i64,
    /// External identifier text.
    pub uuid: String,
    /// Owning expression row key.
    pub expression_id: i64,
    /// Language text.
    pub language: String,
    /// Script text.
    pub script: Option<String>,
    /// Region text.
    pub region: Option<String>,
    /// Translated text.
    pub value: String,
}

/// A stored project/expression link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectExpressionRow {
    /// Project row key.
    pub project_id: i64,
    /// Expression row key.
    pub expression_id: i64,
}

impl Entity for ProjectRow {
    fn table() -> &'static TableDef {
        &tables::PROJECT
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            uuid: row.get(1)?,
            name: row.get(2)?,
        })
    }
}

impl Entity for ExpressionRow {
    fn table() -> &'static TableDef {
        &tables::EXPRESSION
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            uuid: row.get(1)?,
            key: row.get(2)?,
            name: row.get(3)?,
            default_language: row.get(4)?,
            context: row.get(5)?,
            feature: row.get(6)?,
        })
    }
}

impl Entity for TranslationRow {
    fn table() -> &'static TableDef {
        &tables::TRANSLATION
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            uuid: row.get(1)?,
            expression_id: row.get(2)?,
            language: row.get(3)?,
            script: row.get(4)?,
            region: row.get(5)?,
            value: row.get(6)?,
        })
    }
}

impl Entity for ProjectExpressionRow {
    fn table() -> &'static TableDef {
        &tables::PROJECT_EXPRESSION
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            project_id: row.get(0)?,
            expression_id: row.get(1)?,
        })
    }
}

impl ProjectRow {
    /// Parsed external identifier.
    pub fn uuid(&self) -> Result<Uuid> {
        parse_uuid(project::TABLE, &self.uuid)
    }

    /// Convert into a project record without expressions.
    pub fn into_project(self) -> Result<Project> {
        self.into_project_with(Vec::new())
    }

    /// Convert into a project record with the given expressions.
    pub fn into_project_with(self, expressions: Vec<Expression>) -> Result<Project> {
        Ok(Project {
            id: self.uuid()?,
            name: self.name,
            expressions,
        })
    }
}

impl ExpressionRow {
    /// Parsed external identifier.
    pub fn uuid(&self) -> Result<Uuid> {
        parse_uuid(expression::TABLE, &self.uuid)
    }

    /// Convert into an expression record without translations.
    pub fn into_expression(self) -> Result<Expression> {
        self.into_expression_with(Vec::new())
    }

    /// Convert into an expression record with the given translations.
    pub fn into_expression_with(self, translations: Vec<Translation>) -> Result<Expression> {
        Ok(Expression {
            id: self.uuid()?,
            default_language: parse_code::<LanguageCode>(
                expression::TABLE,
                expression::DEFAULT_LANGUAGE.name,
                &self.default_language,
            )?,
            key: self.key,
            name: self.name,
            context: self.context,
            feature: self.feature,
            translations,
        })
    }
}

impl TranslationRow {
    /// Parsed external identifier.
    pub fn uuid(&self) -> Result<Uuid> {
        parse_uuid(translation::TABLE, &self.uuid)
    }

    /// Convert into a translation record owned by `expression_id`.
    pub fn into_translation(self, expression_id: Uuid) -> Result<Translation> {
        let script = self
            .script
            .as_deref()
            .map(|s| parse_code::<ScriptCode>(translation::TABLE, translation::SCRIPT.name, s))
            .transpose()?;
        let region = self
            .region
            .as_deref()
            .map(|s| parse_code::<RegionCode>(translation::TABLE, translation::REGION.name, s))
            .transpose()?;

        Ok(Translation {
            id: self.uuid()?,
            expression_id,
            language: parse_code::<LanguageCode>(
                translation::TABLE,
                translation::LANGUAGE.name,
                &self.language,
            )?,
            script,
            region,
            value: self.value,
        })
    }
}

fn parse_uuid(table: &'static str, value: &str) -> Result<Uuid> {
    Uuid::parse_str(value).map_err(|_| Error::Conversion {
        table,
        column: "uuid",
        value: value.to_string(),
    })
}

fn parse_code<T: FromStr>(table: &'static str, column: &'static str, value: &str) -> Result<T> {
    value.parse().map_err(|_| Error::Conversion {
        table,
        column,
        value: value.to_string(),
    })
}
