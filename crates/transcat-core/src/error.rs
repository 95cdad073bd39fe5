//! Core error types.

use thiserror::Error;
use transcat_proto::{ExpressionId, LocaleError, ProjectId, TranslationId};

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Catalog errors.
#[derive(Debug, Error)]
pub enum Error {
    /// No project with this identifier.
    #[error("unknown project: {0}")]
    UnknownProject(ProjectId),

    /// No expression with this identifier.
    #[error("unknown expression: {0}")]
    UnknownExpression(ExpressionId),

    /// No translation with this identifier.
    #[error("unknown translation: {0}")]
    UnknownTranslation(TranslationId),

    /// No expression with this key.
    #[error("unknown expression key: {0:?}")]
    UnknownExpressionKey(String),

    /// No row with this primary key.
    #[error("no {table} row with primary key {key}")]
    UnknownPrimaryKey {
        /// Table searched.
        table: &'static str,
        /// Row key requested.
        key: i64,
    },

    /// A project with the supplied identifier already exists.
    #[error("project already exists: {0}")]
    ExistingProjectWithId(ProjectId),

    /// An expression with the supplied identifier already exists.
    #[error("expression already exists: {0}")]
    ExistingExpressionWithId(ExpressionId),

    /// An expression with the key already exists.
    #[error("expression key already in use: {0:?}")]
    ExistingExpressionWithKey(String),

    /// A translation with the supplied identifier already exists.
    #[error("translation already exists: {0}")]
    ExistingTranslationWithId(TranslationId),

    /// The query variant cannot be used for this operation.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The update payload is not acceptable.
    #[error("invalid action: {0}")]
    InvalidAction(String),

    /// A stored value could not be decoded.
    #[error("cannot convert {table}.{column} value {value:?}")]
    Conversion {
        /// Table the value came from.
        table: &'static str,
        /// Column the value came from.
        column: &'static str,
        /// The offending stored value.
        value: String,
    },

    /// Requested schema version is behind the stored one.
    #[error("cannot migrate schema backwards from version {stored} to {requested}")]
    MigrationDirection {
        /// Version found in storage.
        stored: u32,
        /// Version requested.
        requested: u32,
    },

    /// No migration path exists for the version.
    #[error("unsupported schema version: {0}")]
    UnsupportedSchemaVersion(u32),

    /// The database rejected a statement.
    #[error("{action} failed: {source} (statement: {sql})")]
    Statement {
        /// What the engine was doing.
        action: String,
        /// Rendered statement text.
        sql: String,
        /// Underlying SQLite error.
        #[source]
        source: rusqlite::Error,
    },

    /// SQLite error outside of a rendered statement.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Locale value supplied by a caller is invalid.
    #[error("locale error: {0}")]
    Locale(#[from] LocaleError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// An identifier or key that does not resolve to a stored row.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::UnknownProject(_)
                | Error::UnknownExpression(_)
                | Error::UnknownTranslation(_)
                | Error::UnknownExpressionKey(_)
                | Error::UnknownPrimaryKey { .. }
        )
    }

    /// A create or update that collides with an existing row.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Error::ExistingProjectWithId(_)
                | Error::ExistingExpressionWithId(_)
                | Error::ExistingExpressionWithKey(_)
                | Error::ExistingTranslationWithId(_)
        )
    }
}
