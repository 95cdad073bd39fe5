//! Catalog table definitions at the current schema version.

use super::table::{ColumnDef, IndexDef, TableDef};

/// Columns of the `project` table.
pub mod project {
    use super::ColumnDef;

    /// Table name.
    pub const TABLE: &str = "project";
    /// Row key.
    pub const ID: ColumnDef = ColumnDef::integer(TABLE, "id").primary_key();
    /// External identifier.
    pub const UUID: ColumnDef = ColumnDef::text(TABLE, "uuid").not_null().unique();
    /// Project name.
    pub const NAME: ColumnDef = ColumnDef::text(TABLE, "name").not_null();
}

/// Columns of the `expression` table.
pub mod expression {
    use super::ColumnDef;

    /// Table name.
    pub const TABLE: &str = "expression";
    /// Row key.
    pub const ID: ColumnDef = ColumnDef::integer(TABLE, "id").primary_key();
    /// External identifier.
    pub const UUID: ColumnDef = ColumnDef::text(TABLE, "uuid").not_null().unique();
    /// Unique lookup key.
    pub const KEY: ColumnDef = ColumnDef::text(TABLE, "key").not_null().unique();
    /// Human-readable name.
    pub const NAME: ColumnDef = ColumnDef::text(TABLE, "name").not_null();
    /// Default language code.
    pub const DEFAULT_LANGUAGE: ColumnDef = ColumnDef::text(TABLE, "default_language").not_null();
    /// Translator context.
    pub const CONTEXT: ColumnDef = ColumnDef::text(TABLE, "context");
    /// Feature tag (added in schema version 2).
    pub const FEATURE: ColumnDef = ColumnDef::text(TABLE, "feature");
}

/// Columns of the `translation` table.
pub mod translation {
    use super::ColumnDef;

    /// Table name.
    pub const TABLE: &str = "translation";
    /// Row key.
    pub const ID: ColumnDef = ColumnDef::integer(TABLE, "id").primary_key();
    /// External identifier.
    pub const UUID: ColumnDef = ColumnDef::text(TABLE, "uuid").not_null().unique();
    /// Owning expression row key.
    pub const EXPRESSION_ID: ColumnDef = ColumnDef::integer(TABLE, "expression_id")
        .not_null()
        .references(super::expression::ID);
    /// Language code.
    pub const LANGUAGE: ColumnDef = ColumnDef::text(TABLE, "language_code").not_null();
    /// Script code (added in schema version 3).
    pub const SCRIPT: ColumnDef = ColumnDef::text(TABLE, "script_code");
    /// Region code.
    pub const REGION: ColumnDef = ColumnDef::text(TABLE, "region_code");
    /// Translated text.
    pub const VALUE: ColumnDef = ColumnDef::text(TABLE, "value").not_null();
}

/// Columns of the `project_expression` link table.
pub mod project_expression {
    use super::ColumnDef;

    /// Table name.
    pub const TABLE: &str = "project_expression";
    /// Linked project row key.
    pub const PROJECT_ID: ColumnDef = ColumnDef::integer(TABLE, "project_id")
        .not_null()
        .references(super::project::ID);
    /// Linked expression row key.
    pub const EXPRESSION_ID: ColumnDef = ColumnDef::integer(TABLE, "expression_id")
        .not_null()
        .references(super::expression::ID);
}

/// The `project` table.
pub static PROJECT: TableDef = TableDef::new(project::TABLE, &[project::ID, project::UUID, project::NAME]);

/// The `expression` table.
pub static EXPRESSION: TableDef = TableDef::new(
    expression::TABLE,
    &[
        expression::ID,
        expression::UUID,
        expression::KEY,
        expression::NAME,
        expression::DEFAULT_LANGUAGE,
        expression::CONTEXT,
        expression::FEATURE,
    ],
);

/// The `translation` table.
pub static TRANSLATION: TableDef = TableDef::new(
    translation::TABLE,
    &[
        translation::ID,
        translation::UUID,
        translation::EXPRESSION_ID,
        translation::LANGUAGE,
        translation::SCRIPT,
        translation::REGION,
        translation::VALUE,
    ],
);

/// The `project_expression` link table.
pub static PROJECT_EXPRESSION: TableDef = TableDef::new(
    project_expression::TABLE,
    &[project_expression::PROJECT_ID, project_expression::EXPRESSION_ID],
);

/// Lookup index for the translations of an expression (added in schema version 3).
pub static TRANSLATION_EXPRESSION_INDEX: IndexDef = IndexDef::new(
    "translation_expression_idx",
    translation::TABLE,
    &[translation::EXPRESSION_ID],
);

/// Every catalog table, in creation order.
pub static ALL_TABLES: [&TableDef; 4] = [&PROJECT, &EXPRESSION, &TRANSLATION, &PROJECT_EXPRESSION];

/// Every catalog index.
pub static ALL_INDEXES: [&IndexDef; 1] = [&TRANSLATION_EXPRESSION_INDEX];
