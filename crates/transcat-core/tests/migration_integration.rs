//! Integration tests for opening and migrating catalog files.

use std::path::Path;

use rusqlite::Connection;
use transcat_core::{Catalog, CatalogConfig, SchemaManager, Store, CURRENT_SCHEMA_VERSION};
use transcat_proto::{ExpressionUpdate, LocaleResolution, TranslationQuery};

const V1_SCHEMA: &str = "
    CREATE TABLE project (id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL, uuid TEXT NOT NULL UNIQUE, name TEXT NOT NULL);
    CREATE TABLE expression (id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL, uuid TEXT NOT NULL UNIQUE, key TEXT NOT NULL UNIQUE, name TEXT NOT NULL, default_language TEXT NOT NULL, context TEXT);
    CREATE TABLE translation (id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL, uuid TEXT NOT NULL UNIQUE, expression_id INTEGER NOT NULL REFERENCES expression (id), language_code TEXT NOT NULL, region_code TEXT, value TEXT NOT NULL);
    CREATE TABLE project_expression (project_id INTEGER NOT NULL REFERENCES project (id), expression_id INTEGER NOT NULL REFERENCES expression (id));
";

const EXPRESSION_UUID: &str = "6f1c2a9e-3b4d-4c5e-8f70-112233445566";
const TRANSLATION_UUID: &str = "0a9b8c7d-6e5f-4a3b-9c2d-665544332211";

fn create_v1_catalog(path: &Path) {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(V1_SCHEMA).unwrap();
    conn.execute(
        "INSERT INTO expression (uuid, key, name, default_language, context) VALUES (?1, 'greeting', 'Greeting', 'en', NULL)",
        [EXPRESSION_UUID],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO translation (uuid, expression_id, language_code, region_code, value) VALUES (?1, 1, 'en', NULL, 'Hello')",
        [TRANSLATION_UUID],
    )
    .unwrap();
}

fn column_names(path: &Path, table: &str) -> Vec<String> {
    let conn = Connection::open(path).unwrap();
    let mut stmt = conn
        .prepare(&format!("SELECT name FROM pragma_table_info('{table}')"))
        .unwrap();
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .unwrap()
        .collect::<rusqlite::Result<Vec<_>>>()
        .unwrap();
    names
}

#[test]
fn test_fresh_catalog_created_at_current_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fresh.sqlite");

    let catalog = Catalog::open(CatalogConfig::new(&path)).unwrap();
    assert_eq!(catalog.schema_version().unwrap(), CURRENT_SCHEMA_VERSION);
    drop(catalog);

    assert!(column_names(&path, "expression").contains(&"feature".to_string()));
    assert!(column_names(&path, "translation").contains(&"script_code".to_string()));
}

#[test]
fn test_legacy_catalog_advances_one_step() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.sqlite");
    create_v1_catalog(&path);

    let store = Store::open(&CatalogConfig::new(&path)).unwrap();
    let manager = SchemaManager::new(&store);
    assert_eq!(manager.stored_version().unwrap(), 1);

    manager.migrate(2).unwrap();
    assert_eq!(manager.stored_version().unwrap(), 2);
    drop(store);

    assert!(column_names(&path, "expression").contains(&"feature".to_string()));
    assert!(!column_names(&path, "translation").contains(&"script_code".to_string()));
}

#[test]
fn test_legacy_catalog_opens_with_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.sqlite");
    create_v1_catalog(&path);

    let catalog = Catalog::open(CatalogConfig::new(&path)).unwrap();
    assert_eq!(catalog.schema_version().unwrap(), CURRENT_SCHEMA_VERSION);

    let expressions = catalog.expressions().unwrap();
    assert_eq!(expressions.len(), 1);
    assert_eq!(expressions[0].id.to_string(), EXPRESSION_UUID);
    assert_eq!(expressions[0].feature, None);

    let translations = catalog
        .translations_matching(&TranslationQuery::ExpressionId(expressions[0].id))
        .unwrap();
    assert_eq!(translations.len(), 1);
    assert_eq!(translations[0].id.to_string(), TRANSLATION_UUID);
    assert_eq!(translations[0].script, None);

    catalog
        .update_expression(expressions[0].id, ExpressionUpdate::Feature(Some("home".into())))
        .unwrap();
    assert_eq!(
        catalog.expression(expressions[0].id).unwrap().feature.as_deref(),
        Some("home")
    );

    let resolved = catalog
        .resolve(&LocaleResolution::new("en_AU".parse().unwrap()))
        .unwrap();
    assert_eq!(resolved[0].translations[0].value, "Hello");
}

#[test]
fn test_reopen_performs_no_schema_change() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.sqlite");
    create_v1_catalog(&path);

    drop(Catalog::open(CatalogConfig::new(&path)).unwrap());

    let catalog = Catalog::open(CatalogConfig::new(&path)).unwrap();
    assert_eq!(catalog.statement_stats().writes, 0);
    assert_eq!(catalog.schema_version().unwrap(), CURRENT_SCHEMA_VERSION);
}

#[test]
fn test_interrupted_migration_resumes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.sqlite");
    create_v1_catalog(&path);

    {
        let store = Store::open(&CatalogConfig::new(&path)).unwrap();
        SchemaManager::new(&store).migrate(2).unwrap();
    }

    let catalog = Catalog::open(CatalogConfig::new(&path)).unwrap();
    assert_eq!(catalog.schema_version().unwrap(), CURRENT_SCHEMA_VERSION);
    drop(catalog);

    let translation_columns = column_names(&path, "translation");
    assert_eq!(
        translation_columns.iter().filter(|c| *c == "script_code").count(),
        1
    );
}

#[test]
fn test_newer_catalog_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite");
    create_v1_catalog(&path);
    Connection::open(&path)
        .unwrap()
        .pragma_update(None, "user_version", CURRENT_SCHEMA_VERSION + 1)
        .unwrap();

    let err = Catalog::open(CatalogConfig::new(&path)).err().unwrap();
    assert!(matches!(
        err,
        transcat_core::Error::MigrationDirection {
            stored: 4,
            requested: 3
        }
    ));
}
