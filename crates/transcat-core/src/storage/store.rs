//! SQLite connection handle.

use std::cell::Cell;
use std::fs;

use rusqlite::{params_from_iter, Connection, OptionalExtension, Row};
use tracing::{info, trace, warn};

use super::stats::{StatementStats, StatsCounter};
use crate::config::CatalogConfig;
use crate::error::{Error, Result};
use crate::schema::Entity;
use crate::sql::{Select, Statement};

/// The catalog's single connection to its database file.
///
/// All statements run synchronously on the calling thread. The connection is
/// closed when the store is dropped.
#[derive(Debug)]
pub struct Store {
    conn: Connection,
    depth: Cell<u32>,
    stats: StatsCounter,
}

impl Store {
    /// Open the database described by `config`.
    ///
    /// File-backed stores create missing parent directories.
    pub fn open(config: &CatalogConfig) -> Result<Self> {
        let conn = if config.temporary {
            Connection::open_in_memory()?
        } else {
            if let Some(parent) = config.path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            Connection::open(&config.path)?
        };

        conn.pragma_update(None, "foreign_keys", config.foreign_keys)?;

        info!(
            path = %config.path.display(),
            temporary = config.temporary,
            foreign_keys = config.foreign_keys,
            "Opened catalog store"
        );

        Ok(Self {
            conn,
            depth: Cell::new(0),
            stats: StatsCounter::default(),
        })
    }

    /// Statement counters since the store was opened.
    pub fn stats(&self) -> StatementStats {
        self.stats.snapshot()
    }

    /// Whether a transaction is open.
    pub fn in_transaction(&self) -> bool {
        self.depth.get() > 0
    }

    /// Run a statement that changes rows. Returns the number of affected rows.
    pub fn execute(&self, statement: &Statement, action: &str) -> Result<usize> {
        trace!(action, sql = %statement.sql, params = statement.params.len(), "execute");
        self.stats.record_write();
        self.conn
            .execute(&statement.sql, params_from_iter(statement.params.iter()))
            .map_err(|source| statement_error(action, &statement.sql, source))
    }

    /// Run schema definition text that takes no parameters.
    pub fn execute_ddl(&self, sql: &str, action: &str) -> Result<()> {
        trace!(action, sql, "execute ddl");
        self.stats.record_write();
        self.conn
            .execute_batch(sql)
            .map_err(|source| statement_error(action, sql, source))
    }

    /// Run a query and decode every row.
    pub fn query<T, F>(&self, statement: &Statement, action: &str, decode: F) -> Result<Vec<T>>
    where
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        trace!(action, sql = %statement.sql, params = statement.params.len(), "query");
        self.stats.record_read();
        let wrap = |source| statement_error(action, &statement.sql, source);

        let mut stmt = self.conn.prepare(&statement.sql).map_err(wrap)?;
        let rows = stmt
            .query_map(params_from_iter(statement.params.iter()), decode)
            .map_err(wrap)?;
        rows.collect::<rusqlite::Result<Vec<T>>>().map_err(wrap)
    }

    /// Run a query and decode the first row, if any.
    pub fn query_one<T, F>(&self, statement: &Statement, action: &str, decode: F) -> Result<Option<T>>
    where
        F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    {
        trace!(action, sql = %statement.sql, params = statement.params.len(), "query one");
        self.stats.record_read();
        self.conn
            .query_row(&statement.sql, params_from_iter(statement.params.iter()), decode)
            .optional()
            .map_err(|source| statement_error(action, &statement.sql, source))
    }

    /// Whether a query returns at least one row.
    pub fn exists(&self, statement: &Statement, action: &str) -> Result<bool> {
        Ok(self.query_one(statement, action, |_| Ok(()))?.is_some())
    }

    /// Select every matching row of an entity table.
    pub fn select<E: Entity>(&self, select: Select, action: &str) -> Result<Vec<E>> {
        self.query(&select.build(), action, E::from_row)
    }

    /// Select the first matching row of an entity table.
    pub fn select_one<E: Entity>(&self, select: Select, action: &str) -> Result<Option<E>> {
        self.query_one(&select.limit(1).build(), action, E::from_row)
    }

    /// Row key assigned by the most recent successful insert.
    pub fn last_insert_rowid(&self) -> i64 {
        self.conn.last_insert_rowid()
    }

    /// Names of the tables present in the database.
    pub fn table_names(&self) -> Result<Vec<String>> {
        let sql = "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name";
        trace!(sql, "query table names");
        self.stats.record_read();
        let wrap = |source| statement_error("list tables", sql, source);

        let mut stmt = self.conn.prepare(sql).map_err(wrap)?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0)).map_err(wrap)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(wrap)
    }

    /// The stored schema version marker (0 when never written).
    pub fn user_version(&self) -> Result<u32> {
        self.stats.record_read();
        self.conn
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .map_err(|source| statement_error("read schema version", "PRAGMA user_version", source))
    }

    /// Write the schema version marker.
    pub fn set_user_version(&self, version: u32) -> Result<()> {
        self.stats.record_write();
        self.conn
            .pragma_update(None, "user_version", version)
            .map_err(|source| statement_error("write schema version", "PRAGMA user_version", source))
    }

    /// Run `f` atomically.
    ///
    /// Each level opens a savepoint, so transactions nest. An error from `f`
    /// rolls back everything done at that level and is returned unchanged.
    pub fn transaction<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Store) -> Result<T>,
    {
        let depth = self.depth.get() + 1;
        let savepoint = format!("transcat_{depth}");

        self.control(&format!("SAVEPOINT {savepoint}"), "begin transaction")?;
        self.depth.set(depth);
        let result = f(self);
        self.depth.set(depth - 1);

        match result {
            Ok(value) => match self.control(&format!("RELEASE {savepoint}"), "commit transaction") {
                Ok(()) => Ok(value),
                Err(err) => {
                    self.rollback(&savepoint);
                    Err(err)
                }
            },
            Err(err) => {
                self.rollback(&savepoint);
                Err(err)
            }
        }
    }

    /// Undo and close `savepoint`. A failure is logged; the caller already
    /// has an error to return.
    fn rollback(&self, savepoint: &str) {
        let sql = format!("ROLLBACK TO {savepoint}; RELEASE {savepoint}");
        if let Err(err) = self.control(&sql, "roll back transaction") {
            warn!(error = %err, savepoint, "Failed to roll back transaction");
        }
    }

    fn control(&self, sql: &str, action: &str) -> Result<()> {
        trace!(action, sql, "transaction control");
        self.conn
            .execute_batch(sql)
            .map_err(|source| statement_error(action, sql, source))
    }
}

fn statement_error(action: &str, sql: &str, source: rusqlite::Error) -> Error {
    Error::Statement {
        action: action.to_string(),
        sql: sql.to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::{Condition, Insert};
    use crate::schema::tables::{self, project};
    use crate::schema::ProjectRow;

    fn store() -> Store {
        let store = Store::open(&CatalogConfig::temporary()).unwrap();
        store.execute_ddl(&tables::PROJECT.create_sql(), "create project").unwrap();
        store
    }

    fn insert(store: &Store, name: &str) -> Result<usize> {
        let statement = Insert::new(&tables::PROJECT)
            .value(project::UUID, name)
            .value(project::NAME, name)
            .build();
        store.execute(&statement, "insert project")
    }

    fn count(store: &Store) -> usize {
        store
            .select::<ProjectRow>(Select::new(&tables::PROJECT), "list projects")
            .unwrap()
            .len()
    }

    #[test]
    fn test_execute_and_select() {
        let store = store();
        insert(&store, "alpha").unwrap();

        let row: ProjectRow = store
            .select_one(
                Select::new(&tables::PROJECT).filter(Condition::eq(project::NAME, "alpha")),
                "find project",
            )
            .unwrap()
            .unwrap();
        assert_eq!(row.id, store.last_insert_rowid());
        assert_eq!(row.uuid, "alpha");
    }

    #[test]
    fn test_statement_errors_carry_sql() {
        let store = store();
        insert(&store, "alpha").unwrap();

        match insert(&store, "alpha") {
            Err(Error::Statement { action, sql, .. }) => {
                assert_eq!(action, "insert project");
                assert!(sql.starts_with("INSERT INTO \"project\""));
            }
            other => panic!("expected statement error, got {other:?}"),
        }
    }

    #[test]
    fn test_transaction_rolls_back_on_error() {
        let store = store();

        let result: Result<()> = store.transaction(|store| {
            insert(store, "alpha")?;
            insert(store, "alpha")?;
            Ok(())
        });

        assert!(result.is_err());
        assert!(!store.in_transaction());
        assert_eq!(count(&store), 0);
    }

    #[test]
    fn test_nested_transaction_rolls_back_inner_level() {
        let store = store();

        store
            .transaction(|store| {
                insert(store, "outer")?;
                let inner: Result<()> = store.transaction(|store| {
                    insert(store, "inner")?;
                    Err(Error::InvalidAction("abort".into()))
                });
                assert!(inner.is_err());
                Ok(())
            })
            .unwrap();

        assert_eq!(count(&store), 1);
    }

    #[test]
    fn test_failed_commit_rolls_back_savepoint() {
        let store = store();
        store
            .execute_ddl(
                "CREATE TABLE note (project_id INTEGER NOT NULL \
                 REFERENCES project (id) DEFERRABLE INITIALLY DEFERRED)",
                "create note",
            )
            .unwrap();
        let orphan = Statement {
            sql: "INSERT INTO note (project_id) VALUES (?)".to_string(),
            params: vec![42i64.into()],
        };

        let result: Result<()> = store.transaction(|store| {
            insert(store, "alpha")?;
            store.execute(&orphan, "insert orphan note")?;
            Ok(())
        });

        match result {
            Err(Error::Statement { action, .. }) => assert_eq!(action, "commit transaction"),
            other => panic!("expected commit error, got {other:?}"),
        }
        assert!(!store.in_transaction());
        assert_eq!(count(&store), 0);

        // The connection is back in autocommit mode.
        insert(&store, "beta").unwrap();
        store.transaction(|_| Ok(())).unwrap();
        assert!(store.conn.is_autocommit());
        assert_eq!(count(&store), 1);
    }

    #[test]
    fn test_stats_count_reads_and_writes() {
        let store = store();
        let before = store.stats();

        insert(&store, "alpha").unwrap();
        count(&store);

        assert_eq!(store.stats().since(before), StatementStats { reads: 1, writes: 1 });
    }

    #[test]
    fn test_user_version() {
        let store = store();
        assert_eq!(store.user_version().unwrap(), 0);
        store.set_user_version(3).unwrap();
        assert_eq!(store.user_version().unwrap(), 3);
        assert_eq!(store.table_names().unwrap(), vec!["project".to_string(), "sqlite_sequence".to_string()]);
    }

    #[test]
    fn test_open_file_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("catalog.sqlite");

        let store = Store::open(&CatalogConfig::new(&path)).unwrap();
        drop(store);
        assert!(path.exists());
    }
}
