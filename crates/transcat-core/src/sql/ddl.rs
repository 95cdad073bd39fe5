//! Schema definition statements.

use crate::schema::{ColumnDef, IndexDef, TableDef};

impl TableDef {
    /// `CREATE TABLE IF NOT EXISTS` for every column of the table.
    pub fn create_sql(&self) -> String {
        let columns: Vec<String> = self.columns.iter().map(ColumnDef::definition_sql).collect();
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            self.quoted(),
            columns.join(", ")
        )
    }
}

impl ColumnDef {
    /// `ALTER TABLE ... ADD COLUMN` for this column.
    pub fn add_column_sql(&self) -> String {
        format!(
            "ALTER TABLE \"{}\" ADD COLUMN {}",
            self.table,
            self.definition_sql()
        )
    }
}

impl IndexDef {
    /// `CREATE INDEX IF NOT EXISTS` for the index.
    pub fn create_sql(&self) -> String {
        let columns: Vec<String> = self.columns.iter().map(ColumnDef::quoted).collect();
        format!(
            "CREATE INDEX IF NOT EXISTS \"{}\" ON \"{}\" ({})",
            self.name,
            self.table,
            columns.join(", ")
        )
    }
}
