//! Table, column, and index definitions.

/// Storage class of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// 64-bit signed integer.
    Integer,
    /// UTF-8 text.
    Text,
}

impl DataType {
    /// SQL type name.
    pub fn sql_name(&self) -> &'static str {
        match self {
            DataType::Integer => "INTEGER",
            DataType::Text => "TEXT",
        }
    }
}

/// A column definition.
///
/// Columns carry their table name so a definition doubles as a qualified
/// column reference in statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    /// Owning table.
    pub table: &'static str,
    /// Column name.
    pub name: &'static str,
    /// Storage class.
    pub data_type: DataType,
    /// Whether NULL is rejected.
    pub not_null: bool,
    /// Auto-incrementing integer primary key.
    pub primary_key: bool,
    /// Whether values must be unique.
    pub unique: bool,
    /// Foreign key target as `(table, column)`.
    pub references: Option<(&'static str, &'static str)>,
}

impl ColumnDef {
    /// A nullable integer column.
    pub const fn integer(table: &'static str, name: &'static str) -> Self {
        Self::new(table, name, DataType::Integer)
    }

    /// A nullable text column.
    pub const fn text(table: &'static str, name: &'static str) -> Self {
        Self::new(table, name, DataType::Text)
    }

    const fn new(table: &'static str, name: &'static str, data_type: DataType) -> Self {
        Self {
            table,
            name,
            data_type,
            not_null: false,
            primary_key: false,
            unique: false,
            references: None,
        }
    }

    /// Reject NULL.
    pub const fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// Mark as the auto-incrementing primary key.
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.not_null = true;
        self
    }

    /// Require unique values.
    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Reference another table's column.
    pub const fn references(mut self, column: ColumnDef) -> Self {
        self.references = Some((column.table, column.name));
        self
    }

    /// `"table"."column"`.
    pub fn qualified(&self) -> String {
        format!("\"{}\".\"{}\"", self.table, self.name)
    }

    /// `"column"`.
    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.name)
    }

    /// Column definition clause for CREATE TABLE and ALTER TABLE.
    pub fn definition_sql(&self) -> String {
        let mut sql = format!("{} {}", self.quoted(), self.data_type.sql_name());
        if self.primary_key {
            sql.push_str(" PRIMARY KEY AUTOINCREMENT");
        }
        if self.not_null {
            sql.push_str(" NOT NULL");
        }
        if self.unique {
            sql.push_str(" UNIQUE");
        }
        if let Some((table, column)) = self.references {
            sql.push_str(&format!(" REFERENCES \"{table}\" (\"{column}\")"));
        }
        sql
    }
}

/// A table definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableDef {
    /// Table name.
    pub name: &'static str,
    /// Columns in select order.
    pub columns: &'static [ColumnDef],
}

impl TableDef {
    /// Create a table definition.
    pub const fn new(name: &'static str, columns: &'static [ColumnDef]) -> Self {
        Self { name, columns }
    }

    /// `"table"`.
    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.name)
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get the primary key column.
    pub fn primary_key(&self) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.primary_key)
    }
}

/// A secondary index definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexDef {
    /// Index name.
    pub name: &'static str,
    /// Indexed table.
    pub table: &'static str,
    /// Indexed columns.
    pub columns: &'static [ColumnDef],
}

impl IndexDef {
    /// Create an index definition.
    pub const fn new(name: &'static str, table: &'static str, columns: &'static [ColumnDef]) -> Self {
        Self {
            name,
            table,
            columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARENT_ID: ColumnDef = ColumnDef::integer("parent", "id").primary_key();
    const CHILD_PARENT: ColumnDef = ColumnDef::integer("child", "parent_id")
        .not_null()
        .references(PARENT_ID);

    #[test]
    fn test_column_definition_sql() {
        assert_eq!(
            PARENT_ID.definition_sql(),
            "\"id\" INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL"
        );
        assert_eq!(
            CHILD_PARENT.definition_sql(),
            "\"parent_id\" INTEGER NOT NULL REFERENCES \"parent\" (\"id\")"
        );
        assert_eq!(ColumnDef::text("child", "note").definition_sql(), "\"note\" TEXT");
    }

    #[test]
    fn test_table_lookup() {
        static CHILD: TableDef = TableDef::new("child", &[CHILD_PARENT]);

        assert!(CHILD.column("parent_id").is_some());
        assert!(CHILD.column("missing").is_none());
        assert!(CHILD.primary_key().is_none());
        assert_eq!(CHILD_PARENT.qualified(), "\"child\".\"parent_id\"");
    }
}
