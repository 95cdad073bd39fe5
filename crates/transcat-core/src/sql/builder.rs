//! Statement builders.
//!
//! Each builder starts from a static [`TableDef`] and renders a [`Statement`]
//! with `?N` placeholders. Names are always quoted; values are always bound.

use super::condition::Condition;
use super::value::Value;
use crate::schema::{ColumnDef, TableDef};

/// Rendered SQL text with its bound values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// SQL text.
    pub sql: String,
    /// Values for `?1`, `?2`, ...
    pub params: Vec<Value>,
}

fn push_filter(sql: &mut String, filter: &Option<Condition>, params: &mut Vec<Value>) {
    if let Some(clause) = filter.as_ref().and_then(|f| f.render(params)) {
        sql.push_str(" WHERE ");
        sql.push_str(&clause);
    }
}

fn merge_filter(current: Option<Condition>, condition: Condition) -> Option<Condition> {
    Some(match current {
        None => condition,
        Some(Condition::And(mut conditions)) => {
            conditions.push(condition);
            Condition::And(conditions)
        }
        Some(existing) => Condition::And(vec![existing, condition]),
    })
}

#[derive(Debug, Clone)]
struct Join {
    table: &'static TableDef,
    left: ColumnDef,
    right: ColumnDef,
}

/// A SELECT over one table, optionally joined to another.
#[derive(Debug, Clone)]
pub struct Select {
    table: &'static TableDef,
    columns: Vec<ColumnDef>,
    distinct: bool,
    join: Option<Join>,
    filter: Option<Condition>,
    order_by: Vec<ColumnDef>,
    limit: Option<u32>,
}

impl Select {
    /// Select every column of `table`, in definition order.
    pub fn new(table: &'static TableDef) -> Self {
        Self {
            table,
            columns: table.columns.to_vec(),
            distinct: false,
            join: None,
            filter: None,
            order_by: Vec::new(),
            limit: None,
        }
    }

    /// Select only these columns.
    pub fn only(mut self, columns: &[ColumnDef]) -> Self {
        self.columns = columns.to_vec();
        self
    }

    /// Drop duplicate result rows.
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Inner join `table` on `left = right`.
    pub fn join(mut self, table: &'static TableDef, left: ColumnDef, right: ColumnDef) -> Self {
        self.join = Some(Join { table, left, right });
        self
    }

    /// Add a condition. Repeated calls are combined with AND.
    pub fn filter(mut self, condition: Condition) -> Self {
        self.filter = merge_filter(self.filter.take(), condition);
        self
    }

    /// Order ascending by a column. Repeated calls add tie-breakers.
    pub fn order_by(mut self, column: ColumnDef) -> Self {
        self.order_by.push(column);
        self
    }

    /// Return at most `limit` rows.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Render the statement.
    pub fn build(&self) -> Statement {
        let mut params = Vec::new();
        let columns: Vec<String> = self.columns.iter().map(ColumnDef::qualified).collect();

        let mut sql = String::from("SELECT ");
        if self.distinct {
            sql.push_str("DISTINCT ");
        }
        sql.push_str(&columns.join(", "));
        sql.push_str(" FROM ");
        sql.push_str(&self.table.quoted());

        if let Some(join) = &self.join {
            sql.push_str(&format!(
                " INNER JOIN {} ON {} = {}",
                join.table.quoted(),
                join.left.qualified(),
                join.right.qualified()
            ));
        }

        push_filter(&mut sql, &self.filter, &mut params);

        if !self.order_by.is_empty() {
            let order: Vec<String> = self.order_by.iter().map(ColumnDef::qualified).collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&order.join(", "));
        }

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        Statement { sql, params }
    }
}

/// An INSERT of a single row.
#[derive(Debug, Clone)]
pub struct Insert {
    table: &'static TableDef,
    values: Vec<(ColumnDef, Value)>,
}

impl Insert {
    /// Insert into `table`.
    pub fn new(table: &'static TableDef) -> Self {
        Self {
            table,
            values: Vec::new(),
        }
    }

    /// Set a column value.
    pub fn value(mut self, column: ColumnDef, value: impl Into<Value>) -> Self {
        self.values.push((column, value.into()));
        self
    }

    /// Render the statement.
    pub fn build(&self) -> Statement {
        let columns: Vec<String> = self.values.iter().map(|(c, _)| c.quoted()).collect();
        let placeholders: Vec<String> = (1..=self.values.len()).map(|i| format!("?{i}")).collect();

        Statement {
            sql: format!(
                "INSERT INTO {} ({}) VALUES ({})",
                self.table.quoted(),
                columns.join(", "),
                placeholders.join(", ")
            ),
            params: self.values.iter().map(|(_, v)| v.clone()).collect(),
        }
    }
}

/// An UPDATE of one or more columns.
#[derive(Debug, Clone)]
pub struct Update {
    table: &'static TableDef,
    assignments: Vec<(ColumnDef, Value)>,
    filter: Option<Condition>,
}

impl Update {
    /// Update rows of `table`.
    pub fn new(table: &'static TableDef) -> Self {
        Self {
            table,
            assignments: Vec::new(),
            filter: None,
        }
    }

    /// Assign a column.
    pub fn set(mut self, column: ColumnDef, value: impl Into<Value>) -> Self {
        self.assignments.push((column, value.into()));
        self
    }

    /// Add a condition. Repeated calls are combined with AND.
    pub fn filter(mut self, condition: Condition) -> Self {
        self.filter = merge_filter(self.filter.take(), condition);
        self
    }

    /// Render the statement.
    pub fn build(&self) -> Statement {
        let mut params = Vec::with_capacity(self.assignments.len());
        let assignments: Vec<String> = self
            .assignments
            .iter()
            .map(|(column, value)| {
                params.push(value.clone());
                format!("{} = ?{}", column.quoted(), params.len())
            })
            .collect();

        let mut sql = format!("UPDATE {} SET {}", self.table.quoted(), assignments.join(", "));
        push_filter(&mut sql, &self.filter, &mut params);

        Statement { sql, params }
    }
}

/// A DELETE of matching rows.
#[derive(Debug, Clone)]
pub struct Delete {
    table: &'static TableDef,
    filter: Option<Condition>,
}

impl Delete {
    /// Delete rows of `table`.
    pub fn new(table: &'static TableDef) -> Self {
        Self { table, filter: None }
    }

    /// Add a condition. Repeated calls are combined with AND.
    pub fn filter(mut self, condition: Condition) -> Self {
        self.filter = merge_filter(self.filter.take(), condition);
        self
    }

    /// Render the statement.
    pub fn build(&self) -> Statement {
        let mut params = Vec::new();
        let mut sql = format!("DELETE FROM {}", self.table.quoted());
        push_filter(&mut sql, &self.filter, &mut params);
        Statement { sql, params }
    }
}
