//! WHERE clause conditions.

use super::value::Value;
use crate::schema::ColumnDef;

/// A filter over qualified columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Column equals value. A NULL value renders as `IS NULL`.
    Eq(ColumnDef, Value),
    /// Column is NULL.
    IsNull(ColumnDef),
    /// Column matches a LIKE pattern using `\` as the escape character.
    Like(ColumnDef, String),
    /// Every condition holds. Empty means no constraint.
    And(Vec<Condition>),
}

impl Condition {
    /// Column equals value.
    pub fn eq(column: ColumnDef, value: impl Into<Value>) -> Self {
        Condition::Eq(column, value.into())
    }

    /// Exact match on an optional value: `None` only matches NULL.
    pub fn optional_eq<V: Into<Value>>(column: ColumnDef, value: Option<V>) -> Self {
        Condition::Eq(column, Value::from(value))
    }

    /// Wildcard match on an optional value: `None` leaves the column unconstrained.
    pub fn when<V: Into<Value>>(column: ColumnDef, value: Option<V>) -> Self {
        match value {
            Some(v) => Condition::eq(column, v),
            None => Condition::And(Vec::new()),
        }
    }

    /// Column contains the text as a literal substring.
    pub fn contains(column: ColumnDef, text: &str) -> Self {
        let mut pattern = String::with_capacity(text.len() + 2);
        pattern.push('%');
        for c in text.chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        Condition::Like(column, pattern)
    }

    /// Conjunction of conditions.
    pub fn and(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Condition::And(conditions.into_iter().collect())
    }

    /// Whether this condition constrains nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            Condition::And(conditions) => conditions.iter().all(Condition::is_empty),
            _ => false,
        }
    }

    /// Render the condition, pushing bound values onto `params`.
    ///
    /// Returns `None` when the condition constrains nothing.
    pub(crate) fn render(&self, params: &mut Vec<Value>) -> Option<String> {
        match self {
            Condition::Eq(column, Value::Null) | Condition::IsNull(column) => {
                Some(format!("{} IS NULL", column.qualified()))
            }
            Condition::Eq(column, value) => {
                params.push(value.clone());
                Some(format!("{} = ?{}", column.qualified(), params.len()))
            }
            Condition::Like(column, pattern) => {
                params.push(Value::Text(pattern.clone()));
                Some(format!("{} LIKE ?{} ESCAPE '\\'", column.qualified(), params.len()))
            }
            Condition::And(conditions) => {
                let parts: Vec<String> = conditions.iter().filter_map(|c| c.render(params)).collect();
                if parts.is_empty() {
                    None
                } else {
                    Some(parts.join(" AND "))
                }
            }
        }
    }
}

impl From<Vec<Condition>> for Condition {
    fn from(conditions: Vec<Condition>) -> Self {
        Condition::And(conditions)
    }
}
