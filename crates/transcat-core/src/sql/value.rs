//! Bound parameter values.

use rusqlite::types::{ToSql, ToSqlOutput};
use transcat_proto::{LanguageCode, RegionCode, ScriptCode, Uuid};

/// A value bound to a positional statement parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// SQL NULL.
    Null,
    /// 64-bit integer.
    Integer(i64),
    /// UTF-8 text.
    Text(String),
}

impl Value {
    /// Whether this is SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::Owned(rusqlite::types::Value::Null),
            Value::Integer(i) => ToSqlOutput::from(*i),
            Value::Text(s) => ToSqlOutput::from(s.as_str()),
        })
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<&LanguageCode> for Value {
    fn from(v: &LanguageCode) -> Self {
        Value::Text(v.as_str().to_string())
    }
}

impl From<ScriptCode> for Value {
    fn from(v: ScriptCode) -> Self {
        Value::Text(v.as_str().to_string())
    }
}

impl From<&RegionCode> for Value {
    fn from(v: &RegionCode) -> Self {
        Value::Text(v.as_str().to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_conversions() {
        assert_eq!(Value::from(4_i64), Value::Integer(4));
        assert_eq!(Value::from("en"), Value::Text("en".into()));
        assert_eq!(Value::from(None::<&str>), Value::Null);
        assert_eq!(Value::from(Some(ScriptCode::Cyrl)), Value::Text("Cyrl".into()));
        assert_eq!(Value::from(Uuid::nil()), Value::Text(Uuid::nil().to_string()));
        assert!(Value::from(None::<i64>).is_null());
    }
}
