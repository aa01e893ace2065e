#![forbid(unsafe_code)]

use super::StoreError;
use rusqlite::ToSql;
use rusqlite::types::{ToSqlOutput, Value, ValueRef};
use std::collections::BTreeMap;

/// Dynamically typed scalar exchanged with the row store.
#[derive(Clone, Debug, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    /// Raw bytes, including TEXT cells that are not valid UTF-8.
    Blob(Vec<u8>),
}

impl SqlValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Integer(_) => "integer",
            Self::Real(_) => "real",
            Self::Text(_) => "text",
            Self::Blob(_) => "blob",
        }
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<Vec<u8>> for SqlValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Blob(value)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl ToSql for SqlValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Self::Null => ToSqlOutput::Owned(Value::Null),
            Self::Integer(v) => ToSqlOutput::Owned(Value::Integer(*v)),
            Self::Real(v) => ToSqlOutput::Owned(Value::Real(*v)),
            Self::Text(v) => ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes())),
            Self::Blob(v) => ToSqlOutput::Borrowed(ValueRef::Blob(v)),
        })
    }
}

impl SqlValue {
    pub(crate) fn from_value_ref(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => Self::Null,
            ValueRef::Integer(v) => Self::Integer(v),
            ValueRef::Real(v) => Self::Real(v),
            ValueRef::Text(bytes) => match std::str::from_utf8(bytes) {
                Ok(text) => Self::Text(text.to_string()),
                Err(_) => Self::Blob(bytes.to_vec()),
            },
            ValueRef::Blob(bytes) => Self::Blob(bytes.to_vec()),
        }
    }
}

/// Builds a positional parameter list: `sql_params!["a", 1i64]`.
#[macro_export]
macro_rules! sql_params {
    () => {
        ::std::vec::Vec::<$crate::SqlValue>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::SqlValue::from($value)),+]
    };
}

/// One result row keyed by column name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    columns: BTreeMap<String, SqlValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<SqlValue>) {
        self.columns.insert(column.into(), value.into());
    }

    fn required(&self, column: &str) -> Result<&SqlValue, StoreError> {
        self.columns
            .get(column)
            .ok_or_else(|| StoreError::MissingColumn(column.to_string()))
    }

    pub fn text(&self, column: &str) -> Result<String, StoreError> {
        match self.required(column)? {
            SqlValue::Text(v) => Ok(v.clone()),
            other => Err(mismatch(column, "text", other)),
        }
    }

    /// Absent columns and NULL both read as `None`.
    pub fn opt_text(&self, column: &str) -> Result<Option<String>, StoreError> {
        match self.columns.get(column) {
            None | Some(SqlValue::Null) => Ok(None),
            Some(SqlValue::Text(v)) => Ok(Some(v.clone())),
            Some(other) => Err(mismatch(column, "text", other)),
        }
    }

    pub fn integer(&self, column: &str) -> Result<i64, StoreError> {
        match self.required(column)? {
            SqlValue::Integer(v) => Ok(*v),
            other => Err(mismatch(column, "integer", other)),
        }
    }

    /// Integers widen to reals; SQLite returns whole REAL values as INTEGER affinity.
    pub fn opt_real(&self, column: &str) -> Result<Option<f64>, StoreError> {
        match self.columns.get(column) {
            None | Some(SqlValue::Null) => Ok(None),
            Some(SqlValue::Real(v)) => Ok(Some(*v)),
            Some(SqlValue::Integer(v)) => Ok(Some(*v as f64)),
            Some(other) => Err(mismatch(column, "real", other)),
        }
    }
}

fn mismatch(column: &str, expected: &'static str, found: &SqlValue) -> StoreError {
    StoreError::TypeMismatch {
        column: column.to_string(),
        expected,
        found: found.type_name(),
    }
}
