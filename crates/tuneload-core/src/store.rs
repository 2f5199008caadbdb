//! Store capability: positional statement execution

use duckdb::types::{ToSqlOutput, Value};

use crate::error::StoreError;

/// One positional statement parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    Int(i64),
    Bool(bool),
    Text(String),
    Null,
}

impl From<i64> for Param {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for Param {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for Param {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for Param {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl<T: Into<Param>> From<Option<T>> for Param {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl duckdb::ToSql for Param {
    fn to_sql(&self) -> duckdb::Result<ToSqlOutput<'_>> {
        let value = match self {
            Self::Int(v) => Value::BigInt(*v),
            Self::Bool(v) => Value::Boolean(*v),
            Self::Text(v) => Value::Text(v.clone()),
            Self::Null => Value::Null,
        };
        Ok(ToSqlOutput::Owned(value))
    }
}

/// Anything that can execute a parameterized statement.
///
/// The pipeline never manages connections, transactions, or schema; it only
/// hands finished statements to this capability.
pub trait Store {
    /// Execute `sql` with `params` bound to its `?` placeholders in order.
    /// Returns the number of affected rows.
    fn execute(&mut self, sql: &str, params: &[Param]) -> Result<usize, StoreError>;
}

impl Store for duckdb::Connection {
    fn execute(&mut self, sql: &str, params: &[Param]) -> Result<usize, StoreError> {
        let rows = duckdb::Connection::execute(self, sql, duckdb::params_from_iter(params))?;
        Ok(rows)
    }
}

impl<S: Store + ?Sized> Store for &mut S {
    fn execute(&mut self, sql: &str, params: &[Param]) -> Result<usize, StoreError> {
        (**self).execute(sql, params)
    }
}
