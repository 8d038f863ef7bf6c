//! Query execution: the boundary between compiled statements and a database.
//!
//! The engine is written against the [`QueryExecutor`] trait; the crate
//! ships one implementation backed by an embedded SQLite connection.
//! Executor failures pass through the pipeline unmodified - no retries.

use std::collections::HashMap;

use rusqlite::types::{ToSqlOutput, ValueRef};
use rusqlite::{Connection, ToSql};

use crate::sql::Statement;
use crate::value::Value;

/// One raw result row, keyed by select alias (`dimension_0`, `metric_0`, ...).
pub type Row = HashMap<String, Value>;

/// Errors raised while executing a compiled statement.
#[derive(Debug, thiserror::Error)]
pub enum ExecutorError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Escape hatch for executors backed by something other than SQLite.
    #[error("query backend error: {0}")]
    Backend(String),
}

/// Executes compiled statements and returns raw rows.
pub trait QueryExecutor {
    fn execute(&self, statement: &Statement) -> Result<Vec<Row>, ExecutorError>;
}

/// A [`QueryExecutor`] backed by a rusqlite connection.
pub struct SqliteExecutor {
    conn: Connection,
}

impl SqliteExecutor {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Open an executor over an in-memory database.
    pub fn in_memory() -> Result<Self, ExecutorError> {
        Ok(Self::new(Connection::open_in_memory()?))
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl QueryExecutor for SqliteExecutor {
    fn execute(&self, statement: &Statement) -> Result<Vec<Row>, ExecutorError> {
        let mut stmt = self.conn.prepare(&statement.sql)?;
        let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let mut rows = stmt.query(rusqlite::params_from_iter(statement.params.iter()))?;
        let mut data = Vec::new();
        while let Some(row) = rows.next()? {
            let mut record = Row::with_capacity(names.len());
            for (i, name) in names.iter().enumerate() {
                record.insert(name.clone(), value_from_sql(row.get_ref(i)?));
            }
            data.push(record);
        }

        tracing::debug!(sql = %statement.sql, rows = data.len(), "executed statement");
        Ok(data)
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::Owned(rusqlite::types::Value::Null),
            Value::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            Value::Integer(n) => ToSqlOutput::Owned(rusqlite::types::Value::Integer(*n)),
            Value::Float(f) => ToSqlOutput::Owned(rusqlite::types::Value::Real(*f)),
            Value::Boolean(b) => ToSqlOutput::Owned(rusqlite::types::Value::Integer(*b as i64)),
        })
    }
}

fn value_from_sql(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(n) => Value::Integer(n),
        ValueRef::Real(f) => Value::Float(f),
        ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Value::Text(String::from_utf8_lossy(b).into_owned()),
    }
}
