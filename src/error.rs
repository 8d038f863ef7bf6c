//! Engine-level error taxonomy.

use crate::executor::ExecutorError;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, AnalyticsError>;

/// Errors surfaced by the engine and the table query pipeline.
///
/// Executor failures pass through unmodified; the engine adds no retry
/// policy and no partial-success mode.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    /// No registered table's column set covers the definition's columns.
    #[error("the selected dimensions and metrics cannot be queried together")]
    NoCapableTable,

    /// A filter's derived kind is neither basic nor "in".
    #[error("invalid filter type for column '{0}'")]
    InvalidFilterType(String),

    /// A filter value does not fit its operator (e.g. a list with `=`).
    #[error("invalid filter value for column '{column}'")]
    InvalidFilterValue { column: String },

    /// A basic filter used an operator outside the supported set.
    #[error("unsupported filter operator '{0}'")]
    UnsupportedOperator(String),

    /// A definition referenced a column the table does not declare.
    #[error("table '{table}' has no column named '{column}'")]
    UnknownColumn { table: String, column: String },

    /// The query executor failed.
    #[error(transparent)]
    Executor(#[from] ExecutorError),
}
