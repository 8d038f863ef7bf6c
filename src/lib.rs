//! # Tally
//!
//! A declarative analytics engine that compiles metric definitions to
//! aggregate SQL.
//!
//! ## Architecture
//!
//! Callers describe *what* they want - metrics, dimensions, filters,
//! orderings - and the engine works out how to get it:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │              Definition (metrics, dimensions,            │
//! │                  filters, orderings, period)             │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [engine: per-metric capability]
//! ┌─────────────────────────────────────────────────────────┐
//! │        Table(s) selected from the TableFactory           │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [table: compile]
//! ┌─────────────────────────────────────────────────────────┐
//! │        Statement (SELECT ... GROUP BY ... + params)      │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [executor]
//! ┌─────────────────────────────────────────────────────────┐
//! │      raw rows → default-fill → merge → format            │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [results]
//! ┌─────────────────────────────────────────────────────────┐
//! │          Sheet (dimension-keyed, pivoted records)        │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use tally::prelude::*;
//!
//! # fn main() -> tally::error::Result<()> {
//! let config = tally::config::ModelConfig::from_file("model.toml").unwrap();
//! let mut tables = TableFactory::new();
//! for table in config.build().unwrap() {
//!     tables.register(table);
//! }
//!
//! let executor = SqliteExecutor::in_memory()?;
//! let engine = Engine::new(tables, Box::new(executor));
//!
//! let definition = Definition::new(["visits"])
//!     .add_dimension("month")
//!     .add_filter(Filter::new("country", "=", "dk"));
//! let sheet = engine.run(&definition)?;
//! let records = sheet.to_records();
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod executor;
pub mod factory;
pub mod model;
pub mod periods;
pub mod results;
pub mod sql;
pub mod table;
pub mod value;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::engine::Engine;
    pub use crate::error::{AnalyticsError, Result};
    pub use crate::executor::{QueryExecutor, Row, SqliteExecutor};
    pub use crate::factory::TableFactory;
    pub use crate::model::{
        Column, Definition, Filter, FilterKind, FilterValue, Format, Granularity, Ordering,
        Period, ScalarColumn, SortDirection, TimeColumn,
    };
    pub use crate::results::{Cell, Record, Sheet};
    pub use crate::sql::{Query, Relation, Statement};
    pub use crate::table::Table;
    pub use crate::value::Value;
}

// Also export the primary surface at the crate root for convenience
pub use engine::Engine;
pub use error::AnalyticsError;
pub use factory::TableFactory;
pub use model::{Column, Definition, Filter, Ordering};
pub use results::Sheet;
pub use table::Table;
pub use value::Value;
