//! TOML-declared tables.
//!
//! Tables can be written by hand as [`Table`](crate::table::Table)
//! implementations, or declared in a TOML model file:
//!
//! ```toml
//! [[table]]
//! name = "visits"
//! relation = "visits"
//!
//! [[table.column]]
//! name = "visits"
//! kind = "count"
//!
//! [[table.column]]
//! name = "month"
//! kind = "month"
//! column = "created_at"
//!
//! [[table.column]]
//! name = "country"
//! kind = "string"
//! expression = "country_code"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::model::{Column, Definition, Granularity, TimeColumn};
use crate::sql::Relation;
use crate::table::Table;

/// Error type for model configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("model file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read model file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("failed to parse model file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("table '{table}' column '{column}' is missing required field '{field}'")]
    MissingField {
        table: String,
        column: String,
        field: &'static str,
    },
}

/// Root model configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelConfig {
    #[serde(default, rename = "table")]
    pub tables: Vec<TableConfig>,
}

/// One declared table.
#[derive(Debug, Clone, Deserialize)]
pub struct TableConfig {
    pub name: String,

    /// The physical relation to select from.
    pub relation: String,

    #[serde(default, rename = "column")]
    pub columns: Vec<ColumnConfig>,
}

/// One declared column.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnConfig {
    pub name: String,

    pub kind: ColumnKind,

    /// Expression for scalar kinds (string, integer, float, boolean, sum,
    /// average).
    #[serde(default)]
    pub expression: Option<String>,

    /// Source timestamp column for time kinds, or the mapped column for
    /// `map`.
    #[serde(default)]
    pub column: Option<String>,

    /// Value-to-label mapping for `map` columns.
    #[serde(default)]
    pub map: Option<BTreeMap<String, String>>,

    /// Fallback label for `map` columns.
    #[serde(default)]
    pub default: Option<String>,
}

/// The column constructors reachable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    String,
    Integer,
    Float,
    Boolean,
    Sum,
    Average,
    Count,
    Map,
    Year,
    Month,
    Date,
    Hour,
    Minute,
    Second,
}

impl ModelConfig {
    /// Load a model from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse a model from TOML text.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Build every declared table.
    pub fn build(&self) -> Result<Vec<ConfiguredTable>, ConfigError> {
        self.tables.iter().map(TableConfig::build).collect()
    }
}

impl TableConfig {
    /// Build the declared table.
    pub fn build(&self) -> Result<ConfiguredTable, ConfigError> {
        let columns = self
            .columns
            .iter()
            .map(|column| column.build(&self.name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ConfiguredTable {
            name: self.name.clone(),
            relation: self.relation.clone(),
            columns,
        })
    }
}

impl ColumnConfig {
    fn build(&self, table: &str) -> Result<Column, ConfigError> {
        let missing = |field: &'static str| ConfigError::MissingField {
            table: table.to_string(),
            column: self.name.clone(),
            field,
        };

        let column = match self.kind {
            ColumnKind::String => Column::string(&self.name, self.expression(table)?),
            ColumnKind::Integer => Column::integer(&self.name, self.expression(table)?),
            ColumnKind::Float => Column::float(&self.name, self.expression(table)?),
            ColumnKind::Boolean => Column::boolean(&self.name, self.expression(table)?),
            ColumnKind::Sum => Column::sum(&self.name, self.expression(table)?),
            ColumnKind::Average => Column::average(&self.name, self.expression(table)?),
            ColumnKind::Count => Column::count(&self.name),
            ColumnKind::Map => {
                let source = self.column.as_deref().ok_or_else(|| missing("column"))?;
                let map = self.map.as_ref().ok_or_else(|| missing("map"))?;
                Column::map(&self.name, source, map, self.default.as_deref())
            }
            ColumnKind::Year
            | ColumnKind::Month
            | ColumnKind::Date
            | ColumnKind::Hour
            | ColumnKind::Minute
            | ColumnKind::Second => {
                let source = self.column.as_deref().ok_or_else(|| missing("column"))?;
                TimeColumn::make(self.granularity(), source).into()
            }
        };
        Ok(column)
    }

    fn expression(&self, table: &str) -> Result<String, ConfigError> {
        self.expression
            .clone()
            .ok_or_else(|| ConfigError::MissingField {
                table: table.to_string(),
                column: self.name.clone(),
                field: "expression",
            })
    }

    fn granularity(&self) -> Granularity {
        match self.kind {
            ColumnKind::Year => Granularity::Year,
            ColumnKind::Month => Granularity::Month,
            ColumnKind::Date => Granularity::Date,
            ColumnKind::Hour => Granularity::Hour,
            ColumnKind::Minute => Granularity::Minute,
            // Only reachable from the time kinds matched in build().
            _ => Granularity::Second,
        }
    }
}

/// A table built from configuration: fixed columns over a named relation.
#[derive(Debug, Clone)]
pub struct ConfiguredTable {
    name: String,
    relation: String,
    columns: Vec<Column>,
}

impl Table for ConfiguredTable {
    fn name(&self) -> &str {
        &self.name
    }

    fn columns(&self) -> &[Column] {
        &self.columns
    }

    fn relation(&self, _definition: &Definition) -> Relation {
        Relation::table(&self.relation)
    }
}
