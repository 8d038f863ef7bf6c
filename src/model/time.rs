//! Time columns: timestamp attributes bucketed at a fixed granularity.

use serde::{Deserialize, Serialize};

use crate::model::definition::Definition;
use crate::periods;

/// Bucket granularity for a time column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Year,
    Month,
    Date,
    Hour,
    Minute,
    Second,
}

impl Granularity {
    /// The column name a time column of this granularity exposes.
    pub fn token(&self) -> &'static str {
        match self {
            Granularity::Year => "year",
            Granularity::Month => "month",
            Granularity::Date => "date",
            Granularity::Hour => "hour",
            Granularity::Minute => "minute",
            Granularity::Second => "second",
        }
    }

    /// The `strftime` pattern applied to the timestamp in SQL.
    pub fn sql_pattern(&self) -> &'static str {
        match self {
            Granularity::Year => "%Y",
            Granularity::Month => "%Y-%m",
            Granularity::Date => "%Y-%m-%d",
            Granularity::Hour => "%Y-%m-%d %H:00",
            Granularity::Minute => "%Y-%m-%d %H:%M",
            Granularity::Second => "%Y-%m-%d %H:%M:%S",
        }
    }

    /// The chrono pattern used when rendering bucket labels in Rust.
    ///
    /// Coincides with [`Granularity::sql_pattern`] for every granularity -
    /// SQLite's strftime and chrono agree on these specifiers - which is
    /// what makes default-fill labels key-compatible with query output.
    pub fn label_pattern(&self) -> &'static str {
        self.sql_pattern()
    }
}

/// A timestamp column queried at a fixed bucket granularity.
///
/// Both the select and the filter expression format the timestamp to the
/// granularity's pattern, so grouping, filtering and ordering all operate on
/// the bucket label. The enumerable value space over a definition's period
/// is what drives default-filled zero rows.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeColumn {
    granularity: Granularity,
    column: String,
}

impl TimeColumn {
    pub fn make(granularity: Granularity, column: impl Into<String>) -> Self {
        Self {
            granularity,
            column: column.into(),
        }
    }

    pub fn year(column: impl Into<String>) -> Self {
        Self::make(Granularity::Year, column)
    }

    pub fn month(column: impl Into<String>) -> Self {
        Self::make(Granularity::Month, column)
    }

    pub fn date(column: impl Into<String>) -> Self {
        Self::make(Granularity::Date, column)
    }

    pub fn hour(column: impl Into<String>) -> Self {
        Self::make(Granularity::Hour, column)
    }

    pub fn minute(column: impl Into<String>) -> Self {
        Self::make(Granularity::Minute, column)
    }

    pub fn second(column: impl Into<String>) -> Self {
        Self::make(Granularity::Second, column)
    }

    /// The column name: the granularity token ("year", "month", ...).
    pub fn name(&self) -> &'static str {
        self.granularity.token()
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// The bucket expression, used in SELECT, WHERE, GROUP BY and ORDER BY
    /// alike.
    pub fn expression(&self) -> String {
        format!(
            "strftime('{}', {})",
            self.granularity.sql_pattern(),
            self.column
        )
    }

    /// Every bucket label between the definition's start and end bounds.
    ///
    /// Empty when the definition carries no period.
    pub fn values(&self, definition: &Definition) -> Vec<String> {
        definition
            .period()
            .map(|period| periods::series(period, self.granularity))
            .unwrap_or_default()
    }
}
