//! Queryable columns: SQL expressions plus a value formatter.

use std::collections::BTreeMap;

use crate::model::definition::Definition;
use crate::model::time::TimeColumn;
use crate::value::Value;

/// How raw executor values are coerced before they land in a sheet.
///
/// Formatters are data, not closures: a tagged enum evaluated by a pure
/// function, so column definitions stay inspectable and testable. Every
/// variant is idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Integer,
    Float,
    Boolean,
}

impl Format {
    /// Coerce a value. `Null` coerces like an empty input (0, 0.0, "",
    /// false); unparseable text coerces to the type's zero.
    pub fn apply(&self, value: &Value) -> Value {
        match self {
            Format::Text => Value::Text(match value {
                Value::Null => String::new(),
                Value::Text(s) => s.clone(),
                other => other.to_string(),
            }),
            Format::Integer => Value::Integer(match value {
                Value::Null => 0,
                Value::Text(s) => s
                    .parse::<i64>()
                    .or_else(|_| s.parse::<f64>().map(|f| f as i64))
                    .unwrap_or(0),
                Value::Integer(n) => *n,
                Value::Float(f) => *f as i64,
                Value::Boolean(b) => *b as i64,
            }),
            Format::Float => Value::Float(match value {
                Value::Null => 0.0,
                Value::Text(s) => s.parse::<f64>().unwrap_or(0.0),
                Value::Integer(n) => *n as f64,
                Value::Float(f) => *f,
                Value::Boolean(b) => *b as i64 as f64,
            }),
            Format::Boolean => Value::Boolean(match value {
                Value::Null => false,
                Value::Text(s) => !s.is_empty() && s != "0",
                Value::Integer(n) => *n != 0,
                Value::Float(f) => *f != 0.0,
                Value::Boolean(b) => *b,
            }),
        }
    }
}

/// A column built from SQL expression fragments.
///
/// The select expression and the filter expression may differ: an aggregate
/// metric selects `SUM(amount)` but filters and orders on the raw `amount`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarColumn {
    name: String,
    select_expression: String,
    filter_expression: String,
    format: Option<Format>,
}

impl ScalarColumn {
    pub fn new(
        name: impl Into<String>,
        select_expression: impl Into<String>,
        filter_expression: impl Into<String>,
        format: Option<Format>,
    ) -> Self {
        Self {
            name: name.into(),
            select_expression: select_expression.into(),
            filter_expression: filter_expression.into(),
            format,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn select_expression(&self) -> &str {
        &self.select_expression
    }

    pub fn filter_expression(&self) -> &str {
        &self.filter_expression
    }

    pub fn format(&self) -> Option<Format> {
        self.format
    }
}

/// One queryable attribute of a table.
///
/// Closed polymorphism over the two observed shapes: scalar columns built
/// from expression fragments, and time columns with an enumerable value
/// space.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Scalar(ScalarColumn),
    Time(TimeColumn),
}

impl Column {
    /// A column with distinct select and filter expressions and an optional
    /// formatter.
    pub fn make(
        name: impl Into<String>,
        select_expression: impl Into<String>,
        filter_expression: impl Into<String>,
        format: Option<Format>,
    ) -> Self {
        Column::Scalar(ScalarColumn::new(
            name,
            select_expression,
            filter_expression,
            format,
        ))
    }

    /// A string-valued column.
    pub fn string(name: impl Into<String>, expression: impl Into<String>) -> Self {
        let expression = expression.into();
        Column::make(name, expression.clone(), expression, Some(Format::Text))
    }

    /// An integer-valued column.
    pub fn integer(name: impl Into<String>, expression: impl Into<String>) -> Self {
        let expression = expression.into();
        Column::make(name, expression.clone(), expression, Some(Format::Integer))
    }

    /// A float-valued column.
    pub fn float(name: impl Into<String>, expression: impl Into<String>) -> Self {
        let expression = expression.into();
        Column::make(name, expression.clone(), expression, Some(Format::Float))
    }

    /// A boolean-valued column.
    pub fn boolean(name: impl Into<String>, expression: impl Into<String>) -> Self {
        let expression = expression.into();
        Column::make(name, expression.clone(), expression, Some(Format::Boolean))
    }

    /// A summed metric: selects `SUM(expr)`, filters and orders on `expr`.
    pub fn sum(name: impl Into<String>, expression: impl Into<String>) -> Self {
        let expression = expression.into();
        Column::make(
            name,
            format!("SUM({expression})"),
            expression,
            Some(Format::Float),
        )
    }

    /// An averaged metric: selects `AVG(expr)`, filters and orders on `expr`.
    pub fn average(name: impl Into<String>, expression: impl Into<String>) -> Self {
        let expression = expression.into();
        Column::make(
            name,
            format!("AVG({expression})"),
            expression,
            Some(Format::Float),
        )
    }

    /// A row-count metric.
    pub fn count(name: impl Into<String>) -> Self {
        Column::integer(name, "COUNT(*)")
    }

    /// A value-to-label mapping, compiled to a `CASE` expression.
    ///
    /// The map is iterated in key order so the generated SQL is
    /// deterministic.
    pub fn map(
        name: impl Into<String>,
        column: &str,
        map: &BTreeMap<String, String>,
        default: Option<&str>,
    ) -> Self {
        Column::string(name, case_expression(column, map, default))
    }

    pub fn name(&self) -> &str {
        match self {
            Column::Scalar(column) => column.name(),
            Column::Time(column) => column.name(),
        }
    }

    /// The expression used in the SELECT list.
    pub fn select_expression(&self) -> String {
        match self {
            Column::Scalar(column) => column.select_expression().to_string(),
            Column::Time(column) => column.expression(),
        }
    }

    /// The expression used in WHERE and ORDER BY clauses.
    pub fn filter_expression(&self) -> String {
        match self {
            Column::Scalar(column) => column.filter_expression().to_string(),
            Column::Time(column) => column.expression(),
        }
    }

    /// The expression used in the GROUP BY clause: the raw, non-aggregate
    /// form, which is the filter expression.
    pub fn group_by_expression(&self) -> String {
        self.filter_expression()
    }

    /// Format a raw executor value. Pure and deterministic; time columns
    /// pass values through unchanged.
    pub fn format(&self, value: &Value) -> Value {
        match self {
            Column::Scalar(column) => match column.format() {
                Some(format) => format.apply(value),
                None => value.clone(),
            },
            Column::Time(_) => value.clone(),
        }
    }

    /// The values the column may assume under the given definition.
    ///
    /// Non-empty only for time columns on definitions with a period; this
    /// is the value space default-filled rows are synthesized from.
    pub fn values(&self, definition: &Definition) -> Vec<String> {
        match self {
            Column::Scalar(_) => Vec::new(),
            Column::Time(column) => column.values(definition),
        }
    }
}

impl From<ScalarColumn> for Column {
    fn from(column: ScalarColumn) -> Self {
        Column::Scalar(column)
    }
}

impl From<TimeColumn> for Column {
    fn from(column: TimeColumn) -> Self {
        Column::Time(column)
    }
}

fn case_expression(column: &str, map: &BTreeMap<String, String>, default: Option<&str>) -> String {
    let mut expression = String::from("CASE");
    for (key, label) in map {
        expression.push_str(&format!(
            " WHEN {column} = '{}' THEN '{}'",
            escape(key),
            escape(label)
        ));
    }
    if let Some(default) = default {
        expression.push_str(&format!(" ELSE '{}'", escape(default)));
    }
    expression.push_str(" END");
    expression
}

fn escape(text: &str) -> String {
    text.replace('\'', "''")
}
