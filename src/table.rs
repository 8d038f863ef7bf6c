//! The table abstraction and the per-table query pipeline.
//!
//! A table binds a fixed column set to a base relation and compiles
//! definitions into aggregate SQL. The pipeline in the provided
//! [`Table::query`] method: compile a statement, execute it, synthesize
//! default rows for enumerable single-dimension value spaces, merge actual
//! rows over the defaults, and parse everything into a [`Sheet`].

use std::collections::HashMap;

use crate::error::{AnalyticsError, Result};
use crate::executor::{QueryExecutor, Row};
use crate::model::{Column, Definition, Filter, FilterKind, FilterValue, SortDirection};
use crate::results::{Record, Sheet};
use crate::sql::{lit, raw, CompareOp, Expr, OrderByExpr, Query, Relation, SelectExpr, Statement};
use crate::value::Value;

/// A schema-bound query compiler for one logical data source.
///
/// Implementations supply the schema (`name`, `columns`) and the base
/// relation; capability checks and the query pipeline are provided. Tables
/// are stateless across queries - one instance serves many definitions.
pub trait Table {
    /// The registry name of the table.
    fn name(&self) -> &str;

    /// The fixed set of columns the table can serve.
    fn columns(&self) -> &[Column];

    /// The base relation to select from. Receives the definition so a table
    /// can swap in a scoped subselect depending on the request.
    fn relation(&self, definition: &Definition) -> Relation;

    /// Look up a column by name.
    fn column(&self, name: &str) -> Option<&Column> {
        self.columns().iter().find(|column| column.name() == name)
    }

    /// True if every column the definition references is in this table's
    /// column set.
    fn can_run(&self, definition: &Definition) -> bool {
        definition
            .columns()
            .iter()
            .all(|name| self.column(name).is_some())
    }

    /// Run the definition against this table.
    fn query(&self, definition: &Definition, executor: &dyn QueryExecutor) -> Result<Sheet> {
        let statement = build_statement(self, definition)?;
        tracing::debug!(table = self.name(), sql = %statement.sql, "compiled definition");
        let data = executor.execute(&statement)?;

        let mut merged = KeyedRows::default();
        for (key, row) in default_rows(self, definition)? {
            merged.insert(key, row);
        }
        for raw_row in &data {
            let key = dimension_key(definition, raw_row);
            merged.insert(key, parse_row(self, definition, raw_row)?);
        }

        Ok(Sheet::parse(merged.into_rows(), definition))
    }
}

/// The alias of the dimension at the given position.
///
/// Aliases are positional rather than column names: select expressions are
/// arbitrary SQL that cannot double as identifiers, and dimension names may
/// collide with reserved words.
fn dimension_alias(position: usize) -> String {
    format!("dimension_{position}")
}

/// The alias of the metric at the given position.
fn metric_alias(position: usize) -> String {
    format!("metric_{position}")
}

fn lookup<'a, T: Table + ?Sized>(table: &'a T, name: &str) -> Result<&'a Column> {
    table.column(name).ok_or_else(|| AnalyticsError::UnknownColumn {
        table: table.name().to_string(),
        column: name.to_string(),
    })
}

/// Compile a definition into an executable statement.
fn build_statement<T: Table + ?Sized>(table: &T, definition: &Definition) -> Result<Statement> {
    let mut query = Query::new().from(table.relation(definition));

    for (position, dimension) in definition.dimensions().iter().enumerate() {
        let column = lookup(table, dimension)?;
        query = query
            .select(SelectExpr::new(raw(column.select_expression())).with_alias(&dimension_alias(position)))
            .group_by(raw(column.group_by_expression()));
    }

    for (position, metric) in definition.metrics().iter().enumerate() {
        let column = lookup(table, metric)?;
        query = query
            .select(SelectExpr::new(raw(column.select_expression())).with_alias(&metric_alias(position)));
    }

    for filter in definition.filters() {
        let column = lookup(table, filter.column())?;
        query = query.filter(filter_predicate(column, filter)?);
    }

    for ordering in definition.orderings() {
        let column = lookup(table, ordering.column())?;
        let expr = raw(column.filter_expression());
        query = query.order_by(match ordering.direction() {
            SortDirection::Asc => OrderByExpr::asc(expr),
            SortDirection::Desc => OrderByExpr::desc(expr),
        });
    }

    Ok(query.to_sql())
}

/// Translate a filter into a predicate against the column's filter
/// expression.
fn filter_predicate(column: &Column, filter: &Filter) -> Result<Expr> {
    match filter.kind() {
        FilterKind::Basic => {
            let op = CompareOp::parse(filter.operator())
                .ok_or_else(|| AnalyticsError::UnsupportedOperator(filter.operator().to_string()))?;
            let value = match filter.value() {
                FilterValue::Single(value) => value.clone(),
                FilterValue::List(_) => {
                    return Err(AnalyticsError::InvalidFilterValue {
                        column: filter.column().to_string(),
                    })
                }
            };
            Ok(raw(column.filter_expression()).binary(op, lit(value)))
        }
        FilterKind::In => {
            let values = match filter.value() {
                FilterValue::Single(value) => vec![value.clone()],
                FilterValue::List(values) => values.clone(),
            };
            Ok(raw(column.filter_expression()).in_list(values))
        }
        // The kind set is open for extension.
        #[allow(unreachable_patterns)]
        _ => Err(AnalyticsError::InvalidFilterType(filter.column().to_string())),
    }
}

/// Synthesize zero rows for the dimension's enumerable value space.
///
/// Only single-dimension definitions are default-filled: one zero row per
/// enumerable value, keyed `key/<value>`, with every metric at its
/// formatted zero. Multi-dimension breakdowns stay sparse.
fn default_rows<T: Table + ?Sized>(
    table: &T,
    definition: &Definition,
) -> Result<Vec<(String, Record)>> {
    let dimensions = definition.dimensions();
    if dimensions.len() != 1 {
        return Ok(Vec::new());
    }

    let column = lookup(table, &dimensions[0])?;
    let mut rows = Vec::new();
    for value in column.values(definition) {
        let mut row = Record::new();
        row.insert(column.name().to_string(), Value::Text(value.clone()));
        for metric in definition.metrics() {
            let metric_column = lookup(table, metric)?;
            row.insert(metric.clone(), metric_column.format(&Value::Integer(0)));
        }
        rows.push((format!("key/{value}"), row));
    }
    Ok(rows)
}

/// The dimension-tuple identity of a raw row: `key/<v0>/<v1>/...` in
/// dimension order, from the unformatted values.
fn dimension_key(definition: &Definition, row: &Row) -> String {
    let mut key = String::from("key");
    for position in 0..definition.dimensions().len() {
        key.push('/');
        if let Some(value) = row.get(&dimension_alias(position)) {
            key.push_str(&value.as_key());
        }
    }
    key
}

/// Format a raw row's dimensions and metrics through their columns.
fn parse_row<T: Table + ?Sized>(
    table: &T,
    definition: &Definition,
    row: &Row,
) -> Result<Record> {
    let mut parsed = Record::new();
    for (position, dimension) in definition.dimensions().iter().enumerate() {
        let column = lookup(table, dimension)?;
        let value = row.get(&dimension_alias(position)).cloned().unwrap_or(Value::Null);
        parsed.insert(dimension.clone(), column.format(&value));
    }
    for (position, metric) in definition.metrics().iter().enumerate() {
        let column = lookup(table, metric)?;
        let value = row.get(&metric_alias(position)).cloned().unwrap_or(Value::Null);
        parsed.insert(metric.clone(), column.format(&value));
    }
    Ok(parsed)
}

/// Keyed rows with insertion order: defaults land first in period order,
/// actual rows overwrite same-keyed defaults in place, unseen actual rows
/// append in executor order.
#[derive(Default)]
struct KeyedRows {
    index: HashMap<String, usize>,
    rows: Vec<Record>,
}

impl KeyedRows {
    fn insert(&mut self, key: String, row: Record) {
        match self.index.get(&key) {
            Some(&at) => self.rows[at] = row,
            None => {
                self.index.insert(key, self.rows.len());
                self.rows.push(row);
            }
        }
    }

    fn into_rows(self) -> Vec<Record> {
        self.rows
    }
}
