//! The engine: per-metric table resolution and sheet merging.

use crate::error::{AnalyticsError, Result};
use crate::executor::QueryExecutor;
use crate::factory::TableFactory;
use crate::model::Definition;
use crate::results::Sheet;

/// The entry point: resolves a definition's metrics to capable tables,
/// queries each table with its metric subset, and merges the result sheets.
///
/// Capability is resolved per metric, not for the whole metric set at once,
/// so a single definition can fan out across tables. The fan-out is
/// all-or-nothing: a metric no table can serve fails the whole run.
pub struct Engine {
    tables: TableFactory,
    executor: Box<dyn QueryExecutor>,
}

impl Engine {
    pub fn new(tables: TableFactory, executor: Box<dyn QueryExecutor>) -> Self {
        Self { tables, executor }
    }

    pub fn tables(&self) -> &TableFactory {
        &self.tables
    }

    /// Run the definition and pivot the results into one sheet.
    pub fn run(&self, definition: &Definition) -> Result<Sheet> {
        let groups = self.metric_groups(definition)?;
        tracing::debug!(
            metrics = definition.metrics().len(),
            tables = groups.len(),
            "resolved definition"
        );

        let mut sheets = Vec::with_capacity(groups.len());
        for (table_name, metrics) in groups {
            let table = self
                .tables
                .find_by_name(&table_name)
                .ok_or(AnalyticsError::NoCapableTable)?;
            sheets.push(table.query(&definition.with_metrics(metrics), &*self.executor)?);
        }

        Ok(Sheet::from_sheets(sheets))
    }

    /// Group the definition's metrics by the table capable of serving each
    /// metric alongside the shared dimensions and filters. Groups keep the
    /// order in which their tables first appear.
    fn metric_groups(&self, definition: &Definition) -> Result<Vec<(String, Vec<String>)>> {
        let mut groups: Vec<(String, Vec<String>)> = Vec::new();

        for metric in definition.metrics() {
            let single = definition.with_metrics([metric.clone()]);
            let table = self.tables.find_capable(&single)?;
            match groups.iter_mut().find(|(name, _)| name.as_str() == table.name()) {
                Some((_, metrics)) => metrics.push(metric.clone()),
                None => groups.push((table.name().to_string(), vec![metric.clone()])),
            }
        }

        Ok(groups)
    }
}
