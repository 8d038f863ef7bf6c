//! The table registry.

use crate::error::{AnalyticsError, Result};
use crate::model::Definition;
use crate::table::Table;

/// An ordered registry of tables, searched first-match-wins.
///
/// Built once at startup by the caller and handed to the engine; nothing
/// mutates it during query execution. Registration does not deduplicate:
/// a re-registered name shadows [`TableFactory::find_by_name`] lookups but
/// keeps its slot in capability search order.
#[derive(Default)]
pub struct TableFactory {
    tables: Vec<Box<dyn Table>>,
}

impl TableFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a table to the registry.
    pub fn register(&mut self, table: impl Table + 'static) {
        self.tables.push(Box::new(table));
    }

    /// The first table with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<&dyn Table> {
        self.tables
            .iter()
            .find(|table| table.name() == name)
            .map(|table| &**table)
    }

    /// The first registered table capable of running the definition.
    pub fn find_capable(&self, definition: &Definition) -> Result<&dyn Table> {
        self.tables
            .iter()
            .find(|table| table.can_run(definition))
            .map(|table| &**table)
            .ok_or(AnalyticsError::NoCapableTable)
    }

    /// All registered tables, in registration order.
    pub fn tables(&self) -> impl Iterator<Item = &dyn Table> {
        self.tables.iter().map(|table| &**table)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
