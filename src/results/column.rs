//! One result column per metric.

use std::collections::BTreeMap;

use crate::model::Definition;
use crate::results::{Cell, Record};
use crate::value::Value;

/// The cells of a single metric, one per result row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Column {
    cells: Vec<Cell>,
}

impl Column {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract one metric's cells from parsed result rows.
    pub fn parse(rows: &[Record], metric: &str, definition: &Definition) -> Self {
        let cells = rows
            .iter()
            .map(|row| {
                let dimensions: BTreeMap<String, Value> = definition
                    .dimensions()
                    .iter()
                    .map(|dimension| {
                        let value = row.get(dimension).cloned().unwrap_or(Value::Null);
                        (dimension.clone(), value)
                    })
                    .collect();
                let value = row.get(metric).cloned().unwrap_or(Value::Null);
                Cell::new(dimensions, metric, value)
            })
            .collect();
        Self { cells }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn add_cell(&mut self, cell: Cell) {
        self.cells.push(cell);
    }
}
