//! The pivoted, dimension-keyed result of one or more metric queries.

use std::collections::HashMap;

use crate::model::Definition;
use crate::results::{Column, Record};

/// A set of result columns, one per metric, possibly produced by different
/// tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    columns: Vec<Column>,
}

impl Sheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sheet from parsed result rows: one column per metric in the
    /// definition.
    pub fn parse(rows: Vec<Record>, definition: &Definition) -> Self {
        let columns = definition
            .metrics()
            .iter()
            .map(|metric| Column::parse(&rows, metric, definition))
            .collect();
        Self { columns }
    }

    /// Merge sheets by concatenating their columns.
    pub fn from_sheets(sheets: impl IntoIterator<Item = Sheet>) -> Self {
        let columns = sheets
            .into_iter()
            .flat_map(|sheet| sheet.columns)
            .collect();
        Self { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn add_column(&mut self, column: Column) {
        self.columns.push(column);
    }

    /// Pivot into flat records: all cells across all columns are grouped by
    /// dimension identity, and each group merges into one record carrying
    /// every metric seen for that combination. Groups keep first-seen order.
    pub fn to_records(&self) -> Vec<Record> {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut records: Vec<Record> = Vec::new();

        for cell in self.columns.iter().flat_map(Column::cells) {
            let group = cell.dimension_group();
            match index.get(&group) {
                Some(&at) => {
                    records[at].insert(cell.metric().to_string(), cell.value().clone());
                }
                None => {
                    index.insert(group, records.len());
                    records.push(cell.to_record());
                }
            }
        }

        records
    }
}
