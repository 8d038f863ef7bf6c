//! A single metric value keyed by its dimension combination.

use std::collections::BTreeMap;

use crate::results::Record;
use crate::value::Value;

/// One metric value for one dimension combination.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    dimensions: BTreeMap<String, Value>,
    metric: String,
    value: Value,
}

impl Cell {
    pub fn new(dimensions: BTreeMap<String, Value>, metric: impl Into<String>, value: Value) -> Self {
        Self {
            dimensions,
            metric: metric.into(),
            value,
        }
    }

    pub fn dimensions(&self) -> &BTreeMap<String, Value> {
        &self.dimensions
    }

    pub fn metric(&self) -> &str {
        &self.metric
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The join key across metrics: dimension values sorted by dimension
    /// name (the map's iteration order), rendered `name:value` and joined
    /// with `/`.
    pub fn dimension_group(&self) -> String {
        self.dimensions
            .iter()
            .map(|(name, value)| format!("{name}:{}", value.as_key()))
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Flatten to a record: the dimensions plus this cell's metric value.
    pub fn to_record(&self) -> Record {
        let mut record = self.dimensions.clone();
        record.insert(self.metric.clone(), self.value.clone());
        record
    }
}
