//! Filter predicates against a named column.

use crate::value::Value;

/// The kind of predicate a filter compiles to.
///
/// Derived from the operator, not stored: `"in"` gives [`FilterKind::In`],
/// anything else a basic comparison. Marked non-exhaustive so compilation
/// keeps a rejection arm for kinds added later.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Single-value comparison: `expr OP ?`.
    Basic,
    /// Multi-value membership: `expr IN (?, ...)`.
    In,
}

/// The right-hand side of a filter.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Single(Value),
    List(Vec<Value>),
}

impl From<Value> for FilterValue {
    fn from(value: Value) -> Self {
        FilterValue::Single(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Single(value.into())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Single(value.into())
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Single(value.into())
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        FilterValue::Single(value.into())
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Single(value.into())
    }
}

impl From<Vec<Value>> for FilterValue {
    fn from(values: Vec<Value>) -> Self {
        FilterValue::List(values)
    }
}

/// A predicate against a named column. Immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    column: String,
    operator: String,
    value: FilterValue,
}

impl Filter {
    pub fn new(
        column: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<FilterValue>,
    ) -> Self {
        Self {
            column: column.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }

    /// Shorthand for an `in` filter over a list of values.
    pub fn any_of(column: impl Into<String>, values: Vec<Value>) -> Self {
        Self::new(column, "in", FilterValue::List(values))
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn operator(&self) -> &str {
        &self.operator
    }

    pub fn value(&self) -> &FilterValue {
        &self.value
    }

    /// The kind of predicate this filter compiles to.
    pub fn kind(&self) -> FilterKind {
        if self.operator.eq_ignore_ascii_case("in") {
            FilterKind::In
        } else {
            FilterKind::Basic
        }
    }
}
