//! The query request: metrics, dimensions, filters and orderings.

use chrono::NaiveDateTime;

use crate::model::filter::Filter;
use crate::model::ordering::Ordering;

/// The date range a definition spans.
///
/// Time columns enumerate their bucket labels over this range; definitions
/// without a period simply get no default-filled rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Period {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl Period {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }
}

/// A declarative analytics query: which metrics to compute, broken down by
/// which dimensions, under which filters and orderings.
///
/// `Definition` is an immutable value type: the builder methods consume and
/// return, and [`Definition::with_metrics`] derives a copy with a substituted
/// metric set. The engine relies on this when fanning a request out across
/// tables.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "builders have no effect until used"]
pub struct Definition {
    metrics: Vec<String>,
    dimensions: Vec<String>,
    filters: Vec<Filter>,
    orderings: Vec<Ordering>,
    period: Option<Period>,
}

impl Definition {
    /// Create a definition for the given metrics.
    pub fn new<I, S>(metrics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            metrics: metrics.into_iter().map(Into::into).collect(),
            dimensions: Vec::new(),
            filters: Vec::new(),
            orderings: Vec::new(),
            period: None,
        }
    }

    /// Derive a copy with a substituted metric set.
    ///
    /// Dimensions, filters, orderings and the period are shared unchanged.
    pub fn with_metrics<I, S>(&self, metrics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            metrics: metrics.into_iter().map(Into::into).collect(),
            ..self.clone()
        }
    }

    pub fn metrics(&self) -> &[String] {
        &self.metrics
    }

    pub fn dimensions(&self) -> &[String] {
        &self.dimensions
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn orderings(&self) -> &[Ordering] {
        &self.orderings
    }

    pub fn period(&self) -> Option<&Period> {
        self.period.as_ref()
    }

    /// Replace the dimensions.
    pub fn set_dimensions<I, S>(mut self, dimensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dimensions = dimensions.into_iter().map(Into::into).collect();
        self
    }

    /// Add a single dimension.
    pub fn add_dimension(mut self, dimension: impl Into<String>) -> Self {
        self.dimensions.push(dimension.into());
        self
    }

    /// Replace the filters.
    pub fn set_filters(mut self, filters: impl IntoIterator<Item = Filter>) -> Self {
        self.filters = filters.into_iter().collect();
        self
    }

    /// Add a single filter.
    pub fn add_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Replace the orderings.
    pub fn set_orderings(mut self, orderings: impl IntoIterator<Item = Ordering>) -> Self {
        self.orderings = orderings.into_iter().collect();
        self
    }

    /// Add a single ordering.
    pub fn add_ordering(mut self, ordering: Ordering) -> Self {
        self.orderings.push(ordering);
        self
    }

    /// Set the date range the definition spans.
    pub fn with_period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    /// The dimensions and metrics, in definition order.
    pub fn dimensions_and_metrics(&self) -> impl Iterator<Item = &str> {
        self.dimensions
            .iter()
            .chain(self.metrics.iter())
            .map(String::as_str)
    }

    /// Every column the definition references: dimensions, metrics and
    /// filter columns. May contain duplicates; capability checks are subset
    /// checks, so duplicates are harmless.
    pub fn columns(&self) -> Vec<&str> {
        self.dimensions_and_metrics()
            .chain(self.filters.iter().map(Filter::column))
            .collect()
    }

    /// True if the definition references any of the given columns.
    pub fn has_column(&self, names: &[&str]) -> bool {
        let columns = self.columns();
        names.iter().any(|name| columns.contains(name))
    }

    /// Conditionally apply a builder step.
    pub fn when(self, condition: bool, apply: impl FnOnce(Self) -> Self) -> Self {
        if condition {
            apply(self)
        } else {
            self
        }
    }
}
