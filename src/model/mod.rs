//! The analytics data model: definitions, columns, filters and orderings.

pub mod column;
pub mod definition;
pub mod filter;
pub mod ordering;
pub mod time;

pub use column::{Column, Format, ScalarColumn};
pub use definition::{Definition, Period};
pub use filter::{Filter, FilterKind, FilterValue};
pub use ordering::{Ordering, SortDirection};
pub use time::{Granularity, TimeColumn};
