//! Period generation: bucket labels between two instants.
//!
//! The counterpart of a time column's enumerable value space. Year and month
//! steps are calendar-aware (a month added to Jan 31 clamps to the end of
//! February); day and clock units are fixed-width.

use chrono::{Days, Duration, Months, NaiveDateTime};

use crate::model::definition::Period;
use crate::model::time::Granularity;

/// Every bucket label from `period.start()` to `period.end()` inclusive,
/// stepping one granularity unit at a time.
///
/// The sequence is finite and ordered; an inverted period yields nothing.
pub fn series(period: &Period, granularity: Granularity) -> Vec<String> {
    let mut labels = Vec::new();
    let mut cursor = period.start();

    while cursor <= period.end() {
        labels.push(cursor.format(granularity.label_pattern()).to_string());
        cursor = match step(cursor, granularity) {
            Some(next) => next,
            None => break,
        };
    }

    labels
}

fn step(instant: NaiveDateTime, granularity: Granularity) -> Option<NaiveDateTime> {
    match granularity {
        Granularity::Year => instant.checked_add_months(Months::new(12)),
        Granularity::Month => instant.checked_add_months(Months::new(1)),
        Granularity::Date => instant.checked_add_days(Days::new(1)),
        Granularity::Hour => instant.checked_add_signed(Duration::hours(1)),
        Granularity::Minute => instant.checked_add_signed(Duration::minutes(1)),
        Granularity::Second => instant.checked_add_signed(Duration::seconds(1)),
    }
}
