//! End-to-end: TOML model, embedded SQLite, real SQL execution.

use chrono::NaiveDate;
use tally::config::ModelConfig;
use tally::model::{Definition, Filter, Ordering, Period};
use tally::prelude::SqliteExecutor;
use tally::value::Value;
use tally::{Engine, TableFactory};

const MODEL: &str = r#"
[[table]]
name = "visits"
relation = "visits"

[[table.column]]
name = "visits"
kind = "count"

[[table.column]]
name = "month"
kind = "month"
column = "created_at"

[[table.column]]
name = "country"
kind = "string"
expression = "country_code"

[[table.column]]
name = "device"
kind = "map"
column = "device_id"
default = "Unknown"

[table.column.map]
"1" = "Desktop"
"2" = "Mobile"

[[table]]
name = "sales"
relation = "sales"

[[table.column]]
name = "revenue"
kind = "sum"
expression = "amount"

[[table.column]]
name = "month"
kind = "month"
column = "sold_at"
"#;

const SEED: &str = "
CREATE TABLE visits (created_at TEXT, country_code TEXT, device_id INTEGER);
INSERT INTO visits VALUES
    ('2023-02-03 10:00:00', 'dk', 1),
    ('2023-02-14 11:30:00', 'dk', 2),
    ('2023-02-20 09:15:00', 'se', 1),
    ('2023-03-01 16:45:00', 'dk', 3),
    ('2022-12-31 23:59:59', 'dk', 1);

CREATE TABLE sales (sold_at TEXT, amount REAL);
INSERT INTO sales VALUES
    ('2023-02-05 12:00:00', 100.5),
    ('2023-02-28 08:00:00', 49.5),
    ('2023-03-10 14:00:00', 20.0);
";

fn engine() -> Engine {
    let executor = SqliteExecutor::in_memory().unwrap();
    executor.connection().execute_batch(SEED).unwrap();

    let mut tables = TableFactory::new();
    for table in ModelConfig::from_str(MODEL).unwrap().build().unwrap() {
        tables.register(table);
    }
    Engine::new(tables, Box::new(executor))
}

fn period(start: (i32, u32, u32), end: (i32, u32, u32)) -> Period {
    let at = |(y, m, d): (i32, u32, u32)| {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    };
    Period::new(at(start), at(end))
}

fn text(s: &str) -> Value {
    Value::Text(s.into())
}

#[test]
fn test_monthly_visits_are_dense_over_the_period() {
    // The period drives default-fill; the matching month filter keeps the
    // out-of-range December visit from surfacing as an extra row.
    let engine = engine();
    let definition = Definition::new(["visits"])
        .add_dimension("month")
        .add_filter(Filter::new("month", ">=", "2023-01"))
        .with_period(period((2023, 1, 1), (2023, 3, 31)));

    let records = engine.run(&definition).unwrap().to_records();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].get("month"), Some(&text("2023-01")));
    assert_eq!(records[0].get("visits"), Some(&Value::Integer(0)));
    assert_eq!(records[1].get("month"), Some(&text("2023-02")));
    assert_eq!(records[1].get("visits"), Some(&Value::Integer(3)));
    assert_eq!(records[2].get("month"), Some(&text("2023-03")));
    assert_eq!(records[2].get("visits"), Some(&Value::Integer(1)));
}

#[test]
fn test_cross_table_metrics_join_by_month() {
    let engine = engine();
    let definition = Definition::new(["visits", "revenue"])
        .add_dimension("month")
        .add_filter(Filter::new("month", ">=", "2023-02"))
        .with_period(period((2023, 2, 1), (2023, 3, 31)));

    let records = engine.run(&definition).unwrap().to_records();
    assert_eq!(records.len(), 2);

    let february = &records[0];
    assert_eq!(february.get("month"), Some(&text("2023-02")));
    assert_eq!(february.get("visits"), Some(&Value::Integer(3)));
    assert_eq!(february.get("revenue"), Some(&Value::Float(150.0)));

    let march = &records[1];
    assert_eq!(march.get("visits"), Some(&Value::Integer(1)));
    assert_eq!(march.get("revenue"), Some(&Value::Float(20.0)));
}

#[test]
fn test_basic_filter_narrows_rows() {
    let engine = engine();
    let definition = Definition::new(["visits"])
        .add_dimension("month")
        .add_filter(Filter::new("country", "=", "dk"))
        .add_filter(Filter::new("month", ">=", "2023-02"))
        .with_period(period((2023, 2, 1), (2023, 3, 31)));

    let records = engine.run(&definition).unwrap().to_records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get("visits"), Some(&Value::Integer(2)));
    assert_eq!(records[1].get("visits"), Some(&Value::Integer(1)));
}

#[test]
fn test_in_filter_narrows_rows() {
    let engine = engine();
    let definition = Definition::new(["visits"])
        .add_filter(Filter::any_of("country", vec![text("dk"), text("se")]));

    let records = engine.run(&definition).unwrap().to_records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get("visits"), Some(&Value::Integer(5)));
}

#[test]
fn test_map_dimension_labels_values() {
    let engine = engine();
    let definition = Definition::new(["visits"])
        .set_dimensions(["device"])
        .add_ordering(Ordering::asc("device"));

    // No period on the device dimension: only actual combinations appear.
    let records = engine.run(&definition).unwrap().to_records();
    let devices: Vec<&Value> = records.iter().map(|r| r.get("device").unwrap()).collect();
    assert_eq!(
        devices,
        vec![&text("Desktop"), &text("Mobile"), &text("Unknown")]
    );
}

#[test]
fn test_multi_dimension_breakdown_is_sparse() {
    let engine = engine();
    let definition = Definition::new(["visits"])
        .set_dimensions(["month", "country"])
        .add_filter(Filter::new("country", "=", "no"))
        .with_period(period((2023, 1, 1), (2023, 3, 31)));

    let records = engine.run(&definition).unwrap().to_records();
    assert!(records.is_empty());
}

#[test]
fn test_ordering_is_respected_without_defaults() {
    let engine = engine();
    let definition = Definition::new(["visits"])
        .set_dimensions(["country"])
        .add_ordering(Ordering::desc("country"));

    let records = engine.run(&definition).unwrap().to_records();
    let countries: Vec<&Value> = records.iter().map(|r| r.get("country").unwrap()).collect();
    assert_eq!(countries, vec![&text("se"), &text("dk")]);
}

#[test]
fn test_metric_filter_uses_the_raw_expression() {
    // Filtering on the summed metric's raw column, not the aggregate.
    let engine = engine();
    let definition = Definition::new(["revenue"])
        .add_dimension("month")
        .add_filter(Filter::new("revenue", ">", 30.0))
        .with_period(period((2023, 2, 1), (2023, 3, 31)));

    let records = engine.run(&definition).unwrap().to_records();
    assert_eq!(records[0].get("revenue"), Some(&Value::Float(150.0)));
    assert_eq!(records[1].get("revenue"), Some(&Value::Float(0.0)));
}
