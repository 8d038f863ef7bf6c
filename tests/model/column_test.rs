use std::collections::BTreeMap;

use tally::model::{Column, Definition, Format};
use tally::value::Value;

#[test]
fn test_plain_columns_share_select_and_filter_expressions() {
    let column = Column::string("country", "country_code");
    assert_eq!(column.select_expression(), "country_code");
    assert_eq!(column.filter_expression(), "country_code");
    assert_eq!(column.group_by_expression(), "country_code");
}

#[test]
fn test_aggregates_split_select_and_filter_expressions() {
    let column = Column::sum("revenue", "amount");
    assert_eq!(column.select_expression(), "SUM(amount)");
    assert_eq!(column.filter_expression(), "amount");

    let column = Column::average("order_size", "amount");
    assert_eq!(column.select_expression(), "AVG(amount)");
    assert_eq!(column.filter_expression(), "amount");
}

#[test]
fn test_count_selects_count_star() {
    let column = Column::count("visits");
    assert_eq!(column.select_expression(), "COUNT(*)");
    assert_eq!(column.format(&Value::Text("5".into())), Value::Integer(5));
}

#[test]
fn test_map_compiles_to_case_expression() {
    let mut map = BTreeMap::new();
    map.insert("1".to_string(), "Desktop".to_string());
    map.insert("2".to_string(), "Mobile".to_string());

    let column = Column::map("device", "device_id", &map, Some("Unknown"));
    assert_eq!(
        column.select_expression(),
        "CASE WHEN device_id = '1' THEN 'Desktop' \
         WHEN device_id = '2' THEN 'Mobile' ELSE 'Unknown' END"
    );
}

#[test]
fn test_map_without_default_omits_else() {
    let mut map = BTreeMap::new();
    map.insert("1".to_string(), "Desktop".to_string());

    let column = Column::map("device", "device_id", &map, None);
    assert_eq!(
        column.select_expression(),
        "CASE WHEN device_id = '1' THEN 'Desktop' END"
    );
}

#[test]
fn test_map_escapes_quotes() {
    let mut map = BTreeMap::new();
    map.insert("it's".to_string(), "label".to_string());

    let column = Column::map("device", "device_id", &map, None);
    assert!(column.select_expression().contains("'it''s'"));
}

#[test]
fn test_format_coercions() {
    assert_eq!(Format::Text.apply(&Value::Integer(5)), Value::Text("5".into()));
    assert_eq!(Format::Integer.apply(&Value::Text("5".into())), Value::Integer(5));
    assert_eq!(Format::Integer.apply(&Value::Float(5.9)), Value::Integer(5));
    assert_eq!(Format::Float.apply(&Value::Integer(5)), Value::Float(5.0));
    assert_eq!(Format::Boolean.apply(&Value::Integer(0)), Value::Boolean(false));
    assert_eq!(Format::Boolean.apply(&Value::Text("0".into())), Value::Boolean(false));
    assert_eq!(Format::Boolean.apply(&Value::Text("yes".into())), Value::Boolean(true));
}

#[test]
fn test_null_coerces_to_zero_values() {
    assert_eq!(Format::Integer.apply(&Value::Null), Value::Integer(0));
    assert_eq!(Format::Float.apply(&Value::Null), Value::Float(0.0));
    assert_eq!(Format::Text.apply(&Value::Null), Value::Text(String::new()));
    assert_eq!(Format::Boolean.apply(&Value::Null), Value::Boolean(false));
}

#[test]
fn test_formatting_is_idempotent() {
    let values = [
        Value::Null,
        Value::Text("5.5".into()),
        Value::Integer(7),
        Value::Float(2.25),
        Value::Boolean(true),
    ];
    for format in [Format::Text, Format::Integer, Format::Float, Format::Boolean] {
        for value in &values {
            let once = format.apply(value);
            assert_eq!(format.apply(&once), once, "{format:?} on {value:?}");
        }
    }
}

#[test]
fn test_scalar_columns_have_no_value_space() {
    let definition = Definition::new(["visits"]);
    assert!(Column::string("country", "country_code")
        .values(&definition)
        .is_empty());
}

#[test]
fn test_make_without_format_passes_values_through() {
    let column = Column::make("raw", "payload", "payload", None);
    assert_eq!(column.format(&Value::Text("x".into())), Value::Text("x".into()));
    assert_eq!(column.format(&Value::Null), Value::Null);
}
