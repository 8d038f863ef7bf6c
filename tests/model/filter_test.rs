use tally::model::{Filter, FilterKind, FilterValue};
use tally::value::Value;

#[test]
fn test_in_operator_gives_in_kind() {
    let filter = Filter::new("browser", "in", vec![Value::Text("firefox".into())]);
    assert_eq!(filter.kind(), FilterKind::In);

    let filter = Filter::new("browser", "IN", vec![Value::Text("firefox".into())]);
    assert_eq!(filter.kind(), FilterKind::In);
}

#[test]
fn test_any_other_operator_gives_basic_kind() {
    for operator in ["=", "!=", "<", "<=", ">", ">=", "like", "between"] {
        let filter = Filter::new("visits", operator, 10i64);
        assert_eq!(filter.kind(), FilterKind::Basic, "operator {operator}");
    }
}

#[test]
fn test_single_value_conversions() {
    let filter = Filter::new("country", "=", "dk");
    assert_eq!(
        filter.value(),
        &FilterValue::Single(Value::Text("dk".into()))
    );

    let filter = Filter::new("visits", ">", 100i64);
    assert_eq!(filter.value(), &FilterValue::Single(Value::Integer(100)));

    let filter = Filter::new("bot", "=", false);
    assert_eq!(filter.value(), &FilterValue::Single(Value::Boolean(false)));
}

#[test]
fn test_any_of_builds_in_filter() {
    let filter = Filter::any_of("country", vec!["dk".into(), "se".into()]);

    assert_eq!(filter.operator(), "in");
    assert_eq!(filter.kind(), FilterKind::In);
    assert_eq!(
        filter.value(),
        &FilterValue::List(vec![Value::Text("dk".into()), Value::Text("se".into())])
    );
}
