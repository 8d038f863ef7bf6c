use insta::assert_snapshot;
use tally::sql::{lit, raw, CompareOp, OrderByExpr, Query, Relation, SelectExpr};
use tally::value::Value;

#[test]
fn test_single_metric_statement() {
    let statement = Query::new()
        .select(SelectExpr::new(raw("COUNT(*)")).with_alias("metric_0"))
        .from(Relation::table("visits"))
        .to_sql();

    assert_snapshot!(statement.sql, @"SELECT COUNT(*) AS metric_0 FROM visits");
    assert!(statement.params.is_empty());
}

#[test]
fn test_dimension_and_metric_statement() {
    let statement = Query::new()
        .select(
            SelectExpr::new(raw("strftime('%Y-%m', created_at)")).with_alias("dimension_0"),
        )
        .select(SelectExpr::new(raw("COUNT(*)")).with_alias("metric_0"))
        .from(Relation::table("visits"))
        .group_by(raw("strftime('%Y-%m', created_at)"))
        .to_sql();

    assert_snapshot!(
        statement.sql,
        @"SELECT strftime('%Y-%m', created_at) AS dimension_0, COUNT(*) AS metric_0 FROM visits GROUP BY strftime('%Y-%m', created_at)"
    );
}

#[test]
fn test_filters_bind_parameters_in_order() {
    let statement = Query::new()
        .select(SelectExpr::new(raw("COUNT(*)")).with_alias("metric_0"))
        .from(Relation::table("visits"))
        .filter(raw("country_code").binary(CompareOp::Eq, lit("dk")))
        .filter(raw("device_id").in_list(vec![1i64.into(), 2i64.into()]))
        .to_sql();

    assert_snapshot!(
        statement.sql,
        @"SELECT COUNT(*) AS metric_0 FROM visits WHERE country_code = ? AND device_id IN (?, ?)"
    );
    assert_eq!(
        statement.params,
        vec![
            Value::Text("dk".into()),
            Value::Integer(1),
            Value::Integer(2)
        ]
    );
}

#[test]
fn test_order_by_directions() {
    let statement = Query::new()
        .select(SelectExpr::new(raw("country_code")).with_alias("dimension_0"))
        .select(SelectExpr::new(raw("COUNT(*)")).with_alias("metric_0"))
        .from(Relation::table("visits"))
        .group_by(raw("country_code"))
        .order_by(OrderByExpr::desc(raw("country_code")))
        .order_by(OrderByExpr::asc(raw("created_at")))
        .to_sql();

    assert_snapshot!(
        statement.sql,
        @"SELECT country_code AS dimension_0, COUNT(*) AS metric_0 FROM visits GROUP BY country_code ORDER BY country_code DESC, created_at ASC"
    );
}

#[test]
fn test_subquery_base_relation() {
    let statement = Query::new()
        .select(SelectExpr::new(raw("COUNT(*)")).with_alias("metric_0"))
        .from(Relation::subquery("SELECT * FROM visits WHERE bot = 0", "visits"))
        .to_sql();

    assert_snapshot!(
        statement.sql,
        @"SELECT COUNT(*) AS metric_0 FROM (SELECT * FROM visits WHERE bot = 0) AS visits"
    );
}

#[test]
fn test_empty_in_list_matches_nothing() {
    let statement = Query::new()
        .select(SelectExpr::new(raw("COUNT(*)")).with_alias("metric_0"))
        .from(Relation::table("visits"))
        .filter(raw("country_code").in_list(vec![]))
        .to_sql();

    assert_snapshot!(
        statement.sql,
        @"SELECT COUNT(*) AS metric_0 FROM visits WHERE 1 = 0"
    );
    assert!(statement.params.is_empty());
}

#[test]
fn test_aliased_table_relation() {
    let statement = Query::new()
        .select(SelectExpr::new(raw("v.country_code")))
        .from(Relation::aliased("visits", "v"))
        .to_sql();

    assert_snapshot!(statement.sql, @"SELECT v.country_code FROM visits AS v");
}
