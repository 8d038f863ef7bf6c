//! Query builder - construct aggregate SELECT statements with a fluent API.

use crate::sql::expr::Expr;
use crate::value::Value;

// =============================================================================
// Statement
// =============================================================================

/// A compiled query: SQL text plus bound parameters in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
}

// =============================================================================
// Base relation
// =============================================================================

/// The relation a query selects from.
///
/// Tables usually expose a physical table name, but a base relation may be
/// an arbitrary subselect (e.g. a pre-filtered event stream).
#[derive(Debug, Clone, PartialEq)]
pub enum Relation {
    Table { name: String, alias: Option<String> },
    Subquery { sql: String, alias: String },
}

impl Relation {
    pub fn table(name: impl Into<String>) -> Self {
        Relation::Table {
            name: name.into(),
            alias: None,
        }
    }

    pub fn aliased(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Relation::Table {
            name: name.into(),
            alias: Some(alias.into()),
        }
    }

    pub fn subquery(sql: impl Into<String>, alias: impl Into<String>) -> Self {
        Relation::Subquery {
            sql: sql.into(),
            alias: alias.into(),
        }
    }

    fn write_sql(&self, sql: &mut String) {
        match self {
            Relation::Table { name, alias } => {
                sql.push_str(name);
                if let Some(alias) = alias {
                    sql.push_str(" AS ");
                    sql.push_str(alias);
                }
            }
            Relation::Subquery { sql: inner, alias } => {
                sql.push('(');
                sql.push_str(inner);
                sql.push_str(") AS ");
                sql.push_str(alias);
            }
        }
    }
}

// =============================================================================
// Select expression (column with optional alias)
// =============================================================================

/// A SELECT list item: expression with optional alias.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "builders have no effect until used"]
pub struct SelectExpr {
    pub expr: Expr,
    pub alias: Option<String>,
}

impl SelectExpr {
    pub fn new(expr: Expr) -> Self {
        Self { expr, alias: None }
    }

    pub fn with_alias(mut self, alias: &str) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

impl From<Expr> for SelectExpr {
    fn from(expr: Expr) -> Self {
        SelectExpr::new(expr)
    }
}

// =============================================================================
// ORDER BY
// =============================================================================

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    fn as_sql(&self) -> &'static str {
        match self {
            SortDir::Asc => "ASC",
            SortDir::Desc => "DESC",
        }
    }
}

/// An ORDER BY expression.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "builders have no effect until used"]
pub struct OrderByExpr {
    pub expr: Expr,
    pub dir: SortDir,
}

impl OrderByExpr {
    pub fn asc(expr: Expr) -> Self {
        Self {
            expr,
            dir: SortDir::Asc,
        }
    }

    pub fn desc(expr: Expr) -> Self {
        Self {
            expr,
            dir: SortDir::Desc,
        }
    }
}

// =============================================================================
// Query builder
// =============================================================================

/// An aggregate SELECT query.
#[derive(Debug, Clone, Default, PartialEq)]
#[must_use = "Query has no effect until compiled with to_sql()"]
pub struct Query {
    pub select: Vec<SelectExpr>,
    pub from: Option<Relation>,
    pub filters: Vec<Expr>,
    pub group_by: Vec<Expr>,
    pub order_by: Vec<OrderByExpr>,
}

impl Query {
    /// Create a new empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base relation.
    pub fn from(mut self, relation: Relation) -> Self {
        self.from = Some(relation);
        self
    }

    /// Add a SELECT list item.
    pub fn select(mut self, expr: impl Into<SelectExpr>) -> Self {
        self.select.push(expr.into());
        self
    }

    /// Add a WHERE predicate; predicates are AND-joined.
    pub fn filter(mut self, predicate: Expr) -> Self {
        self.filters.push(predicate);
        self
    }

    /// Add a GROUP BY expression.
    pub fn group_by(mut self, expr: Expr) -> Self {
        self.group_by.push(expr);
        self
    }

    /// Add an ORDER BY expression.
    pub fn order_by(mut self, expr: OrderByExpr) -> Self {
        self.order_by.push(expr);
        self
    }

    /// Compile to SQL text plus bound parameters.
    pub fn to_sql(&self) -> Statement {
        let mut sql = String::from("SELECT ");
        let mut params = Vec::new();

        if self.select.is_empty() {
            sql.push('*');
        }
        for (i, item) in self.select.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            item.expr.write_sql(&mut sql, &mut params);
            if let Some(alias) = &item.alias {
                sql.push_str(" AS ");
                sql.push_str(alias);
            }
        }

        if let Some(from) = &self.from {
            sql.push_str(" FROM ");
            from.write_sql(&mut sql);
        }

        for (i, predicate) in self.filters.iter().enumerate() {
            sql.push_str(if i == 0 { " WHERE " } else { " AND " });
            predicate.write_sql(&mut sql, &mut params);
        }

        for (i, expr) in self.group_by.iter().enumerate() {
            sql.push_str(if i == 0 { " GROUP BY " } else { ", " });
            expr.write_sql(&mut sql, &mut params);
        }

        for (i, order) in self.order_by.iter().enumerate() {
            sql.push_str(if i == 0 { " ORDER BY " } else { ", " });
            order.expr.write_sql(&mut sql, &mut params);
            sql.push(' ');
            sql.push_str(order.dir.as_sql());
        }

        Statement { sql, params }
    }
}

// =============================================================================
// Tests
// =============================================================================
