//! Expression AST for query compilation.
//!
//! Column definitions contribute raw SQL fragments (aggregates, CASE
//! expressions, strftime calls); filter values enter as bound parameters,
//! never spliced into the SQL text.

use crate::value::Value;

// =============================================================================
// Expression AST
// =============================================================================

/// A SQL expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Raw SQL fragment taken from a trusted column definition.
    ///
    /// Never build one of these from user input; bind user values with
    /// [`Expr::Literal`] instead.
    Raw(String),

    /// A bound literal, emitted as a `?` placeholder.
    Literal(Value),

    /// Comparison: left op right.
    Binary {
        left: Box<Expr>,
        op: CompareOp,
        right: Box<Expr>,
    },

    /// Membership: expr IN (values...). An empty list is always false.
    InList { expr: Box<Expr>, values: Vec<Value> },
}

/// Comparison operators accepted in basic filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    Like,
}

impl CompareOp {
    /// Parse an operator as written in a filter ("=", ">=", "like", ...).
    pub fn parse(operator: &str) -> Option<CompareOp> {
        match operator.trim().to_ascii_lowercase().as_str() {
            "=" | "==" => Some(CompareOp::Eq),
            "!=" | "<>" => Some(CompareOp::Ne),
            "<" => Some(CompareOp::Lt),
            "<=" => Some(CompareOp::Lte),
            ">" => Some(CompareOp::Gt),
            ">=" => Some(CompareOp::Gte),
            "like" => Some(CompareOp::Like),
            _ => None,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::Like => "LIKE",
        }
    }
}

// =============================================================================
// Constructors
// =============================================================================

/// A raw SQL fragment.
pub fn raw(fragment: impl Into<String>) -> Expr {
    Expr::Raw(fragment.into())
}

/// A bound literal.
pub fn lit(value: impl Into<Value>) -> Expr {
    Expr::Literal(value.into())
}

impl Expr {
    /// Compare this expression against another.
    pub fn binary(self, op: CompareOp, right: Expr) -> Expr {
        Expr::Binary {
            left: Box::new(self),
            op,
            right: Box::new(right),
        }
    }

    /// Test membership of this expression in a value list.
    pub fn in_list(self, values: Vec<Value>) -> Expr {
        Expr::InList {
            expr: Box::new(self),
            values,
        }
    }

    /// Append this expression's SQL to `sql`, pushing bound values onto
    /// `params` in placeholder order.
    pub(crate) fn write_sql(&self, sql: &mut String, params: &mut Vec<Value>) {
        match self {
            Expr::Raw(fragment) => sql.push_str(fragment),

            Expr::Literal(value) => {
                sql.push('?');
                params.push(value.clone());
            }

            Expr::Binary { left, op, right } => {
                left.write_sql(sql, params);
                sql.push(' ');
                sql.push_str(op.as_sql());
                sql.push(' ');
                right.write_sql(sql, params);
            }

            Expr::InList { expr, values } => {
                if values.is_empty() {
                    sql.push_str("1 = 0");
                    return;
                }
                expr.write_sql(sql, params);
                sql.push_str(" IN (");
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        sql.push_str(", ");
                    }
                    sql.push('?');
                    params.push(value.clone());
                }
                sql.push(')');
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
