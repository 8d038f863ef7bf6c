//! SQL compilation: expression AST and query builder.

pub mod expr;
pub mod query;

pub use expr::{lit, raw, CompareOp, Expr};
pub use query::{OrderByExpr, Query, Relation, SelectExpr, SortDir, Statement};
