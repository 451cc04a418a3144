//! The root of a clause tree and placeholder numbering.

use std::fmt::Write;

use super::{Clause, MARKER, Subexpression};
use crate::param::{Param, params_ref};
use tokio_postgres::types::ToSql;

/// A full statement: top-level clauses joined by a single space.
///
/// [`Query::build`] resolves the `?` markers to `$1, $2, ...`. Used as a
/// [`Clause`] (for example inside a [`Subquery`](super::Subquery)) a query
/// renders its markers unresolved, so the outermost query numbers the whole
/// tree exactly once.
pub struct Query {
    expr: Subexpression,
}

impl Default for Query {
    fn default() -> Self {
        Self::new()
    }
}

impl Query {
    /// Create an empty query.
    pub fn new() -> Self {
        Self {
            expr: Subexpression::new(" "),
        }
    }

    /// Add a top-level clause.
    pub fn push<C: Clause + 'static>(&mut self, clause: C) -> &mut Self {
        self.expr.push(clause);
        self
    }

    /// Chainable form of [`Query::push`].
    pub fn with<C: Clause + 'static>(mut self, clause: C) -> Self {
        self.expr.push(clause);
        self
    }

    /// Render the final SQL and collect its parameters.
    ///
    /// Every `?` in the rendered text counts as a marker, including one
    /// inside [`Raw`](super::Raw) text or a string literal. Such a `?` takes
    /// the number meant for the next real marker.
    pub fn build(&self) -> BuiltQuery {
        let params = self.expr.parameters();
        let sql = number_placeholders(&self.expr.render(), params.len());
        BuiltQuery { sql, params }
    }

    /// Debug helper to get the final SQL string.
    pub fn to_sql(&self) -> String {
        self.build().sql
    }
}

impl Clause for Query {
    fn render(&self) -> String {
        self.expr.render()
    }

    fn parameters(&self) -> Vec<Param> {
        self.expr.parameters()
    }
}

/// The result of building a query: SQL with `$n` placeholders plus the
/// parameters they refer to.
#[derive(Debug, Clone)]
pub struct BuiltQuery {
    pub sql: String,
    pub params: Vec<Param>,
}

impl BuiltQuery {
    /// Get parameters as references for tokio-postgres.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        params_ref(&self.params)
    }
}

/// Replace markers left to right with `$1..$count`.
///
/// Markers past `count` have no parameter behind them and are kept as-is.
fn number_placeholders(sql: &str, count: usize) -> String {
    let mut out = String::with_capacity(sql.len() + count * 2);
    let mut idx = 0;
    for ch in sql.chars() {
        if ch == MARKER && idx < count {
            idx += 1;
            let _ = write!(out, "${idx}");
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_markers_in_order() {
        assert_eq!(number_placeholders("a = ? AND b IN (?, ?)", 3), "a = $1 AND b IN ($2, $3)");
    }

    #[test]
    fn counts_past_nine() {
        let sql = vec!["?"; 11].join(",");
        let numbered = number_placeholders(&sql, 11);
        assert!(numbered.ends_with("$10,$11"));
    }

    #[test]
    fn leaves_extra_markers_alone() {
        assert_eq!(number_placeholders("a = ? AND b ? 'k'", 1), "a = $1 AND b ? 'k'");
    }

    #[test]
    fn no_parameters_no_change() {
        assert_eq!(number_placeholders("SELECT 1", 0), "SELECT 1");
    }
}
