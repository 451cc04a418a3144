//! Composite clauses: ordered children joined by a connector.

use super::{Clause, Combinator};
use crate::param::Param;

/// An ordered list of clauses joined by a connector string.
///
/// Children that render to the empty string are skipped when joining, so
/// there are never leading, trailing or doubled connectors.
pub struct Subexpression {
    connector: String,
    parts: Vec<Box<dyn Clause>>,
}

impl Subexpression {
    pub fn new(connector: impl Into<String>) -> Self {
        Self {
            connector: connector.into(),
            parts: Vec::new(),
        }
    }

    /// Append a clause. An absent (`None`) clause renders nothing.
    pub fn push<C: Clause + 'static>(&mut self, clause: C) -> &mut Self {
        self.parts.push(Box::new(clause));
        self
    }

    /// Chainable form of [`Subexpression::push`].
    pub fn with<C: Clause + 'static>(mut self, clause: C) -> Self {
        self.push(clause);
        self
    }

    /// Append every clause from an iterator.
    pub fn extend<C: Clause + 'static>(&mut self, clauses: impl IntoIterator<Item = C>) -> &mut Self {
        for clause in clauses {
            self.push(clause);
        }
        self
    }

    /// Number of children pushed, including ones that will vanish.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl Clause for Subexpression {
    fn render(&self) -> String {
        let parts: Vec<String> = self
            .parts
            .iter()
            .map(|part| part.render())
            .filter(|text| !text.is_empty())
            .collect();
        parts.join(&self.connector)
    }

    fn parameters(&self) -> Vec<Param> {
        self.parts.iter().flat_map(|part| part.parameters()).collect()
    }
}

/// A parenthesized `AND`/`OR` group, for nesting inside a WHERE.
///
/// Renders `(a AND b)`, or nothing at all when every child vanished.
pub struct ConditionsClause {
    expr: Subexpression,
}

impl ConditionsClause {
    pub fn new(combinator: Combinator) -> Self {
        Self {
            expr: Subexpression::new(combinator.as_sql()),
        }
    }

    pub fn push<C: Clause + 'static>(&mut self, clause: C) -> &mut Self {
        self.expr.push(clause);
        self
    }

    pub fn with<C: Clause + 'static>(mut self, clause: C) -> Self {
        self.expr.push(clause);
        self
    }
}

impl Clause for ConditionsClause {
    fn render(&self) -> String {
        let inner = self.expr.render();
        if inner.is_empty() {
            return String::new();
        }
        format!("({inner})")
    }

    fn parameters(&self) -> Vec<Param> {
        self.expr.parameters()
    }
}

/// A `WHERE` clause whose children are joined with `AND` or `OR`.
///
/// Renders nothing when every child vanished, so a query with no active
/// filters has no `WHERE` keyword at all.
pub struct WhereClause {
    expr: Subexpression,
}

impl WhereClause {
    pub fn new(combinator: Combinator) -> Self {
        Self {
            expr: Subexpression::new(combinator.as_sql()),
        }
    }

    pub fn push<C: Clause + 'static>(&mut self, clause: C) -> &mut Self {
        self.expr.push(clause);
        self
    }

    pub fn with<C: Clause + 'static>(mut self, clause: C) -> Self {
        self.expr.push(clause);
        self
    }
}

impl Clause for WhereClause {
    fn render(&self) -> String {
        let expr = self.expr.render();
        if expr.is_empty() {
            return String::new();
        }
        format!("WHERE {expr}")
    }

    fn parameters(&self) -> Vec<Param> {
        self.expr.parameters()
    }
}
