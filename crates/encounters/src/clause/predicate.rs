//! Predicate clauses that carry bind values.

use super::{Clause, Comparator, MARKER, markers};
use crate::param::{BindValue, Param};

/// `col IN (?, ?, ...)`. Vanishes when there are no values.
#[derive(Debug, Clone)]
pub struct In {
    column: String,
    values: Vec<Param>,
}

impl In {
    pub fn new<T: BindValue + 'static>(
        column: impl Into<String>,
        values: impl IntoIterator<Item = T>,
    ) -> Self {
        Self {
            column: column.into(),
            values: values.into_iter().map(Param::new).collect(),
        }
    }
}

impl Clause for In {
    fn render(&self) -> String {
        if self.values.is_empty() {
            return String::new();
        }
        format!("{} IN ({})", self.column, markers(self.values.len()))
    }

    fn parameters(&self) -> Vec<Param> {
        self.values.clone()
    }
}

/// `col <op> ?`
#[derive(Debug, Clone)]
pub struct Compare {
    comparator: Comparator,
    column: String,
    value: Param,
}

impl Compare {
    pub fn new<T: BindValue + 'static>(
        comparator: Comparator,
        column: impl Into<String>,
        value: T,
    ) -> Self {
        Self {
            comparator,
            column: column.into(),
            value: Param::new(value),
        }
    }

    /// Shorthand for `Compare::new(Comparator::Equal, ..)`.
    pub fn eq<T: BindValue + 'static>(column: impl Into<String>, value: T) -> Self {
        Self::new(Comparator::Equal, column, value)
    }
}

impl Clause for Compare {
    fn render(&self) -> String {
        format!("{} {} {MARKER}", self.column, self.comparator.as_sql())
    }

    fn parameters(&self) -> Vec<Param> {
        vec![self.value.clone()]
    }
}

/// Case-insensitive substring match: `col ILIKE '%' || ? || '%'`.
///
/// Vanishes when the search term is empty.
#[derive(Debug, Clone)]
pub struct TextSearch {
    column: String,
    term: String,
}

impl TextSearch {
    pub fn new(column: impl Into<String>, term: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            term: term.into(),
        }
    }
}

impl Clause for TextSearch {
    fn render(&self) -> String {
        if self.term.is_empty() {
            return String::new();
        }
        format!("{} ILIKE '%' || {MARKER} || '%'", self.column)
    }

    fn parameters(&self) -> Vec<Param> {
        if self.term.is_empty() {
            return Vec::new();
        }
        vec![Param::new(self.term.clone())]
    }
}

/// `NOT <inner>`. Vanishes with its inner clause.
pub struct Not {
    inner: Box<dyn Clause>,
}

impl Not {
    pub fn new(inner: impl Clause + 'static) -> Self {
        Self {
            inner: Box::new(inner),
        }
    }
}

impl Clause for Not {
    fn render(&self) -> String {
        let inner = self.inner.render();
        if inner.is_empty() {
            return String::new();
        }
        format!("NOT {inner}")
    }

    fn parameters(&self) -> Vec<Param> {
        self.inner.parameters()
    }
}

/// `(<inner>)`
///
/// Never vanishes: an empty inner clause renders `()`, so only wrap clauses
/// that always produce text (a [`Query`](super::Query), a select).
pub struct Subquery {
    inner: Box<dyn Clause>,
}

impl Subquery {
    pub fn new(inner: impl Clause + 'static) -> Self {
        Self {
            inner: Box::new(inner),
        }
    }
}

impl Clause for Subquery {
    fn render(&self) -> String {
        format!("({})", self.inner.render())
    }

    fn parameters(&self) -> Vec<Param> {
        self.inner.parameters()
    }
}
