//! Statement-shaping leaf clauses.

use super::{Clause, MARKER, Ordering};
use crate::param::Param;

fn collect_columns(columns: impl IntoIterator<Item = impl Into<String>>) -> Vec<String> {
    columns.into_iter().map(Into::into).collect()
}

/// `SELECT c1, c2 FROM table`
#[derive(Debug, Clone)]
pub struct Select {
    table: String,
    columns: Vec<String>,
}

impl Select {
    pub fn new(table: impl Into<String>, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            table: table.into(),
            columns: collect_columns(columns),
        }
    }
}

impl Clause for Select {
    fn render(&self) -> String {
        format!("SELECT {} FROM {}", self.columns.join(", "), self.table)
    }

    fn parameters(&self) -> Vec<Param> {
        Vec::new()
    }
}

/// `INSERT INTO table`, to be followed by a `SELECT`.
#[derive(Debug, Clone)]
pub struct Insert {
    table: String,
}

impl Insert {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
        }
    }
}

impl Clause for Insert {
    fn render(&self) -> String {
        format!("INSERT INTO {}", self.table)
    }

    fn parameters(&self) -> Vec<Param> {
        Vec::new()
    }
}

/// `JOIN table ON table_id=table.id`
///
/// Follows the `<table>_id` foreign key naming convention of the schema.
#[derive(Debug, Clone)]
pub struct Join {
    table: String,
}

impl Join {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
        }
    }
}

impl Clause for Join {
    fn render(&self) -> String {
        let table = &self.table;
        format!("JOIN {table} ON {table}_id={table}.id")
    }

    fn parameters(&self) -> Vec<Param> {
        Vec::new()
    }
}

/// SQL text inserted verbatim.
///
/// The text must not contain `?`: the root would treat it as a marker.
#[derive(Debug, Clone)]
pub struct Raw {
    text: String,
}

impl Raw {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Clause for Raw {
    fn render(&self) -> String {
        self.text.clone()
    }

    fn parameters(&self) -> Vec<Param> {
        Vec::new()
    }
}

/// `ORDER BY c1, c2 ASC|DESC`
#[derive(Debug, Clone)]
pub struct Order {
    ordering: Ordering,
    columns: Vec<String>,
}

impl Order {
    pub fn new(ordering: Ordering, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            ordering,
            columns: collect_columns(columns),
        }
    }
}

impl Clause for Order {
    fn render(&self) -> String {
        format!(
            "ORDER BY {} {}",
            self.columns.join(", "),
            self.ordering.as_sql()
        )
    }

    fn parameters(&self) -> Vec<Param> {
        Vec::new()
    }
}

/// `GROUP BY c1, c2`
#[derive(Debug, Clone)]
pub struct Group {
    columns: Vec<String>,
}

impl Group {
    pub fn new(columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            columns: collect_columns(columns),
        }
    }
}

impl Clause for Group {
    fn render(&self) -> String {
        format!("GROUP BY {}", self.columns.join(", "))
    }

    fn parameters(&self) -> Vec<Param> {
        Vec::new()
    }
}

/// Pagination: `LIMIT ?` or `LIMIT ? OFFSET ?`.
///
/// `OFFSET` is omitted when the offset is not positive; the whole clause
/// vanishes when the limit is not positive.
#[derive(Debug, Clone, Copy)]
pub struct Page {
    limit: i64,
    offset: i64,
}

impl Page {
    pub fn new(limit: i64, offset: i64) -> Self {
        Self { limit, offset }
    }
}

impl Clause for Page {
    fn render(&self) -> String {
        match (self.limit > 0, self.offset > 0) {
            (false, _) => String::new(),
            (true, false) => format!("LIMIT {MARKER}"),
            (true, true) => format!("LIMIT {MARKER} OFFSET {MARKER}"),
        }
    }

    fn parameters(&self) -> Vec<Param> {
        match (self.limit > 0, self.offset > 0) {
            (false, _) => Vec::new(),
            (true, false) => vec![Param::new(self.limit)],
            (true, true) => vec![Param::new(self.limit), Param::new(self.offset)],
        }
    }
}
