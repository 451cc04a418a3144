//! `/state` and `/state/{id}`.

use std::sync::Arc;

use axum::extract::{Path, State};
use encounters::clause::{Combinator, Compare, Order, Ordering, Query, Select, TextSearch, WhereClause};
use encounters::tokio_postgres::Row;
use encounters::{DbResult, FromRow, RowExt};
use serde::Serialize;

use crate::handler::{self, RowsResponse};
use crate::params::{QueryString, page_clause};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UsState {
    pub id: i32,
    pub name: String,
    pub shortname: String,
}

impl FromRow for UsState {
    fn from_row(row: &Row) -> DbResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            name: row.try_get_column("name")?,
            shortname: row.try_get_column("shortname")?,
        })
    }
}

fn select() -> Select {
    Select::new("state", ["id", "name", "shortname"])
}

/// A search matches on name; a two-letter term may also be an abbreviation.
fn search_where(qs: &QueryString) -> WhereClause {
    let mut clause = WhereClause::new(Combinator::Or);
    if let Some(term) = qs.first("search") {
        clause.push(TextSearch::new("name", term));
        if term.chars().count() == 2 {
            clause.push(Compare::eq("shortname", term.to_uppercase()));
        }
    }
    clause
}

pub fn list_query(qs: &QueryString, page_size: i64) -> Query {
    Query::new()
        .with(select())
        .with(search_where(qs))
        .with(Order::new(Ordering::Ascending, ["name"]))
        .with(page_clause(qs, page_size))
}

pub async fn list(State(state): State<Arc<AppState>>, qs: QueryString) -> RowsResponse<UsState> {
    let query = list_query(&qs, state.page_size);
    handler::fetch_rows(&state, &query).await
}

pub async fn by_id(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> RowsResponse<UsState> {
    let id = handler::parse_id(&id)?;
    let query = handler::with_id(Query::new().with(select()), "id", id);
    handler::fetch_by_id(&state, &query, UsState::from_row).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn built(raw: &str) -> (String, String) {
        let built = list_query(&QueryString::parse(raw), 6).build();
        (built.sql, format!("{:?}", built.params))
    }

    #[test]
    fn two_letter_search_also_matches_shortname() {
        let (sql, params) = built("search=tx");
        assert_eq!(
            sql,
            "SELECT id, name, shortname FROM state \
             WHERE name ILIKE '%' || $1 || '%' OR shortname = $2 ORDER BY name ASC LIMIT $3"
        );
        assert_eq!(params, r#"["tx", "TX", 6]"#);
    }

    #[test]
    fn longer_search_is_name_only() {
        let (sql, params) = built("search=texas&count=3");
        assert_eq!(
            sql,
            "SELECT id, name, shortname FROM state WHERE name ILIKE '%' || $1 || '%' ORDER BY name ASC LIMIT $2"
        );
        assert_eq!(params, r#"["texas", 3]"#);
    }

    #[test]
    fn no_search_no_where() {
        let (sql, _) = built("");
        assert_eq!(sql, "SELECT id, name, shortname FROM state ORDER BY name ASC LIMIT $1");
    }
}
