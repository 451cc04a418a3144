//! `/city` and `/city/{id}`.

use std::sync::Arc;

use axum::extract::{Path, State};
use encounters::clause::{
    Combinator, In, Order, Ordering, Query, Select, TextSearch, WhereClause,
};
use encounters::tokio_postgres::Row;
use encounters::{DbResult, FromRow, RowExt};
use serde::Serialize;

use crate::handler::{self, RowsResponse};
use crate::params::{QueryString, page_clause};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct City {
    pub id: i32,
    pub name: String,
    pub state: i32,
}

impl FromRow for City {
    fn from_row(row: &Row) -> DbResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            name: row.try_get_column("name")?,
            state: row.try_get_column("state")?,
        })
    }
}

/// Which of the two optional city filters a request turns on.
#[derive(Debug, PartialEq)]
pub enum CityFilter {
    None,
    State(Vec<i32>),
    Name(String),
    Both { states: Vec<i32>, name: String },
}

impl CityFilter {
    pub fn from_query(qs: &QueryString) -> Self {
        let states = qs.ints("state");
        let name = qs.first("search").filter(|term| !term.is_empty());
        match (states.is_empty(), name) {
            (true, None) => Self::None,
            (false, None) => Self::State(states),
            (true, Some(name)) => Self::Name(name.to_string()),
            (false, Some(name)) => Self::Both {
                states,
                name: name.to_string(),
            },
        }
    }

    fn where_clause(self) -> Option<WhereClause> {
        let clause = WhereClause::new(Combinator::And);
        match self {
            Self::None => None,
            Self::State(states) => Some(clause.with(In::new("state", states))),
            Self::Name(name) => Some(clause.with(TextSearch::new("name", name))),
            Self::Both { states, name } => Some(
                clause
                    .with(In::new("state", states))
                    .with(TextSearch::new("name", name)),
            ),
        }
    }
}

fn select() -> Select {
    Select::new("city", ["id", "name", "state"])
}

pub fn list_query(qs: &QueryString, page_size: i64) -> Query {
    Query::new()
        .with(select())
        .with(CityFilter::from_query(qs).where_clause())
        .with(Order::new(Ordering::Ascending, ["name", "state"]))
        .with(page_clause(qs, page_size))
}

pub async fn list(State(state): State<Arc<AppState>>, qs: QueryString) -> RowsResponse<City> {
    let query = list_query(&qs, state.page_size);
    handler::fetch_rows(&state, &query).await
}

pub async fn by_id(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> RowsResponse<City> {
    let id = handler::parse_id(&id)?;
    let query = handler::with_id(Query::new().with(select()), "id", id);
    handler::fetch_by_id(&state, &query, City::from_row).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn built(raw: &str) -> (String, String) {
        let query = list_query(&QueryString::parse(raw), 6);
        let built = query.build();
        (built.sql, format!("{:?}", built.params))
    }

    #[test]
    fn filter_selection() {
        assert_eq!(CityFilter::from_query(&QueryString::default()), CityFilter::None);
        assert_eq!(
            CityFilter::from_query(&QueryString::parse("state=5&search=")),
            CityFilter::State(vec![5])
        );
        assert_eq!(
            CityFilter::from_query(&QueryString::parse("search=aus&state=x")),
            CityFilter::Name("aus".to_string())
        );
        assert_eq!(
            CityFilter::from_query(&QueryString::parse("search=aus&state=44,45")),
            CityFilter::Both {
                states: vec![44, 45],
                name: "aus".to_string()
            }
        );
    }

    #[test]
    fn unfiltered_list() {
        let (sql, params) = built("");
        assert_eq!(sql, "SELECT id, name, state FROM city ORDER BY name, state ASC LIMIT $1");
        assert_eq!(params, "[6]");
    }

    #[test]
    fn state_and_name_filters() {
        let (sql, params) = built("state=44&search=aus&count=10&page=2");
        assert_eq!(
            sql,
            "SELECT id, name, state FROM city WHERE state IN ($1) AND name ILIKE '%' || $2 || '%' \
             ORDER BY name, state ASC LIMIT $3 OFFSET $4"
        );
        assert_eq!(params, r#"[44, "aus", 10, 20]"#);
    }

    #[test]
    fn name_only() {
        let (sql, params) = built("search=port");
        assert_eq!(
            sql,
            "SELECT id, name, state FROM city WHERE name ILIKE '%' || $1 || '%' ORDER BY name, state ASC LIMIT $2"
        );
        assert_eq!(params, r#"["port", 6]"#);
    }
}
