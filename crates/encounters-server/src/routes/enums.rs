//! Lookup tables that are just `id, name`: agency, cause, county, race, use_of_force.

use std::sync::Arc;

use axum::extract::State;
use encounters::clause::{Query, Select};
use encounters::tokio_postgres::Row;
use encounters::{DbResult, FromRow, RowExt};
use serde::Serialize;

use crate::handler::{self, RowsResponse};
use crate::state::AppState;

pub const TABLES: [&str; 5] = ["agency", "cause", "county", "race", "use_of_force"];

#[derive(Debug, Clone, Serialize)]
pub struct Named {
    pub id: i32,
    pub name: String,
}

impl FromRow for Named {
    fn from_row(row: &Row) -> DbResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            name: row.try_get_column("name")?,
        })
    }
}

pub fn list_query(table: &str) -> Query {
    Query::new().with(Select::new(table, ["id", "name"]))
}

pub async fn list(State(state): State<Arc<AppState>>, table: &'static str) -> RowsResponse<Named> {
    handler::fetch_rows(&state, &list_query(table)).await
}
