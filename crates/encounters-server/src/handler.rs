//! Plumbing shared by the route handlers: run a query, wrap the decoded rows.

use axum::Json;
use encounters::clause::{Combinator, Compare, Query, WhereClause};
use encounters::tokio_postgres::Row;
use encounters::{DbResult, FromRow};
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// The `{"rows": [...]}` envelope every listing route answers with.
#[derive(Debug, Serialize)]
pub struct Rows<T> {
    pub rows: Vec<T>,
}

pub type RowsResponse<T> = ApiResult<Json<Rows<T>>>;

pub async fn fetch_rows<T>(state: &AppState, query: &Query) -> RowsResponse<T>
where
    T: FromRow + Serialize,
{
    let client = state.client().await?;
    let rows = query.fetch_all(&client).await?;
    Ok(Json(Rows { rows }))
}

/// Like [`fetch_rows`], decoding with a plain function instead of [`FromRow`].
pub async fn fetch_rows_with<T, F>(state: &AppState, query: &Query, decode: F) -> RowsResponse<T>
where
    T: Serialize,
    F: Fn(&Row) -> DbResult<T>,
{
    let client = state.client().await?;
    let rows = query.fetch_all_with(&client, decode).await?;
    Ok(Json(Rows { rows }))
}

/// Run an `{id}` lookup; an empty result is a 404.
pub async fn fetch_by_id<T, F>(state: &AppState, query: &Query, decode: F) -> RowsResponse<T>
where
    T: Serialize,
    F: Fn(&Row) -> DbResult<T>,
{
    let Json(Rows { rows }) = fetch_rows_with(state, query, decode).await?;
    Ok(Json(Rows {
        rows: require_rows(rows)?,
    }))
}

/// An `{id}` lookup that matched nothing is [`ApiError::NotFound`].
pub fn require_rows<T>(rows: Vec<T>) -> ApiResult<Vec<T>> {
    if rows.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(rows)
}

/// Parse the `{id}` path segment.
pub fn parse_id(raw: &str) -> ApiResult<i32> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid id: {raw}")))
}

/// Append `WHERE <column> = $n` to a base query.
pub fn with_id(query: Query, column: &str, id: i32) -> Query {
    query.with(WhereClause::new(Combinator::And).with(Compare::eq(column, id)))
}
