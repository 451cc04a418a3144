//! `/incident` and its sub-routes.

pub mod counts;
pub mod detail;
pub mod filter;
pub mod position;

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use encounters::TracedClient;

use crate::error::ApiResult;
use crate::handler::{self, RowsResponse};
use crate::params::QueryString;
use crate::state::AppState;

/// Ids of the incidents matching the filter, in the requested order.
pub async fn list(State(state): State<Arc<AppState>>, qs: QueryString) -> RowsResponse<i32> {
    handler::fetch_rows(&state, &filter::filtered_ids(&qs)).await
}

pub async fn positions(State(state): State<Arc<AppState>>) -> RowsResponse<position::Positioned> {
    handler::fetch_rows(&state, &position::query()).await
}

pub async fn by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> RowsResponse<detail::Detail> {
    let id = handler::parse_id(&id)?;
    let query = handler::with_id(detail::query(), "incident.id", id);
    handler::fetch_by_id(&state, &query, detail::decode).await
}

pub async fn count(
    State(state): State<Arc<AppState>>,
    qs: QueryString,
) -> ApiResult<Json<counts::Counts>> {
    let mut client = state.client().await?;
    let tracer = client.tracer().clone();
    let counts = encounters::transaction!(client.inner_mut(), tx, {
        let traced = TracedClient::with_tracer(&tx, tracer);
        counts::collect(&traced, &qs).await
    })?;
    Ok(Json(counts))
}
