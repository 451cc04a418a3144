pub mod city;
pub mod enums;
pub mod incident;
pub mod state;

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use encounters::clause::{Query, Raw};
use serde_json::{Value, json};

use crate::state::AppState;

pub async fn root() -> &'static str {
    "welcome"
}

/// `{"status":"ok"}` once a `SELECT 1` round-trips; 503 otherwise.
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    let ping = async {
        let client = state.client().await?;
        Query::new()
            .with(Raw::new("SELECT 1"))
            .fetch_all::<i32>(&client)
            .await?;
        Ok::<_, crate::error::ApiError>(())
    };
    match ping.await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(err) => {
            tracing::warn!(error = %err, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable" })),
            )
        }
    }
}
