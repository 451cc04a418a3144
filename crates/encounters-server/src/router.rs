//! Route table.
//!
//! ```text
//! /                     welcome text
//! /health               database round-trip
//! /city, /city/{id}
//! /state, /state/{id}
//! /agency /cause /county /race /use_of_force
//! /incident             filtered ids
//! /incident/position    coordinates
//! /incident/count       histograms for the filter
//! /incident/{id}        detail
//! ```

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Router, middleware};

use crate::logging;
use crate::routes::{self, city, enums, incident, state};
use crate::state::AppState;

pub fn build_router(app_state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .route("/", get(routes::root))
        .route("/health", get(routes::health))
        .route("/city", get(city::list))
        .route("/city/{id}", get(city::by_id))
        .route("/state", get(state::list))
        .route("/state/{id}", get(state::by_id))
        .route("/incident", get(incident::list))
        .route("/incident/position", get(incident::positions))
        .route("/incident/count", get(incident::count))
        .route("/incident/{id}", get(incident::by_id));

    for table in enums::TABLES {
        router = router.route(
            &format!("/{table}"),
            get(move |state: State<Arc<AppState>>| enums::list(state, table)),
        );
    }

    router
        .layer(middleware::from_fn(logging::log_request))
        .with_state(app_state)
}
