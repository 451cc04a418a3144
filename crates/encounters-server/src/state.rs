use deadpool_postgres::{Client, Pool};
use encounters::{SqlTracer, TracedClient};

use crate::config::ServerConfig;
use crate::error::ApiResult;

/// Shared by every handler through `State<Arc<AppState>>`.
pub struct AppState {
    pub pool: Pool,
    /// `count` used when a paginated request does not name one.
    pub page_size: i64,
    pub tracer: SqlTracer,
}

impl AppState {
    pub fn new(pool: Pool, config: &ServerConfig) -> Self {
        Self {
            pool,
            page_size: config.page_size,
            tracer: SqlTracer::new().max_sql_length(config.log_sql_length),
        }
    }

    /// Check a connection out of the pool, wrapped for SQL logging.
    pub async fn client(&self) -> ApiResult<TracedClient<Client>> {
        let client = self.pool.get().await?;
        Ok(TracedClient::with_tracer(client, self.tracer.clone()))
    }
}
