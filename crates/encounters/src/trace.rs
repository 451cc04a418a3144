//! SQL tracing.
//!
//! [`TracedClient`] wraps any [`GenericClient`] and emits the statement it is
//! about to run through `tracing` on the `encounters.sql` target.

use crate::client::GenericClient;
use crate::error::DbResult;
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;
use tracing::Level;

/// Settings for the SQL log line emitted before each statement.
#[derive(Debug, Clone)]
pub struct SqlTracer {
    /// Tracing event level to emit at.
    pub level: Level,
    /// Truncate long SQL strings (in bytes). `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for SqlTracer {
    fn default() -> Self {
        Self {
            level: Level::DEBUG,
            max_sql_length: Some(200),
        }
    }
}

impl SqlTracer {
    /// Create a tracer with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the tracing event level.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set maximum SQL length to display. Zero disables truncation.
    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = (len > 0).then_some(len);
        self
    }

    /// Disable SQL truncation.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    fn truncate_sql(&self, sql: &str) -> String {
        match self.max_sql_length {
            Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
            _ => sql.to_string(),
        }
    }

    /// Emit the log line for one statement.
    pub fn emit(&self, sql: &str, param_count: usize) {
        macro_rules! emit_at_level {
            ($level:expr, $($field:tt)*) => {
                match $level {
                    Level::ERROR => tracing::error!($($field)*),
                    Level::WARN  => tracing::warn!($($field)*),
                    Level::INFO  => tracing::info!($($field)*),
                    Level::DEBUG => tracing::debug!($($field)*),
                    Level::TRACE => tracing::trace!($($field)*),
                }
            };
        }

        let sql = self.truncate_sql(sql);
        emit_at_level!(self.level, target: "encounters.sql", param_count, sql = %sql);
    }
}

fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

/// A client that logs every statement before delegating to the wrapped one.
pub struct TracedClient<C> {
    client: C,
    tracer: SqlTracer,
}

impl<C: GenericClient> TracedClient<C> {
    /// Wrap a client with the default tracer.
    pub fn new(client: C) -> Self {
        Self::with_tracer(client, SqlTracer::default())
    }

    /// Wrap a client with explicit tracer settings.
    pub fn with_tracer(client: C, tracer: SqlTracer) -> Self {
        Self { client, tracer }
    }

    /// The wrapped client.
    pub fn inner(&self) -> &C {
        &self.client
    }

    /// Mutable access to the wrapped client, e.g. to open a transaction.
    pub fn inner_mut(&mut self) -> &mut C {
        &mut self.client
    }

    /// The tracer settings in use.
    pub fn tracer(&self) -> &SqlTracer {
        &self.tracer
    }
}

impl<C: GenericClient> GenericClient for TracedClient<C> {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> DbResult<Vec<Row>> {
        self.tracer.emit(sql, params.len());
        let result = self.client.query(sql, params).await;
        if let Err(err) = &result {
            tracing::warn!(target: "encounters.sql", error = %err, "query failed");
        }
        result
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> DbResult<u64> {
        self.tracer.emit(sql, params.len());
        let result = self.client.execute(sql, params).await;
        if let Err(err) = &result {
            tracing::warn!(target: "encounters.sql", error = %err, "statement failed");
        }
        result
    }
}
