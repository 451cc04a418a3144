use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;

/// Default number of rows per page on paginated routes.
pub const DEFAULT_PAGE_SIZE: i64 = 6;

/// Server settings, read from flags or the environment.
///
/// A `.env` file in the working directory is loaded before parsing, so any
/// of the `env` names below can live there.
#[derive(Parser, Debug, Clone)]
#[command(name = "encounters-server")]
#[command(about = "Read-only REST API over the fatal encounters database")]
pub struct ServerConfig {
    /// Postgres connection string.
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Bind address for the HTTP server.
    #[arg(short, long, default_value = "0.0.0.0", env = "ENCOUNTERS_BIND")]
    pub bind: String,

    /// HTTP port to listen on.
    #[arg(short, long, default_value_t = 3000, env = "ENCOUNTERS_PORT")]
    pub port: u16,

    /// Maximum number of pooled database connections.
    #[arg(long, default_value_t = 16, env = "ENCOUNTERS_POOL_SIZE")]
    pub pool_size: usize,

    /// Rows per page when a request carries no `count`.
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, env = "ENCOUNTERS_PAGE_SIZE")]
    pub page_size: i64,

    /// Truncate logged SQL to this many bytes (0 = never truncate).
    #[arg(long, default_value_t = 200, env = "ENCOUNTERS_LOG_SQL_LENGTH")]
    pub log_sql_length: usize,
}

impl ServerConfig {
    /// Load `.env` (if present) and parse flags and environment.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::parse()
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.bind, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.bind, self.port))
    }
}
