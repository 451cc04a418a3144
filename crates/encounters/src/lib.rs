//! # encounters
//!
//! Composable SQL clause trees for Postgres, plus the small execution layer
//! that runs them.
//!
//! A query is a tree of [`Clause`]s. Every clause renders a SQL fragment with
//! `?` markers and hands back the parameters behind those markers, in order.
//! Optional pieces of a query simply render nothing: an `IN` with no values,
//! a search with an empty term or a `WHERE` whose conditions all vanished
//! leave no keywords behind. [`Query::build`] numbers the markers `$1..$n`.
//!
//! ```ignore
//! use encounters::clause::*;
//!
//! let query = Query::new()
//!     .with(Select::new("city", ["id", "name", "state"]))
//!     .with(
//!         WhereClause::new(Combinator::And)
//!             .with(In::new("state", state_ids))
//!             .with(TextSearch::new("name", term)),
//!     )
//!     .with(Order::new(Ordering::Ascending, ["name", "state"]))
//!     .with(Page::new(6, 0));
//!
//! let cities: Vec<City> = query.fetch_all(&client).await?;
//! ```

pub mod clause;
pub mod client;
pub mod error;
mod exec;
pub mod param;
pub mod row;
pub mod trace;
pub mod transaction;

#[cfg(feature = "pool")]
pub mod pool;

pub use clause::{BuiltQuery, Clause, Query};
pub use client::GenericClient;
pub use error::{DbError, DbResult};
pub use param::{BindValue, Param};
pub use row::{FromRow, RowExt};
pub use trace::{SqlTracer, TracedClient};

#[cfg(feature = "pool")]
pub use pool::{create_pool, create_pool_with_config};

#[cfg(feature = "pool")]
pub use deadpool_postgres;
pub use tokio_postgres;
