//! Running built queries against a [`GenericClient`].

use crate::clause::Query;
use crate::client::GenericClient;
use crate::error::{DbError, DbResult};
use crate::row::FromRow;
use tokio_postgres::Row;

impl Query {
    /// Execute and return raw rows.
    pub async fn fetch_rows(&self, conn: &impl GenericClient) -> DbResult<Vec<Row>> {
        let built = self.build();
        conn.query(&built.sql, &built.params_ref()).await
    }

    /// Execute and decode every row into `T`.
    ///
    /// The first decode failure aborts the whole call.
    pub async fn fetch_all<T: FromRow>(&self, conn: &impl GenericClient) -> DbResult<Vec<T>> {
        self.fetch_all_with(conn, T::from_row).await
    }

    /// Execute and decode every row with a plain function.
    pub async fn fetch_all_with<T, F>(&self, conn: &impl GenericClient, decode: F) -> DbResult<Vec<T>>
    where
        F: Fn(&Row) -> DbResult<T>,
    {
        let rows = self.fetch_rows(conn).await?;
        rows.iter().map(decode).collect()
    }

    /// Execute and decode the first row, if any.
    pub async fn fetch_opt<T: FromRow>(&self, conn: &impl GenericClient) -> DbResult<Option<T>> {
        let built = self.build();
        conn.query_opt(&built.sql, &built.params_ref())
            .await?
            .as_ref()
            .map(T::from_row)
            .transpose()
    }

    /// Execute and decode exactly one row; no row is [`DbError::NotFound`].
    pub async fn fetch_one<T: FromRow>(&self, conn: &impl GenericClient) -> DbResult<T> {
        self.fetch_opt(conn)
            .await?
            .ok_or_else(|| DbError::not_found("query returned no rows"))
    }

    /// Execute a statement and return the number of affected rows.
    pub async fn execute(&self, conn: &impl GenericClient) -> DbResult<u64> {
        let built = self.build();
        conn.execute(&built.sql, &built.params_ref()).await
    }
}
