//! Transaction helper macro.
//!
//! A transaction (`tokio_postgres::Transaction` or
//! `deadpool_postgres::Transaction`) is itself a [`GenericClient`](crate::GenericClient),
//! so queries run inside one exactly as they would on a pooled connection.
//!
//! # Example
//!
//! ```ignore
//! let mut client = pool.get().await?;
//! let ids: Vec<i32> = encounters::transaction!(&mut client, tx, {
//!     Query::new().with(Raw::new("DROP TABLE IF EXISTS filtered")).execute(&tx).await?;
//!     Query::new().with(Raw::new("SELECT id FROM filtered")).fetch_all(&tx).await
//! })?;
//! ```

/// Runs the given block inside a database transaction.
///
/// - Begins a transaction via `$client.transaction().await`.
/// - Commits on `Ok(_)`.
/// - Rolls back on `Err(_)`.
///
/// The block must evaluate to `encounters::DbResult<T>`.
#[macro_export]
macro_rules! transaction {
    ($client:expr, $tx:ident, $body:block) => {{
        let $tx = ($client)
            .transaction()
            .await
            .map_err($crate::DbError::from_db_error)?;

        let __encounters_tx_result: $crate::DbResult<_> = async { $body }.await;
        match __encounters_tx_result {
            Ok(value) => {
                $tx.commit()
                    .await
                    .map_err($crate::DbError::from_db_error)?;
                Ok::<_, $crate::DbError>(value)
            }
            Err(error) => match $tx.rollback().await {
                Ok(()) => Err(error),
                Err(rollback_err) => Err($crate::DbError::Other(format!(
                    "{error} (rollback failed: {rollback_err})"
                ))),
            },
        }
    }};
}
