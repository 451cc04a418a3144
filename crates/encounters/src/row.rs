//! Row mapping traits and utilities

use crate::error::{DbError, DbResult};
use tokio_postgres::Row;
use tokio_postgres::types::FromSql;

/// Trait for types that can be constructed from a database row
pub trait FromRow: Sized {
    /// Convert a database row into Self
    fn from_row(row: &Row) -> DbResult<Self>;
}

/// Single-column rows decode straight into the scalar.
macro_rules! impl_from_row_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromRow for $ty {
                fn from_row(row: &Row) -> DbResult<Self> {
                    row.try_get_index(0)
                }
            }
        )*
    };
}

impl_from_row_scalar!(bool, i16, i32, i64, f32, f64, String);

/// Extension trait for Row to provide typed access
pub trait RowExt {
    /// Try to get a column value by name, returning DbError::Decode on failure
    fn try_get_column<T>(&self, column: &str) -> DbResult<T>
    where
        T: for<'a> FromSql<'a>;

    /// Try to get a column value by position.
    ///
    /// Joined selects repeat column names (`cause.id`, `race.id` both come
    /// back as `id`), so decoders for those rows read by index.
    fn try_get_index<T>(&self, idx: usize) -> DbResult<T>
    where
        T: for<'a> FromSql<'a>;
}

impl RowExt for Row {
    fn try_get_column<T>(&self, column: &str) -> DbResult<T>
    where
        T: for<'a> FromSql<'a>,
    {
        self.try_get(column)
            .map_err(|e| DbError::decode(column, e.to_string()))
    }

    fn try_get_index<T>(&self, idx: usize) -> DbResult<T>
    where
        T: for<'a> FromSql<'a>,
    {
        self.try_get(idx).map_err(|e| {
            let column = self
                .columns()
                .get(idx)
                .map(|c| c.name().to_string())
                .unwrap_or_else(|| format!("#{idx}"));
            DbError::decode(column, e.to_string())
        })
    }
}
