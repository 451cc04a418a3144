//! Bind values carried alongside rendered clause text.

use std::fmt;
use std::sync::Arc;
use tokio_postgres::types::ToSql;

/// A value that can be bound to a `$n` placeholder.
///
/// Anything `tokio-postgres` can encode qualifies, as long as it is also
/// `Debug` (so parameters can be logged and asserted on) and thread-safe.
pub trait BindValue: ToSql + fmt::Debug + Send + Sync {
    /// View the value as the trait object `tokio-postgres` expects.
    fn as_to_sql(&self) -> &(dyn ToSql + Sync);
}

impl<T> BindValue for T
where
    T: ToSql + fmt::Debug + Send + Sync,
{
    fn as_to_sql(&self) -> &(dyn ToSql + Sync) {
        self
    }
}

/// A clone-friendly bind parameter.
///
/// Clauses hand out their parameters on every `parameters()` call, so the
/// value sits behind an `Arc` and cloning never copies it.
#[derive(Clone)]
pub struct Param(Arc<dyn BindValue>);

impl Param {
    /// Wrap any bindable value.
    pub fn new<T: BindValue + 'static>(value: T) -> Self {
        Param(Arc::new(value))
    }

    /// Get a reference to the inner value as a ToSql trait object.
    pub fn as_ref(&self) -> &(dyn ToSql + Sync) {
        self.0.as_to_sql()
    }
}

impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

/// Borrow a parameter slice in the shape `tokio-postgres` query methods take.
pub fn params_ref(params: &[Param]) -> Vec<&(dyn ToSql + Sync)> {
    params.iter().map(Param::as_ref).collect()
}
