//! Composable SQL clauses with vanishing predicates.
//!
//! Every fragment of a statement is a [`Clause`]: it renders to SQL text in
//! which bind values appear as `?` markers, and it hands out the matching
//! parameters in the same order. Composites join the renderings of their
//! children and silently drop children that render to nothing, so an
//! optional filter that is not active simply disappears from the statement:
//! no dangling `WHERE`, no `AND` with nothing on one side, no empty `IN ()`.
//!
//! Only the root [`Query`] turns `?` markers into `$1, $2, ...`, in one pass,
//! after the whole tree has been joined. Clauses never need to know where
//! they will end up.
//!
//! # Example
//!
//! ```ignore
//! use encounters::clause::*;
//!
//! let mut filter = WhereClause::new(Combinator::And);
//! filter.push(TextSearch::new("name", search_term));
//! filter.push(In::new("state", states));
//!
//! let built = Query::new()
//!     .with(Select::new("city", ["id", "name", "state"]))
//!     .with(filter)
//!     .with(Order::new(Ordering::Ascending, ["name"]))
//!     .with(Page::new(6, 0))
//!     .build();
//! // built.sql == "SELECT id, name, state FROM city LIMIT $1" when nothing matched
//! ```

mod expr;
mod leaf;
mod ops;
mod predicate;
mod query;

pub use expr::{ConditionsClause, Subexpression, WhereClause};
pub use leaf::{Group, Insert, Join, Order, Page, Raw, Select};
pub use ops::{Combinator, Comparator, Ordering};
pub use predicate::{Compare, In, Not, Subquery, TextSearch};
pub use query::{BuiltQuery, Query};

use crate::param::Param;

/// Placeholder emitted by clauses before the root numbers them.
pub const MARKER: char = '?';

/// A fragment of SQL plus the bind values its markers stand for.
///
/// Implementations must keep the two halves in step: `render()` contains
/// exactly `parameters().len()` markers, in parameter order. A clause with no
/// active predicate renders the empty string and returns no parameters.
pub trait Clause: Send + Sync {
    /// SQL text with unresolved `?` markers.
    fn render(&self) -> String;

    /// Bind values, in marker order.
    fn parameters(&self) -> Vec<Param>;
}

impl<C: Clause + ?Sized> Clause for Box<C> {
    fn render(&self) -> String {
        (**self).render()
    }

    fn parameters(&self) -> Vec<Param> {
        (**self).parameters()
    }
}

impl<C: Clause + ?Sized> Clause for &C {
    fn render(&self) -> String {
        (**self).render()
    }

    fn parameters(&self) -> Vec<Param> {
        (**self).parameters()
    }
}

/// An absent clause vanishes: optional filters can be pushed as `Option`s.
impl<C: Clause> Clause for Option<C> {
    fn render(&self) -> String {
        self.as_ref().map(Clause::render).unwrap_or_default()
    }

    fn parameters(&self) -> Vec<Param> {
        self.as_ref().map(Clause::parameters).unwrap_or_default()
    }
}

/// `n` markers separated by `", "`.
fn markers(n: usize) -> String {
    let mut out = String::with_capacity(n * 3);
    for i in 0..n {
        if i > 0 {
            out.push_str(", ");
        }
        out.push(MARKER);
    }
    out
}

#[cfg(test)]
mod tests;
