//! Query-string access and the filter clauses shared by several routes.
//!
//! Malformed values never fail a request: a value that does not parse is
//! treated as absent and the filter it would have driven is left out.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use encounters::clause::{In, Not, Page, TextSearch};

/// Decoded query-string pairs, in request order, repeated keys kept.
#[derive(Debug, Clone, Default)]
pub struct QueryString {
    pairs: Vec<(String, String)>,
}

impl QueryString {
    pub fn parse(raw: &str) -> Self {
        let pairs = url::form_urlencoded::parse(raw.as_bytes())
            .into_owned()
            .collect();
        Self { pairs }
    }

    /// Every value given for `key`.
    pub fn all<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a str> {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The first value given for `key`.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.all(key).next()
    }

    /// First value of `key` as an integer, or `default` when missing or malformed.
    pub fn int(&self, key: &str, default: i64) -> i64 {
        self.first(key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// First value of `key` as an integer, if present and well formed.
    pub fn maybe_int(&self, key: &str) -> Option<i32> {
        self.first(key)?.parse().ok()
    }

    /// All integers under `key`: repeated keys and comma lists both count,
    /// items that do not parse are dropped.
    ///
    /// `?race=1,2&race=x&race=3` gives `[1, 2, 3]`.
    pub fn ints(&self, key: &str) -> Vec<i32> {
        self.all(key)
            .flat_map(|v| v.split(','))
            .filter_map(|part| part.parse().ok())
            .collect()
    }
}

impl<S: Send + Sync> FromRequestParts<S> for QueryString {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.uri.query().map(Self::parse).unwrap_or_default())
    }
}

/// `LIMIT`/`OFFSET` from `count` (default `default_count`) and `page` (default 0).
pub fn page_clause(qs: &QueryString, default_count: i64) -> Page {
    let count = qs.int("count", default_count);
    let page = qs.int("page", 0);
    Page::new(count, page.saturating_mul(count))
}

/// Substring search on `column` from `search`.
pub fn search_clause(qs: &QueryString, column: &str) -> Option<TextSearch> {
    qs.first("search").map(|term| TextSearch::new(column, term))
}

/// Membership of `column` in the integers under `key`.
pub fn in_clause(qs: &QueryString, key: &str, column: &str) -> In {
    In::new(column, qs.ints(key))
}

/// Excludes the ids listed under `ignore`.
pub fn ignore_clause(qs: &QueryString, column: &str) -> Not {
    Not::new(In::new(column, qs.ints("ignore")))
}
