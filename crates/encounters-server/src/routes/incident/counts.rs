//! `/incident/count`: histogram data for the current filter.
//!
//! The filtered ids are materialized once into a temporary `filtered` table
//! and each count reads from it. The table is created `ON COMMIT DROP`, so
//! the whole route runs in one transaction.

use std::collections::BTreeMap;

use encounters::clause::{
    Combinator, Group, Insert, Order, Ordering, Query, Raw, Select, Subexpression, Subquery,
    WhereClause,
};
use encounters::tokio_postgres::Row;
use encounters::{DbResult, GenericClient, RowExt};
use serde::Serialize;

use super::filter;
use crate::params::QueryString;

const DROP_FILTERED: &str = "DROP TABLE IF EXISTS filtered";
const CREATE_FILTERED: &str =
    "CREATE TEMPORARY TABLE IF NOT EXISTS filtered (id INTEGER PRIMARY KEY NOT NULL) ON COMMIT DROP";

/// One histogram: a named grouping expression over `incident`.
#[derive(Debug, Clone, Copy)]
pub struct CountDimension {
    pub name: &'static str,
    /// Rows where this column is null are left out of the histogram.
    pub column: &'static str,
    pub key: &'static str,
}

pub const COUNT_DIMENSIONS: [CountDimension; 4] = [
    CountDimension {
        name: "race",
        column: "race_id",
        key: "race_id",
    },
    CountDimension {
        name: "cause",
        column: "cause_id",
        key: "cause_id",
    },
    CountDimension {
        name: "year",
        column: "incident.date",
        key: "EXTRACT(YEAR FROM incident.date)::int",
    },
    CountDimension {
        name: "age",
        column: "age",
        key: "age",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountFor {
    pub key: i32,
    pub count: i64,
}

#[derive(Debug, Default, Serialize)]
pub struct Counts {
    pub counts: BTreeMap<&'static str, Vec<CountFor>>,
    pub rows: Vec<i32>,
}

fn decode_count(row: &Row) -> DbResult<CountFor> {
    Ok(CountFor {
        key: row.try_get_index(0)?,
        count: row.try_get_index(1)?,
    })
}

pub fn populate_query(qs: &QueryString) -> Query {
    Query::new()
        .with(Insert::new("filtered"))
        .with(filter::filtered_ids(qs))
}

pub fn filtered_query() -> Query {
    Query::new().with(Select::new("filtered", ["id"]))
}

pub fn count_query(dimension: &CountDimension) -> Query {
    let in_filtered = Subexpression::new(" ")
        .with(Raw::new("incident.id IN"))
        .with(Subquery::new(Query::new().with(Select::new("filtered", ["filtered.id"]))));
    Query::new()
        .with(Select::new("incident", [dimension.key, "COUNT(1)"]))
        .with(
            WhereClause::new(Combinator::And)
                .with(in_filtered)
                .with(Raw::new(format!("{} IS NOT NULL", dimension.column))),
        )
        .with(Group::new(["1"]))
        .with(Order::new(Ordering::Ascending, ["1"]))
}

/// Run every statement of the route on `conn`, which must be a transaction.
pub async fn collect(conn: &impl GenericClient, qs: &QueryString) -> DbResult<Counts> {
    Query::new().with(Raw::new(DROP_FILTERED)).execute(conn).await?;
    Query::new().with(Raw::new(CREATE_FILTERED)).execute(conn).await?;
    let inserted = populate_query(qs).execute(conn).await?;
    tracing::debug!(inserted, "populated filtered");

    let mut counts = Counts {
        rows: filtered_query().fetch_all(conn).await?,
        ..Counts::default()
    };
    for dimension in &COUNT_DIMENSIONS {
        let histogram = count_query(dimension)
            .fetch_all_with(conn, decode_count)
            .await?;
        counts.counts.insert(dimension.name, histogram);
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn populate_reuses_the_incident_filter() {
        let built = populate_query(&QueryString::parse("race=2&orderDirection=descending")).build();
        assert_eq!(
            built.sql,
            "INSERT INTO filtered SELECT incident.id FROM incident WHERE race_id IN ($1) ORDER BY incident.id DESC"
        );
        assert_eq!(format!("{:?}", built.params), "[2]");
    }

    #[test]
    fn year_histogram() {
        assert_eq!(
            count_query(&COUNT_DIMENSIONS[2]).to_sql(),
            "SELECT EXTRACT(YEAR FROM incident.date)::int, COUNT(1) FROM incident \
             WHERE incident.id IN (SELECT filtered.id FROM filtered) AND incident.date IS NOT NULL \
             GROUP BY 1 ORDER BY 1 ASC"
        );
    }

    #[test]
    fn every_dimension_is_named_once() {
        let mut names: Vec<_> = COUNT_DIMENSIONS.iter().map(|d| d.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names, ["age", "cause", "race", "year"]);
    }

    #[test]
    fn response_shape() {
        let mut counts = Counts {
            rows: vec![3, 1],
            ..Counts::default()
        };
        counts.counts.insert("age", vec![CountFor { key: 30, count: 2 }]);
        assert_eq!(
            serde_json::to_string(&counts).unwrap(),
            r#"{"counts":{"age":[{"key":30,"count":2}]},"rows":[3,1]}"#
        );
    }
}
