//! Turning an incident query string into `JOIN`, `WHERE` and `ORDER BY`.

use chrono::NaiveDate;
use encounters::clause::{
    Combinator, Comparator, Compare, Join, Order, Ordering, Query, Select, WhereClause,
};

use crate::params::{QueryString, ignore_clause, in_clause, search_clause};

/// Query-string keys that filter by membership in a lookup table. Each one
/// maps to the `<key>_id` column.
pub const DIMENSIONS: [&str; 7] = [
    "agency",
    "cause",
    "city",
    "county",
    "race",
    "use_of_force",
    "state",
];

const DATE_FORMAT: &str = "%Y-%b-%d";

/// The column an incident listing is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderKind {
    #[default]
    Id,
    Age,
    Name,
    Date,
}

impl OrderKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "id" => Some(Self::Id),
            "age" => Some(Self::Age),
            "name" => Some(Self::Name),
            "date" => Some(Self::Date),
            _ => None,
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            Self::Id => "incident.id",
            Self::Age => "incident.age",
            Self::Name => "incident.name",
            Self::Date => "incident.date",
        }
    }
}

fn order_direction(value: &str) -> Option<Ordering> {
    match value {
        "ascending" => Some(Ordering::Ascending),
        "descending" => Some(Ordering::Descending),
        _ => None,
    }
}

/// `order` and `orderDirection`, unknown values falling back to id / ascending.
pub fn order_clause(qs: &QueryString) -> Order {
    let kind = qs
        .first("order")
        .and_then(OrderKind::parse)
        .unwrap_or_default();
    let direction = qs
        .first("orderDirection")
        .and_then(order_direction)
        .unwrap_or_default();
    Order::new(direction, [kind.column()])
}

/// `state` lives on `city`, so filtering by it needs the join.
pub fn city_join(qs: &QueryString) -> Option<Join> {
    match qs.ints("state").is_empty() {
        true => None,
        false => Some(Join::new("city")),
    }
}

fn age_clause(qs: &QueryString, key: &str, comparator: Comparator) -> Option<Compare> {
    qs.maybe_int(key)
        .map(|age| Compare::new(comparator, "age", age))
}

fn gender_clause(qs: &QueryString) -> Option<Compare> {
    let is_male = match qs.first("gender")? {
        "male" => true,
        "female" => false,
        _ => return None,
    };
    Some(Compare::eq("is_male", is_male))
}

fn date_clause(qs: &QueryString, key: &str, comparator: Comparator) -> Option<Compare> {
    let date = NaiveDate::parse_from_str(qs.first(key)?, DATE_FORMAT).ok()?;
    Some(Compare::new(comparator, "date", date))
}

pub fn where_clause(qs: &QueryString) -> WhereClause {
    let mut clause = WhereClause::new(Combinator::And);
    for dimension in DIMENSIONS {
        clause.push(in_clause(qs, dimension, &format!("{dimension}_id")));
    }
    clause
        .with(search_clause(qs, "incident.name"))
        .with(age_clause(qs, "ageMin", Comparator::GreaterEqual))
        .with(age_clause(qs, "ageMax", Comparator::LesserEqual))
        .with(gender_clause(qs))
        .with(date_clause(qs, "dateMin", Comparator::GreaterEqual))
        .with(date_clause(qs, "dateMax", Comparator::LesserEqual))
        .with(ignore_clause(qs, "incident.id"))
}

/// `SELECT incident.id FROM incident` narrowed and sorted by the query string.
pub fn filtered_ids(qs: &QueryString) -> Query {
    Query::new()
        .with(Select::new("incident", ["incident.id"]))
        .with(city_join(qs))
        .with(where_clause(qs))
        .with(order_clause(qs))
}
