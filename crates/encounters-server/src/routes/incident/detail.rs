//! `/incident/{id}`: one incident with its lookup tables resolved.

use chrono::NaiveDate;
use encounters::clause::{Join, Query, Select, Subexpression};
use encounters::tokio_postgres::Row;
use encounters::{DbResult, RowExt};
use serde::Serialize;

use crate::routes::enums::Named;

/// Lookup tables joined onto a detail row, in select order after `cause`
/// and `use_of_force`.
const JOINED: [&str; 6] = ["agency", "cause", "city", "county", "race", "use_of_force"];

const COLUMNS: [&str; 23] = [
    "incident.id",
    "incident.name",
    "incident.age",
    "incident.date",
    "incident.image_url",
    "incident.is_male",
    "incident.address",
    "incident.description",
    "incident.article_url",
    "incident.video_url",
    "incident.zipcode",
    "cause.id",
    "cause.name",
    "use_of_force.id",
    "use_of_force.name",
    "race.id",
    "race.name",
    "county.id",
    "county.name",
    "agency.id",
    "agency.name",
    "city.id",
    "city.name",
];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Detail {
    pub id: i32,
    pub name: Option<String>,
    pub age: Option<i32>,
    pub date: NaiveDate,
    pub image_url: Option<String>,
    pub is_male: Option<bool>,
    pub address: Option<String>,
    pub description: String,
    pub article_url: Option<String>,
    pub video_url: Option<String>,
    pub zipcode: Option<i32>,
    pub cause: Named,
    pub use_of_force: Named,
    pub race: Option<Named>,
    pub county: Option<Named>,
    pub agency: Option<Named>,
    pub city: Option<Named>,
}

/// Every column is named `id` or `name` after the join, so rows are read by
/// position.
pub fn decode(row: &Row) -> DbResult<Detail> {
    let named = |idx: usize| -> DbResult<Named> {
        Ok(Named {
            id: row.try_get_index(idx)?,
            name: row.try_get_index(idx + 1)?,
        })
    };
    let maybe_named = |idx: usize| -> DbResult<Option<Named>> {
        let id: Option<i32> = row.try_get_index(idx)?;
        let name: Option<String> = row.try_get_index(idx + 1)?;
        Ok(id.zip(name).map(|(id, name)| Named { id, name }))
    };

    Ok(Detail {
        id: row.try_get_index(0)?,
        name: row.try_get_index(1)?,
        age: row.try_get_index(2)?,
        date: row.try_get_index(3)?,
        image_url: row.try_get_index(4)?,
        is_male: row.try_get_index(5)?,
        address: row.try_get_index(6)?,
        description: row.try_get_index(7)?,
        article_url: row.try_get_index(8)?,
        video_url: row.try_get_index(9)?,
        zipcode: row.try_get_index(10)?,
        cause: named(11)?,
        use_of_force: named(13)?,
        race: maybe_named(15)?,
        county: maybe_named(17)?,
        agency: maybe_named(19)?,
        city: maybe_named(21)?,
    })
}

pub fn query() -> Query {
    let mut joins = Subexpression::new(" ");
    joins.extend(JOINED.map(Join::new));
    Query::new()
        .with(Select::new("incident", COLUMNS))
        .with(joins)
}
