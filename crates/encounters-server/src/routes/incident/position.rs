//! `/incident/position`: coordinates for map markers.

use encounters::clause::{Query, Select};
use encounters::tokio_postgres::Row;
use encounters::{DbResult, FromRow, RowExt};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct LatLng {
    pub lat: f32,
    pub lng: f32,
}

#[derive(Debug, Serialize)]
pub struct Positioned {
    pub id: i32,
    pub position: LatLng,
}

impl FromRow for Positioned {
    fn from_row(row: &Row) -> DbResult<Self> {
        Ok(Self {
            id: row.try_get_index(0)?,
            position: LatLng {
                lat: row.try_get_index(1)?,
                lng: row.try_get_index(2)?,
            },
        })
    }
}

pub fn query() -> Query {
    Query::new().with(Select::new(
        "incident",
        ["incident.id", "incident.latitude", "incident.longitude"],
    ))
}
