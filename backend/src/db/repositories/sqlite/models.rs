use diesel::prelude::*;
use diesel::sql_types::{BigInt, Double, Nullable, Text};

use super::schema::station;
use crate::api::{Station, StationActivity, TemperatureStats};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = station)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StationRow {
    pub station_id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

impl From<StationRow> for Station {
    fn from(row: StationRow) -> Self {
        Station {
            station: row.station_id,
            name: row.name,
            latitude: row.latitude,
            longitude: row.longitude,
            elevation: row.elevation,
        }
    }
}

/// Result row of the grouped station count.
#[derive(Debug, Clone, QueryableByName)]
pub struct StationActivityRow {
    #[diesel(sql_type = Text)]
    pub station: String,
    #[diesel(sql_type = BigInt)]
    pub observations: i64,
}

impl From<StationActivityRow> for StationActivity {
    fn from(row: StationActivityRow) -> Self {
        StationActivity {
            station: row.station,
            observations: row.observations,
        }
    }
}

/// Single-row result of the MIN/MAX/AVG aggregate. SQLite yields NULL for
/// each column when no row matches.
#[derive(Debug, Clone, Copy, QueryableByName)]
pub struct TemperatureStatsRow {
    #[diesel(sql_type = Nullable<Double>)]
    pub tmin: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub tmax: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub tavg: Option<f64>,
}

impl From<TemperatureStatsRow> for TemperatureStats {
    fn from(row: TemperatureStatsRow) -> Self {
        TemperatureStats {
            tmin: row.tmin,
            tmax: row.tmax,
            tavg: row.tavg,
        }
    }
}

#[derive(Debug, Clone, QueryableByName)]
pub struct TableNameRow {
    #[diesel(sql_type = Text)]
    pub name: String,
}
