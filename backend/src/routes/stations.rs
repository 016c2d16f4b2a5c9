use serde::{Deserialize, Serialize};

use crate::api::Station;

pub const STATIONS: &str = "/api/v1.0/stations";

/// Station record as exposed by the stations route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationDto {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "LAT")]
    pub latitude: f64,
    #[serde(rename = "LONG")]
    pub longitude: f64,
    #[serde(rename = "ELEV")]
    pub elevation: f64,
}

impl From<Station> for StationDto {
    fn from(station: Station) -> Self {
        Self {
            id: station.station,
            name: station.name,
            latitude: station.latitude,
            longitude: station.longitude,
            elevation: station.elevation,
        }
    }
}
