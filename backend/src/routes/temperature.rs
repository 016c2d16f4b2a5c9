//! Temperature summary shape shared by the open and closed range routes.

use serde::Serialize;

use crate::api::TemperatureStats;

/// Summary from a start date onward.
pub const START: &str = "/api/v1.0/start/{start}";
/// Summary between two dates, both inclusive.
pub const START_END: &str = "/api/v1.0/start/end/{start}/{end}";

/// One statistic of the summary, serialized as a single-key object
/// (`{"TMIN": 54.0}`). A missing value serializes as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum TemperatureStat {
    #[serde(rename = "TMIN")]
    Min(Option<f64>),
    #[serde(rename = "TMAX")]
    Max(Option<f64>),
    #[serde(rename = "TAVG")]
    Avg(Option<f64>),
}

/// The summary as returned to clients: TMIN, TMAX, TAVG in that order.
pub fn to_stat_list(stats: &TemperatureStats) -> Vec<TemperatureStat> {
    vec![
        TemperatureStat::Min(stats.tmin),
        TemperatureStat::Max(stats.tmax),
        TemperatureStat::Avg(stats.tavg),
    ]
}
