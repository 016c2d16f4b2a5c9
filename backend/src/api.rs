//! Domain types shared by the repository, service and HTTP layers.
//!
//! Dates are carried as `YYYY-MM-DD` strings, the representation used by the
//! backing store. Comparisons on them are lexicographic, which orders
//! well-formed dates chronologically.

use serde::{Deserialize, Serialize};

/// One dated observation at a station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Station identifier (e.g. `USC00519281`)
    pub station: String,
    /// Observation date, `YYYY-MM-DD`
    pub date: String,
    /// Precipitation, absent when not recorded
    pub prcp: Option<f64>,
    /// Observed temperature
    pub tobs: f64,
}

impl Measurement {
    pub fn new(
        station: impl Into<String>,
        date: impl Into<String>,
        prcp: Option<f64>,
        tobs: f64,
    ) -> Self {
        Self {
            station: station.into(),
            date: date.into(),
            prcp,
            tobs,
        }
    }
}

/// A fixed observation site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub station: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

/// Row count of a single station, used to rank stations by activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationActivity {
    pub station: String,
    pub observations: i64,
}

/// Min/max/avg of observed temperature over a date range.
///
/// Every field is `None` when the filtered set is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TemperatureStats {
    pub tmin: Option<f64>,
    pub tmax: Option<f64>,
    pub tavg: Option<f64>,
}

/// Inclusive date bounds taken verbatim from the request path.
///
/// The bounds are not validated; a malformed value is compared as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: Option<String>,
}

impl DateRange {
    /// Range open at the top.
    pub fn from(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: None,
        }
    }

    /// Range closed on both ends.
    pub fn between(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: Some(end.into()),
        }
    }

    /// Whether `date` falls inside the range.
    pub fn contains(&self, date: &str) -> bool {
        date >= self.start.as_str() && self.end.as_deref().map_or(true, |end| date <= end)
    }
}

/// Observations of the most active station over the trailing year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TobsWindow {
    pub station: String,
    /// First date of the window, inclusive
    pub start: String,
    /// Latest date in the dataset
    pub end: String,
    pub observations: Vec<(String, f64)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_range_open_end() {
        let range = DateRange::from("2017-01-01");
        assert!(range.contains("2017-01-01"));
        assert!(range.contains("2017-08-23"));
        assert!(!range.contains("2016-12-31"));
    }

    #[test]
    fn test_date_range_closed() {
        let range = DateRange::between("2017-01-01", "2017-01-31");
        assert!(range.contains("2017-01-31"));
        assert!(!range.contains("2017-02-01"));
    }

    #[test]
    fn test_temperature_stats_default_is_empty() {
        let stats = TemperatureStats::default();
        assert!(stats.tmin.is_none());
        assert!(stats.tmax.is_none());
        assert!(stats.tavg.is_none());
    }
}
