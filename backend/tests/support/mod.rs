#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use climate_api::api::{Measurement, Station};
use climate_api::db::LocalRepository;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

pub const MOST_ACTIVE: &str = "USC00519281";
pub const LATEST_DATE: &str = "2017-08-23";

pub fn fixture_stations() -> Vec<Station> {
    vec![
        Station {
            station: "USC00519397".to_string(),
            name: "WAIKIKI 717.2, HI US".to_string(),
            latitude: 21.2716,
            longitude: -157.8168,
            elevation: 3.0,
        },
        Station {
            station: "USC00513117".to_string(),
            name: "KANEOHE 838.1, HI US".to_string(),
            latitude: 21.4234,
            longitude: -157.8015,
            elevation: 14.6,
        },
        Station {
            station: MOST_ACTIVE.to_string(),
            name: "WAIHEE 837.5, HI US".to_string(),
            latitude: 21.45167,
            longitude: -157.84889,
            elevation: 32.9,
        },
    ]
}

/// Nine rows, two without precipitation. USC00519281 has the most rows; one
/// of them falls a day before the trailing-year window.
pub fn fixture_measurements() -> Vec<Measurement> {
    vec![
        Measurement::new(MOST_ACTIVE, "2016-08-22", Some(0.4), 77.0),
        Measurement::new(MOST_ACTIVE, "2016-08-23", Some(1.79), 77.0),
        Measurement::new(MOST_ACTIVE, "2017-01-01", None, 62.0),
        Measurement::new(MOST_ACTIVE, "2017-06-15", Some(0.0), 79.0),
        Measurement::new(MOST_ACTIVE, "2017-08-18", Some(0.06), 79.0),
        Measurement::new("USC00519397", "2017-08-21", Some(0.0), 81.0),
        Measurement::new("USC00519397", LATEST_DATE, Some(0.0), 81.0),
        Measurement::new("USC00513117", "2017-01-01", Some(0.03), 66.0),
        Measurement::new("USC00513117", LATEST_DATE, None, 82.0),
    ]
}

pub fn seeded_repository() -> LocalRepository {
    LocalRepository::with_data(fixture_stations(), fixture_measurements())
}

/// Write the fixture into a fresh SQLite file laid out like hawaii.sqlite.
#[cfg(feature = "sqlite-repo")]
pub fn create_sqlite_dataset(
    path: &std::path::Path,
    stations: &[Station],
    measurements: &[Measurement],
) {
    use diesel::connection::SimpleConnection;
    use diesel::{Connection, SqliteConnection};

    let mut conn = SqliteConnection::establish(path.to_str().expect("utf-8 path"))
        .expect("open sqlite fixture");

    let mut sql = String::from(
        "CREATE TABLE measurement (
            id INTEGER NOT NULL, station TEXT, date TEXT, prcp FLOAT, tobs FLOAT,
            PRIMARY KEY (id));
         CREATE TABLE station (
            id INTEGER NOT NULL, station TEXT, name TEXT,
            latitude FLOAT, longitude FLOAT, elevation FLOAT,
            PRIMARY KEY (id));",
    );
    for s in stations {
        sql.push_str(&format!(
            "INSERT INTO station (station, name, latitude, longitude, elevation) \
             VALUES ('{}', '{}', {}, {}, {});",
            s.station,
            s.name.replace('\'', "''"),
            s.latitude,
            s.longitude,
            s.elevation
        ));
    }
    for m in measurements {
        let prcp = m.prcp.map_or_else(|| "NULL".to_string(), |p| p.to_string());
        sql.push_str(&format!(
            "INSERT INTO measurement (station, date, prcp, tobs) VALUES ('{}', '{}', {}, {});",
            m.station, m.date, prcp, m.tobs
        ));
    }

    conn.batch_execute(&sql).expect("populate sqlite fixture");
}
