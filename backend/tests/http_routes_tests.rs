//! End-to-end tests of the HTTP routes against a seeded in-memory repository.

#![cfg(feature = "http-server")]

mod support;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use climate_api::db::{FullRepository, LocalRepository};
use climate_api::http::{create_router, AppState};
use climate_api::routes::landing;
use serde_json::{json, Value};
use tower::ServiceExt;

use support::{seeded_repository, LATEST_DATE, MOST_ACTIVE};

fn app_with(repo: LocalRepository) -> Router {
    let repo = Arc::new(repo) as Arc<dyn FullRepository>;
    create_router(AppState::new(repo))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(app, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

/// Single-key map `{"date": value}` into its pair.
fn single_entry(value: &Value) -> (String, Value) {
    let map = value.as_object().expect("object entry");
    assert_eq!(map.len(), 1, "entry should have exactly one key: {value}");
    let (k, v) = map.iter().next().unwrap();
    (k.clone(), v.clone())
}

#[tokio::test]
async fn test_landing_lists_routes() {
    let (status, body) = get(app_with(seeded_repository()), "/").await;
    assert_eq!(status, StatusCode::OK);

    let text = String::from_utf8(body).unwrap();
    assert_eq!(text, landing::available_routes());
    for path in [
        "/api/v1.0/precipitation",
        "/api/v1.0/stations",
        "/api/v1.0/tobs",
        "/api/v1.0/start/yyyy-mm-dd",
        "/api/v1.0/start/end/yyyy-mm-dd/yyyy-mm-dd",
    ] {
        assert!(text.contains(path), "missing {path} in {text}");
    }
}

#[tokio::test]
async fn test_precipitation_skips_null_rows() {
    let (status, body) = get_json(app_with(seeded_repository()), "/api/v1.0/precipitation").await;
    assert_eq!(status, StatusCode::OK);

    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 7);
    for entry in entries {
        let (_, value) = single_entry(entry);
        assert!(value.is_number(), "unexpected value {value}");
    }

    // Two stations reported on each of these dates; only the non-null reading survives.
    let latest = entries
        .iter()
        .filter(|e| single_entry(e).0 == LATEST_DATE)
        .count();
    assert_eq!(latest, 1);
    let first_of_year = entries
        .iter()
        .filter(|e| single_entry(e).0 == "2017-01-01")
        .count();
    assert_eq!(first_of_year, 1);
}

#[tokio::test]
async fn test_stations_returns_every_station() {
    let (status, body) = get_json(app_with(seeded_repository()), "/api/v1.0/stations").await;
    assert_eq!(status, StatusCode::OK);

    let stations = body.as_array().unwrap();
    assert_eq!(stations.len(), 3);
    for station in stations {
        let obj = station.as_object().unwrap();
        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["ELEV", "ID", "LAT", "LONG", "Name"]);
    }

    let waihee = stations
        .iter()
        .find(|s| s["ID"] == MOST_ACTIVE)
        .expect("most active station listed");
    assert_eq!(waihee["Name"], "WAIHEE 837.5, HI US");
    assert_eq!(waihee["LAT"], json!(21.45167));
    assert_eq!(waihee["LONG"], json!(-157.84889));
    assert_eq!(waihee["ELEV"], json!(32.9));
}

#[tokio::test]
async fn test_tobs_covers_trailing_year_of_most_active_station() {
    let (status, body) = get_json(app_with(seeded_repository()), "/api/v1.0/tobs").await;
    assert_eq!(status, StatusCode::OK);

    let entries: Vec<(String, Value)> = body.as_array().unwrap().iter().map(single_entry).collect();
    let dates: Vec<&str> = entries.iter().map(|(d, _)| d.as_str()).collect();
    assert_eq!(
        dates,
        vec!["2016-08-23", "2017-01-01", "2017-06-15", "2017-08-18"]
    );
    assert_eq!(entries[0].1, json!(77.0));
    assert_eq!(entries[1].1, json!(62.0));
    assert!(dates.iter().all(|d| *d >= "2016-08-23"));
}

#[tokio::test]
async fn test_start_returns_ordered_summary() {
    let (status, body) = get(app_with(seeded_repository()), "/api/v1.0/start/2017-01-01").await;
    assert_eq!(status, StatusCode::OK);

    let text = String::from_utf8(body).unwrap();
    assert_eq!(text, r#"[{"TMIN":62.0},{"TMAX":82.0},{"TAVG":76.0}]"#);
}

#[tokio::test]
async fn test_start_end_is_inclusive() {
    let (status, body) = get_json(
        app_with(seeded_repository()),
        "/api/v1.0/start/end/2017-01-01/2017-01-01",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{"TMIN": 62.0}, {"TMAX": 66.0}, {"TAVG": 64.0}])
    );
}

#[tokio::test]
async fn test_start_end_stats_are_ordered() {
    let (_, body) = get_json(
        app_with(seeded_repository()),
        "/api/v1.0/start/end/2016-01-01/2017-12-31",
    )
    .await;
    let tmin = body[0]["TMIN"].as_f64().unwrap();
    let tmax = body[1]["TMAX"].as_f64().unwrap();
    let tavg = body[2]["TAVG"].as_f64().unwrap();
    assert!(tmin <= tavg && tavg <= tmax);
}

#[tokio::test]
async fn test_range_without_rows_yields_nulls() {
    let expected = json!([{"TMIN": null}, {"TMAX": null}, {"TAVG": null}]);

    let (status, body) = get_json(app_with(seeded_repository()), "/api/v1.0/start/2018-01-01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, expected);

    // Reversed bounds match nothing.
    let (status, body) = get_json(
        app_with(seeded_repository()),
        "/api/v1.0/start/end/2017-08-23/2016-08-23",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, expected);
}

#[tokio::test]
async fn test_malformed_start_is_compared_as_text() {
    // "garbage" sorts after every ISO date.
    let (status, body) = get_json(app_with(seeded_repository()), "/api/v1.0/start/garbage").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"TMIN": null}, {"TMAX": null}, {"TAVG": null}]));
}

#[tokio::test]
async fn test_repeated_requests_are_identical() {
    let app = app_with(seeded_repository());
    for uri in [
        "/api/v1.0/precipitation",
        "/api/v1.0/stations",
        "/api/v1.0/tobs",
        "/api/v1.0/start/2016-08-23",
    ] {
        let (_, first) = get(app.clone(), uri).await;
        let (_, second) = get(app.clone(), uri).await;
        assert_eq!(first, second, "{uri} changed between calls");
    }
}

#[tokio::test]
async fn test_health_reports_connection_state() {
    let repo = seeded_repository();
    let (status, body) = get_json(app_with(repo.clone()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");

    repo.set_healthy(false);
    let (_, body) = get_json(app_with(repo), "/health").await;
    assert!(body["database"].as_str().unwrap() != "connected");
}

#[tokio::test]
async fn test_unknown_path_is_404() {
    let (status, body) = get_json(app_with(seeded_repository()), "/api/v1.0/unknown").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_unavailable_storage_is_500() {
    let repo = seeded_repository();
    repo.set_healthy(false);
    let app = app_with(repo);

    for uri in [
        "/api/v1.0/precipitation",
        "/api/v1.0/stations",
        "/api/v1.0/tobs",
        "/api/v1.0/start/2017-01-01",
    ] {
        let (status, body) = get_json(app.clone(), uri).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        assert_eq!(body["code"], "REPOSITORY_ERROR");
    }
}

#[tokio::test]
async fn test_tobs_on_empty_dataset_is_500() {
    let (status, _) = get_json(app_with(LocalRepository::new()), "/api/v1.0/tobs").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, body) = get_json(app_with(LocalRepository::new()), "/api/v1.0/precipitation").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}
