/// Path of the route listing.
pub const LANDING: &str = "/";

/// HTML fragment listing the available routes, one per `<br/>`-separated line.
pub fn available_routes() -> String {
    [
        "Available Routes:".to_string(),
        super::precipitation::PRECIPITATION.to_string(),
        super::stations::STATIONS.to_string(),
        super::tobs::TOBS.to_string(),
        format!("{}/start/yyyy-mm-dd", super::API_PREFIX),
        format!("{}/start/end/yyyy-mm-dd/yyyy-mm-dd", super::API_PREFIX),
    ]
    .join("<br/>")
}
