use super::precipitation::{to_date_values, DateValue};
use crate::api::TobsWindow;

pub const TOBS: &str = "/api/v1.0/tobs";

/// One observation of the tobs response, serialized as `{date: tobs}`.
pub type TobsEntry = DateValue;

/// Response entries for the trailing-year observations, in query order.
pub fn window_entries(window: TobsWindow) -> Vec<TobsEntry> {
    to_date_values(window.observations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_window_entries_keep_only_observations() {
        let window = TobsWindow {
            station: "USC00519281".to_string(),
            start: "2016-08-23".to_string(),
            end: "2017-08-23".to_string(),
            observations: vec![
                ("2016-08-23".to_string(), 77.0),
                ("2016-08-24".to_string(), 77.0),
            ],
        };
        assert_eq!(
            serde_json::to_value(window_entries(window)).unwrap(),
            json!([{"2016-08-23": 77.0}, {"2016-08-24": 77.0}])
        );
    }
}
