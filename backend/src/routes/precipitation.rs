use serde::ser::{Serialize, SerializeMap, Serializer};

pub const PRECIPITATION: &str = "/api/v1.0/precipitation";

/// A reading keyed by its date.
///
/// Serializes as the single-entry object `{"<date>": <value>}`.
#[derive(Debug, Clone, PartialEq)]
pub struct DateValue {
    pub date: String,
    pub value: f64,
}

impl Serialize for DateValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.date, &self.value)?;
        map.end()
    }
}

impl From<(String, f64)> for DateValue {
    fn from((date, value): (String, f64)) -> Self {
        Self { date, value }
    }
}

/// Convert `(date, value)` rows into their response entries, keeping order.
pub fn to_date_values(rows: Vec<(String, f64)>) -> Vec<DateValue> {
    rows.into_iter().map(DateValue::from).collect()
}
