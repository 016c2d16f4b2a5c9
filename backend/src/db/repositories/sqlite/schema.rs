// Explicit declaration of the externally populated hawaii.sqlite schema.
// The service only reads these tables; it never creates or migrates them.

diesel::table! {
    measurement (id) {
        id -> Integer,
        #[sql_name = "station"]
        station_id -> Text,
        date -> Text,
        prcp -> Nullable<Double>,
        tobs -> Double,
    }
}

diesel::table! {
    station (id) {
        id -> Integer,
        #[sql_name = "station"]
        station_id -> Text,
        name -> Text,
        latitude -> Double,
        longitude -> Double,
        elevation -> Double,
    }
}
