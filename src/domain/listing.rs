use serde::Serialize;

/// Canonical column order, shared by the `listings` table, normalized CSV
/// files and the JSON records handed to the front-end.
pub const LISTING_COLUMNS: [&str; 13] = [
    "city",
    "period",
    "lat",
    "lng",
    "room_type",
    "person_capacity",
    "realSum",
    "guest_satisfaction_overall",
    "cleanliness_rating",
    "dist",
    "metro_dist",
    "attr_index",
    "rest_index",
];

/// One listing row. Optional attributes serialize as `null` when missing so
/// every record carries the full set of keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingRecord {
    // Assigned by SQLite; records read straight from CSV have none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    pub city: String,
    pub period: String,

    pub lat: f64,
    pub lng: f64,

    pub room_type: Option<String>,
    pub person_capacity: Option<i64>,
    #[serde(rename = "realSum")]
    pub real_sum: Option<f64>,

    pub guest_satisfaction_overall: Option<f64>,
    pub cleanliness_rating: Option<f64>,
    pub dist: Option<f64>,
    pub metro_dist: Option<f64>,
    pub attr_index: Option<f64>,
    pub rest_index: Option<f64>,
}

impl ListingRecord {
    /// Values in `LISTING_COLUMNS` order, missing ones as empty cells.
    pub fn to_csv_fields(&self) -> Vec<String> {
        fn opt<T: ToString>(v: &Option<T>) -> String {
            v.as_ref().map(ToString::to_string).unwrap_or_default()
        }

        vec![
            self.city.clone(),
            self.period.clone(),
            self.lat.to_string(),
            self.lng.to_string(),
            opt(&self.room_type),
            opt(&self.person_capacity),
            opt(&self.real_sum),
            opt(&self.guest_satisfaction_overall),
            opt(&self.cleanliness_rating),
            opt(&self.dist),
            opt(&self.metro_dist),
            opt(&self.attr_index),
            opt(&self.rest_index),
        ]
    }
}
