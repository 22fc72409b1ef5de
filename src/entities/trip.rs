use serde::{Deserialize, Deserializer, Serialize};

use crate::entities::Coordinate;

/// Body of `POST /trip/request`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    pub user_id: String,
    pub lat: f64,
    pub lng: f64,
    pub city: String,
}

impl TripRequest {
    pub fn new(user_id: String, origin: Coordinate, city: String) -> Self {
        Self {
            user_id,
            lat: origin.lat,
            lng: origin.lng,
            city,
        }
    }
}

/// A driver assigned by the dispatch service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TripAssignment {
    pub driver_id: String,
    pub distance_km: f64,
    pub latency_ms: i64,
    #[serde(default, deserialize_with = "non_empty")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

impl TripAssignment {
    /// Rough minutes until the driver reaches the rider, never below two.
    pub fn driver_eta_minutes(&self) -> u32 {
        ((self.distance_km * 2.0).floor().max(0.0) as u32).max(2)
    }
}

// The trip service writes a missing trace id as "".
fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
