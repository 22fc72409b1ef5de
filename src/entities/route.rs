use geo_types::LineString;
use serde::{Deserialize, Serialize};

/// A single candidate as ranked by the routing provider.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteCandidate {
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub geometry: LineString<f64>,
}

/// The route currently drawn for an (origin, destination) pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub geometry: LineString<f64>,
    pub distance_km: f64,
    pub eta_minutes: u32,
}

impl Route {
    pub fn from_candidate(candidate: RouteCandidate) -> Self {
        Self {
            distance_km: (candidate.distance_meters / 100.0).round() / 10.0,
            eta_minutes: (candidate.duration_seconds / 60.0).ceil().max(0.0) as u32,
            geometry: candidate.geometry,
        }
    }
}
