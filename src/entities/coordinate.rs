use std::fmt;

use geo_types::Coord;
use serde::{Deserialize, Serialize};

use crate::error::{invalid_input_error, Error};

/// A point picked on the map. Immutable once captured.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `lng,lat` pair as expected in routing URLs.
    pub fn to_lng_lat(&self) -> String {
        format!("{},{}", self.lng, self.lat)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lng)
    }
}

impl std::str::FromStr for Coordinate {
    type Err = Error;

    /// Parses `"lat,lng"` (whitespace around either part is ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s.split_once(',').ok_or_else(invalid_input_error)?;

        let lat: f64 = lat.trim().parse().map_err(|_| invalid_input_error())?;
        let lng: f64 = lng.trim().parse().map_err(|_| invalid_input_error())?;

        if !lat.is_finite() || !lng.is_finite() {
            return Err(invalid_input_error());
        }

        Ok(Self { lat, lng })
    }
}

impl From<Coordinate> for Coord<f64> {
    fn from(c: Coordinate) -> Self {
        Coord { x: c.lng, y: c.lat }
    }
}
