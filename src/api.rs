use std::sync::Arc;

use async_trait::async_trait;
use geo_types::LineString;
use serde::{Deserialize, Serialize};

use crate::entities::{Coordinate, RouteCandidate, TripAssignment, TripRequest};
use crate::error::Error;

pub const ROUTE_OVERLAY_ID: &str = "route";

/// Directions capability of the map provider.
#[async_trait]
pub trait RoutingProvider {
    /// Candidates are returned in the provider's ranking, best first. An
    /// empty list means no route between the two points.
    async fn get_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Vec<RouteCandidate>, Error>;
}

/// Assigns a driver to a rider.
#[async_trait]
pub trait DispatchService {
    async fn request_trip(&self, request: TripRequest) -> Result<TripAssignment, Error>;
}

/// The drawable map. `add_overlay` and `remove_overlay` are idempotent with
/// respect to the overlay id.
pub trait MapSurface {
    fn render_map(&mut self, view: &MapView);
    fn place_marker(&mut self, coordinate: Coordinate, label: MarkerLabel);
    fn add_overlay(&mut self, id: &str, geometry: &LineString<f64>, style: &OverlayStyle);
    fn remove_overlay(&mut self, id: &str);
}

pub type DynRouting = Arc<dyn RoutingProvider + Send + Sync>;
pub type DynDispatch = Arc<dyn DispatchService + Send + Sync>;
pub type DynMap = Box<dyn MapSurface + Send>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: f64,
    pub style: String,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: Coordinate::new(-34.6037, -58.3816),
            zoom: 12.0,
            style: "mapbox://styles/mapbox/streets-v12".into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerLabel {
    Origin,
    Destination,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OverlayStyle {
    pub line_color: String,
    pub line_width: f64,
    pub line_join: String,
    pub line_cap: String,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            line_color: "#3b82f6".into(),
            line_width: 6.0,
            line_join: "round".into(),
            line_cap: "round".into(),
        }
    }
}
