use std::time::Duration;

use serde::Serialize;

use crate::entities::{Coordinate, Route, TripAssignment};

pub const PLACEHOLDER: &str = "—";
pub const ROUTE_ALERT: &str = "Could not compute the route. Try other points.";
pub const ASSIGNMENT_FAILED: &str = "Could not assign a driver.";
pub const DRIVER_STATUS_FADE_IN: Duration = Duration::from_millis(500);

/// Everything the presentation layer shows, independent of how it is drawn.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct View {
    pub origin: Option<Coordinate>,
    pub destination: Option<Coordinate>,
    pub route_info: Option<RouteInfo>,
    pub request: RequestAffordance,
    pub result: Option<ResultPanel>,
    pub driver_status: Option<DriverStatus>,
    /// Set while a click waits for "replace origin?" to be answered.
    pub confirm_replace: Option<Coordinate>,
    pub alert: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RouteInfo {
    pub distance_km: f64,
    pub eta_minutes: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RequestAffordance {
    pub enabled: bool,
    pub label: RequestLabel,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestLabel {
    Idle,
    Searching,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum ResultPanel {
    Success { assignment: TripAssignment },
    Failure,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DriverStatus {
    pub driver_id: String,
    pub eta_minutes: u32,
    pub fade_in: Duration,
}

impl Default for View {
    fn default() -> Self {
        Self {
            origin: None,
            destination: None,
            route_info: None,
            request: RequestAffordance {
                enabled: false,
                label: RequestLabel::Idle,
            },
            result: None,
            driver_status: None,
            confirm_replace: None,
            alert: None,
        }
    }
}

impl View {
    pub fn origin_text(&self) -> String {
        coordinate_text(self.origin)
    }

    pub fn destination_text(&self) -> String {
        coordinate_text(self.destination)
    }
}

fn coordinate_text(coordinate: Option<Coordinate>) -> String {
    coordinate
        .map(|c| c.to_string())
        .unwrap_or_else(|| PLACEHOLDER.into())
}

impl From<&Route> for RouteInfo {
    fn from(route: &Route) -> Self {
        Self {
            distance_km: route.distance_km,
            eta_minutes: route.eta_minutes,
        }
    }
}

impl RouteInfo {
    pub fn distance_text(&self) -> String {
        format!("{:.1} km", self.distance_km)
    }

    pub fn eta_text(&self) -> String {
        format!("{} min", self.eta_minutes)
    }
}

impl RequestLabel {
    pub fn text(&self) -> &'static str {
        match self {
            Self::Idle => "Request ride",
            Self::Searching => "Searching for driver...",
        }
    }
}

impl DriverStatus {
    pub fn new(assignment: &TripAssignment) -> Self {
        Self {
            driver_id: assignment.driver_id.clone(),
            eta_minutes: assignment.driver_eta_minutes(),
            fade_in: DRIVER_STATUS_FADE_IN,
        }
    }
}
