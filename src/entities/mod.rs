mod coordinate;
mod route;
mod selection;
mod trip;
mod view;

pub use coordinate::Coordinate;
pub use route::{Route, RouteCandidate};
pub use selection::{Selection, Transition};
pub use trip::{TripAssignment, TripRequest};
pub use view::{
    DriverStatus, RequestAffordance, RequestLabel, ResultPanel, RouteInfo, View,
    ASSIGNMENT_FAILED, DRIVER_STATUS_FADE_IN, PLACEHOLDER, ROUTE_ALERT,
};
