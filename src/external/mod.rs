pub mod dispatch;
pub mod mapbox;

pub use dispatch::HttpDispatch;
pub use mapbox::MapboxDirections;
