use std::env;

use crate::api::MapView;
use crate::entities::Coordinate;
use crate::error::{invalid_input_error, Error};

#[derive(Clone, Debug)]
pub struct Config {
    pub mapbox_api_url: String,
    pub mapbox_access_token: String,
    pub dispatch_api_url: String,
    pub user_id: String,
    pub city: String,
    pub map: MapView,
}

impl Config {
    /// Reads the process environment. Only the Mapbox token is required.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key))
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Result<String, env::VarError>,
    {
        let or = |key: &str, default: &str| lookup(key).unwrap_or_else(|_| default.into());

        let mut map = MapView::default();

        if let Ok(center) = lookup("RIDENOW_MAP_CENTER") {
            map.center = center.parse::<Coordinate>()?;
        }
        if let Ok(zoom) = lookup("RIDENOW_MAP_ZOOM") {
            map.zoom = zoom.trim().parse().map_err(|_| invalid_input_error())?;
        }
        if let Ok(style) = lookup("RIDENOW_MAP_STYLE") {
            map.style = style;
        }

        Ok(Self {
            mapbox_api_url: or("MAPBOX_API_URL", "https://api.mapbox.com"),
            mapbox_access_token: lookup("MAPBOX_ACCESS_TOKEN")?,
            dispatch_api_url: or("DISPATCH_API_URL", "http://localhost:8080"),
            user_id: or("RIDENOW_USER_ID", "user_demo"),
            city: or("RIDENOW_CITY", "buenos_aires"),
            map,
        })
    }
}
