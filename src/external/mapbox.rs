use async_trait::async_trait;
use geo_types::{Coord, LineString};
use serde::{Deserialize, Serialize};

use crate::{
    api::RoutingProvider,
    entities::{Coordinate, RouteCandidate},
    error::{invalid_input_error, upstream_error, Error},
};

/// Mapbox Directions API, driving profile.
#[derive(Clone, Debug)]
pub struct MapboxDirections {
    client: reqwest::Client,
    api_url: String,
    access_token: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Response {
    code: String,
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct DirectionsRoute {
    distance: f64,
    duration: f64,
    geometry: Geometry,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Geometry {
    coordinates: Vec<[f64; 2]>,
}

impl MapboxDirections {
    pub fn new(api_url: String, access_token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').into(),
            access_token,
        }
    }

    fn url(&self, origin: Coordinate, destination: Coordinate) -> String {
        format!(
            "{}/directions/v5/mapbox/driving/{};{}",
            self.api_url,
            origin.to_lng_lat(),
            destination.to_lng_lat()
        )
    }
}

#[async_trait]
impl RoutingProvider for MapboxDirections {
    #[tracing::instrument(skip(self))]
    async fn get_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Vec<RouteCandidate>, Error> {
        let res = self
            .client
            .get(self.url(origin, destination))
            .query(&[("geometries", "geojson")])
            .query(&[("access_token", &self.access_token)])
            .send()
            .await?;

        let status_code = res.status().as_u16();

        if (400..500).contains(&status_code) {
            // a rejected pair of points still carries a directions body
            let body = res.text().await?;

            return match serde_json::from_str::<Response>(&body) {
                Ok(data) => {
                    tracing::warn!(
                        "directions rejected points with status {} and code {:?}",
                        status_code,
                        data.code
                    );
                    Ok(vec![])
                }
                Err(_) => Err(invalid_input_error()),
            };
        } else if status_code != 200 {
            return Err(upstream_error());
        }

        let data: Response = res.json().await?;

        if data.code != "Ok" {
            tracing::warn!("directions returned code {:?}", data.code);
        }

        Ok(data.routes.into_iter().map(candidate).collect())
    }
}

fn candidate(route: DirectionsRoute) -> RouteCandidate {
    let coords: Vec<Coord<f64>> = route
        .geometry
        .coordinates
        .into_iter()
        .map(|[lng, lat]| Coordinate::new(lat, lng).into())
        .collect();

    RouteCandidate {
        distance_meters: route.distance,
        duration_seconds: route.duration,
        geometry: LineString::new(coords),
    }
}
