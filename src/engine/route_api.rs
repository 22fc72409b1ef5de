use super::Engine;

use crate::{
    api::{OverlayStyle, RoutingProvider, ROUTE_OVERLAY_ID},
    entities::{Coordinate, Route, RouteInfo, ROUTE_ALERT},
    error::Error,
};

/// Asks the provider for directions and keeps its best-ranked candidate.
/// `Ok(None)` means the provider found no route.
#[tracing::instrument(skip(routing))]
pub async fn compute_route(
    routing: &(dyn RoutingProvider + Send + Sync),
    origin: Coordinate,
    destination: Coordinate,
) -> Result<Option<Route>, Error> {
    let candidates = routing.get_route(origin, destination).await?;

    tracing::info!("received {} route candidates", candidates.len());

    Ok(candidates.into_iter().next().map(Route::from_candidate))
}

impl Engine {
    pub(super) fn settle_route(&mut self, token: u64, outcome: Result<Option<Route>, Error>) {
        if token != self.generation || !self.selection.is_complete() {
            tracing::debug!(
                "discarding route {}, selection is now at {}",
                token,
                self.generation
            );
            return;
        }

        match outcome {
            Ok(Some(route)) => self.draw_route(route),
            Ok(None) => {
                tracing::warn!("no route between the selected points");
            }
            Err(err) => {
                tracing::error!("failed to compute route: {}", err);
                self.view.alert = Some(ROUTE_ALERT.into());
            }
        }
    }

    fn draw_route(&mut self, route: Route) {
        tracing::info!(
            distance_km = route.distance_km,
            eta_minutes = route.eta_minutes,
            "drawing route"
        );

        self.view.route_info = Some(RouteInfo::from(&route));
        self.view.request.enabled = self.pending_trip.is_none();

        // old overlay goes before the new one is added
        self.map.remove_overlay(ROUTE_OVERLAY_ID);
        self.map
            .add_overlay(ROUTE_OVERLAY_ID, &route.geometry, &OverlayStyle::default());

        self.route = Some(route);
    }
}
