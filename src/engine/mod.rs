mod route_api;
mod selection_api;
mod trip_api;

pub use route_api::compute_route;
pub use trip_api::request_trip;

use async_channel::{Receiver, Sender};
use tokio::sync::watch;
use uuid::Uuid;

use crate::{
    api::{DynDispatch, DynMap, DynRouting},
    config::Config,
    entities::{Coordinate, Route, Selection, TripAssignment, TripRequest, View},
    error::Error,
};

/// Inputs to a session, in the order they are handled.
#[derive(Debug)]
pub enum Event {
    Click(Coordinate),
    /// Answer to the "replace origin?" prompt raised by a click while both
    /// points are set.
    ConfirmReplace(bool),
    Clear,
    RequestTrip,
    RouteSettled {
        token: u64,
        outcome: Result<Option<Route>, Error>,
    },
    TripSettled {
        token: u64,
        outcome: Result<TripAssignment, Error>,
    },
}

/// Outbound work a transition asks for. Each one is a single network call
/// whose result comes back as the matching `*Settled` event.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    FetchRoute {
        token: u64,
        origin: Coordinate,
        destination: Coordinate,
    },
    SubmitTrip {
        token: u64,
        request: TripRequest,
    },
}

#[derive(Clone, Copy, Debug)]
struct PendingTrip {
    token: u64,
    generation: u64,
}

/// One interactive session: selection, current route, trip request and the
/// view derived from them.
pub struct Engine {
    id: Uuid,
    user_id: String,
    city: String,
    selection: Selection,
    /// Bumped on every reset and every entry into `BothSet`; route results
    /// carrying an older value are dropped.
    generation: u64,
    pending_replace: Option<Coordinate>,
    route: Option<Route>,
    trip_seq: u64,
    pending_trip: Option<PendingTrip>,
    view: View,
    map: DynMap,
    routing: DynRouting,
    dispatch: DynDispatch,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub fn new(config: &Config, routing: DynRouting, dispatch: DynDispatch, mut map: DynMap) -> Self {
        map.render_map(&config.map);

        let id = Uuid::new_v4();
        tracing::info!(session = %id, city = %config.city, "session started");

        Self {
            id,
            user_id: config.user_id.clone(),
            city: config.city.clone(),
            selection: Selection::default(),
            generation: 0,
            pending_replace: None,
            route: None,
            trip_seq: 0,
            pending_trip: None,
            view: View::default(),
            map,
            routing,
            dispatch,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    /// Applies one event. Never waits on the network: any call the event
    /// requires is handed back as a `Command`.
    #[tracing::instrument(skip(self), fields(session = %self.id, selection = %self.selection.name()))]
    pub fn handle(&mut self, event: Event) -> Option<Command> {
        match event {
            Event::Click(point) => {
                self.view.alert = None;
                self.click(point)
            }
            Event::ConfirmReplace(confirmed) => {
                self.view.alert = None;
                self.confirm_replace(confirmed)
            }
            Event::Clear => {
                self.view.alert = None;
                self.clear();
                None
            }
            Event::RequestTrip => {
                self.view.alert = None;
                self.begin_trip()
            }
            Event::RouteSettled { token, outcome } => {
                self.settle_route(token, outcome);
                None
            }
            Event::TripSettled { token, outcome } => {
                self.settle_trip(token, outcome);
                None
            }
        }
    }

    /// Processes user events in arrival order until every sender is dropped,
    /// publishing the view after each one. Network calls run as separate
    /// tasks and re-enter the loop as `*Settled` events.
    pub async fn run(mut self, events: Receiver<Event>, views: watch::Sender<View>) {
        let (settled_tx, settled_rx) = async_channel::unbounded();

        views.send_replace(self.view.clone());

        loop {
            let event = tokio::select! {
                Ok(event) = settled_rx.recv() => event,
                event = events.recv() => match event {
                    Ok(event) => event,
                    Err(_) => break,
                },
            };

            if let Some(command) = self.handle(event) {
                self.spawn(command, settled_tx.clone());
            }

            views.send_replace(self.view.clone());
        }

        tracing::info!(session = %self.id, "session ended");
    }

    fn spawn(&self, command: Command, settled: Sender<Event>) {
        match command {
            Command::FetchRoute {
                token,
                origin,
                destination,
            } => {
                let routing = self.routing.clone();

                tokio::spawn(async move {
                    let outcome = compute_route(&*routing, origin, destination).await;

                    if settled.send(Event::RouteSettled { token, outcome }).await.is_err() {
                        tracing::debug!("session closed before route {} settled", token);
                    }
                });
            }
            Command::SubmitTrip { token, request } => {
                let dispatch = self.dispatch.clone();

                tokio::spawn(async move {
                    let outcome = request_trip(&*dispatch, request).await;

                    if settled.send(Event::TripSettled { token, outcome }).await.is_err() {
                        tracing::debug!("session closed before trip {} settled", token);
                    }
                });
            }
        }
    }
}
