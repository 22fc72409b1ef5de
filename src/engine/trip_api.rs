use super::{Command, Engine, PendingTrip};

use crate::{
    api::DispatchService,
    entities::{
        DriverStatus, RequestAffordance, RequestLabel, ResultPanel, TripAssignment, TripRequest,
    },
    error::Error,
};

#[tracing::instrument(skip(dispatch))]
pub async fn request_trip(
    dispatch: &(dyn DispatchService + Send + Sync),
    request: TripRequest,
) -> Result<TripAssignment, Error> {
    let result = dispatch.request_trip(request).await;

    if let Err(err) = &result {
        tracing::error!("trip request failed: {}", err);
    }

    result
}

impl Engine {
    pub(super) fn begin_trip(&mut self) -> Option<Command> {
        if !self.view.request.enabled {
            tracing::debug!("request affordance disabled, ignoring");
            return None;
        }

        let origin = match self.selection.origin() {
            Some(origin) => origin,
            None => {
                tracing::warn!("trip requested without an origin");
                return None;
            }
        };

        self.trip_seq += 1;
        self.pending_trip = Some(PendingTrip {
            token: self.trip_seq,
            generation: self.generation,
        });

        self.view.request = RequestAffordance {
            enabled: false,
            label: RequestLabel::Searching,
        };
        self.view.result = None;
        self.view.driver_status = None;

        tracing::info!("requesting trip {} from {}", self.trip_seq, origin);

        Some(Command::SubmitTrip {
            token: self.trip_seq,
            request: TripRequest::new(self.user_id.clone(), origin, self.city.clone()),
        })
    }

    pub(super) fn settle_trip(&mut self, token: u64, outcome: Result<TripAssignment, Error>) {
        let pending = match self.pending_trip {
            Some(pending) if pending.token == token => pending,
            _ => {
                tracing::debug!("no trip {} in flight, ignoring", token);
                return;
            }
        };
        self.pending_trip = None;

        if pending.generation == self.generation {
            match outcome {
                Ok(assignment) => {
                    self.view.driver_status = Some(DriverStatus::new(&assignment));
                    self.view.result = Some(ResultPanel::Success { assignment });
                }
                Err(_) => {
                    self.view.result = Some(ResultPanel::Failure);
                }
            }
        } else {
            tracing::debug!("selection changed while trip {} was in flight", token);
        }

        // runs on every outcome
        self.view.request.label = RequestLabel::Idle;
        self.view.request.enabled = self.view.route_info.is_some();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::engine::testing::*;
    use crate::engine::{request_trip, Command, Engine, Event};
    use crate::entities::{
        Coordinate, RequestLabel, ResultPanel, Route, TripRequest, DRIVER_STATUS_FADE_IN,
    };
    use crate::error::transport_error;

    fn a() -> Coordinate {
        Coordinate::new(-34.60, -58.38)
    }

    fn b() -> Coordinate {
        Coordinate::new(-34.62, -58.40)
    }

    fn routed() -> Engine {
        let mut engine = Engine::new(
            &config(),
            Arc::new(FakeRouting::returning(vec![])),
            Arc::new(FakeDispatch::failing()),
            Box::new(RecordingMap::default()),
        );

        engine.handle(Event::Click(a()));
        if let Some(Command::FetchRoute { token, .. }) = engine.handle(Event::Click(b())) {
            engine.handle(Event::RouteSettled {
                token,
                outcome: Ok(Some(Route::from_candidate(candidate(12345.0, 900.0)))),
            });
        }

        engine
    }

    fn submit(engine: &mut Engine) -> (u64, TripRequest) {
        match engine.handle(Event::RequestTrip) {
            Some(Command::SubmitTrip { token, request }) => (token, request),
            other => panic!("expected a trip submission, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn request_trip_passes_through_dispatch() {
        let dispatch = FakeDispatch::assigning(assignment(None));
        let request = TripRequest::new("u".into(), a(), "c".into());

        let result = request_trip(&dispatch, request.clone()).await;

        assert_eq!(result, Ok(assignment(None)));
        assert_eq!(dispatch.requests.lock().unwrap().as_slice(), &[request]);
    }

    #[test]
    fn disabled_until_route_is_drawn() {
        let mut engine = Engine::new(
            &config(),
            Arc::new(FakeRouting::returning(vec![])),
            Arc::new(FakeDispatch::failing()),
            Box::new(RecordingMap::default()),
        );

        engine.handle(Event::Click(a()));
        assert_eq!(engine.handle(Event::RequestTrip), None);
    }

    #[test]
    fn submission_uses_origin_and_configured_identity() {
        let mut engine = routed();

        let (_, request) = submit(&mut engine);

        assert_eq!(
            request,
            TripRequest {
                user_id: "user_demo".into(),
                lat: -34.60,
                lng: -58.38,
                city: "buenos_aires".into(),
            }
        );
        assert!(!engine.view().request.enabled);
        assert_eq!(engine.view().request.label, RequestLabel::Searching);
    }

    #[test]
    fn in_flight_blocks_a_second_request() {
        let mut engine = routed();

        submit(&mut engine);
        assert_eq!(engine.handle(Event::RequestTrip), None);
    }

    #[test]
    fn success_without_trace_id() {
        let mut engine = routed();
        let (token, _) = submit(&mut engine);

        engine.handle(Event::TripSettled {
            token,
            outcome: Ok(assignment(None)),
        });

        let view = engine.view();
        match &view.result {
            Some(ResultPanel::Success { assignment }) => {
                assert_eq!(assignment.driver_id, "d1");
                assert_eq!(assignment.trace_id, None);
            }
            other => panic!("expected success, got {:?}", other),
        }

        let status = view.driver_status.as_ref().unwrap();
        assert_eq!(status.driver_id, "d1");
        assert_eq!(status.eta_minutes, 6);
        assert_eq!(status.fade_in, DRIVER_STATUS_FADE_IN);

        assert_eq!(view.request.label, RequestLabel::Idle);
        assert!(view.request.enabled);
    }

    #[test]
    fn success_with_trace_id() {
        let mut engine = routed();
        let (token, _) = submit(&mut engine);

        engine.handle(Event::TripSettled {
            token,
            outcome: Ok(assignment(Some("sim_trace_1"))),
        });

        match &engine.view().result {
            Some(ResultPanel::Success { assignment }) => {
                assert_eq!(assignment.trace_id.as_deref(), Some("sim_trace_1"))
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[test]
    fn failure_shows_panel_without_driver_status() {
        let mut engine = routed();
        let (token, _) = submit(&mut engine);

        engine.handle(Event::TripSettled {
            token,
            outcome: Err(transport_error()),
        });

        assert_eq!(engine.view().result, Some(ResultPanel::Failure));
        assert_eq!(engine.view().driver_status, None);
        assert_eq!(engine.view().request.label, RequestLabel::Idle);
        assert!(engine.view().request.enabled);
    }

    #[test]
    fn new_request_hides_previous_result() {
        let mut engine = routed();
        let (token, _) = submit(&mut engine);
        engine.handle(Event::TripSettled {
            token,
            outcome: Ok(assignment(None)),
        });

        submit(&mut engine);

        assert_eq!(engine.view().result, None);
        assert_eq!(engine.view().driver_status, None);
    }

    #[test]
    fn result_after_clear_restores_label_only() {
        let mut engine = routed();
        let (token, _) = submit(&mut engine);

        engine.handle(Event::Clear);
        engine.handle(Event::TripSettled {
            token,
            outcome: Ok(assignment(None)),
        });

        assert_eq!(engine.view().result, None);
        assert_eq!(engine.view().driver_status, None);
        assert_eq!(engine.view().request.label, RequestLabel::Idle);
        assert!(!engine.view().request.enabled);
    }

    #[test]
    fn unknown_token_is_ignored() {
        let mut engine = routed();
        let (token, _) = submit(&mut engine);

        engine.handle(Event::TripSettled {
            token: token + 1,
            outcome: Ok(assignment(None)),
        });

        assert_eq!(engine.view().request.label, RequestLabel::Searching);
        assert_eq!(engine.view().result, None);
    }
}
