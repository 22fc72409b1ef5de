use super::{Command, Engine};

use crate::{
    api::{MarkerLabel, ROUTE_OVERLAY_ID},
    entities::{Coordinate, Transition},
};

impl Engine {
    pub(super) fn click(&mut self, point: Coordinate) -> Option<Command> {
        match self.selection.select(point) {
            Transition::OriginSelected(origin) => {
                self.view.origin = Some(origin);
                self.map.place_marker(origin, MarkerLabel::Origin);

                None
            }
            Transition::DestinationSelected {
                origin,
                destination,
            } => {
                self.view.destination = Some(destination);
                self.map.place_marker(destination, MarkerLabel::Destination);

                self.generation += 1;

                tracing::info!("both points selected, fetching route {}", self.generation);

                Some(Command::FetchRoute {
                    token: self.generation,
                    origin,
                    destination,
                })
            }
            Transition::ReplaceRequested(point) => {
                tracing::info!("origin and destination already set, asking to replace origin");

                self.pending_replace = Some(point);
                self.view.confirm_replace = Some(point);

                None
            }
        }
    }

    pub(super) fn confirm_replace(&mut self, confirmed: bool) -> Option<Command> {
        self.view.confirm_replace = None;

        let point = match self.pending_replace.take() {
            Some(point) => point,
            None => {
                tracing::debug!("no replacement pending, ignoring answer");
                return None;
            }
        };

        if !confirmed {
            tracing::info!("replacement declined, keeping selection");
            return None;
        }

        self.clear();
        self.click(point)
    }

    /// Returns to an empty selection from any state.
    pub(super) fn clear(&mut self) {
        self.selection.reset();
        self.generation += 1;
        self.pending_replace = None;
        self.route = None;

        self.view.origin = None;
        self.view.destination = None;
        self.view.confirm_replace = None;
        self.view.route_info = None;
        self.view.driver_status = None;
        self.view.request.enabled = false;

        self.map.remove_overlay(ROUTE_OVERLAY_ID);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::engine::testing::*;
    use crate::engine::{Command, Engine, Event};
    use crate::entities::{Coordinate, Selection};
    use crate::api::MarkerLabel;

    fn engine() -> (Engine, RecordingMap) {
        let map = RecordingMap::default();
        let engine = Engine::new(
            &config(),
            Arc::new(FakeRouting::returning(vec![candidate(1000.0, 60.0)])),
            Arc::new(FakeDispatch::failing()),
            Box::new(map.clone()),
        );

        (engine, map)
    }

    fn a() -> Coordinate {
        Coordinate::new(-34.60, -58.38)
    }

    fn b() -> Coordinate {
        Coordinate::new(-34.62, -58.40)
    }

    fn c() -> Coordinate {
        Coordinate::new(-34.58, -58.42)
    }

    #[test]
    fn renders_map_on_start() {
        let (_, map) = engine();
        assert_eq!(map.0.lock().unwrap().rendered, Some(config().map));
    }

    #[test]
    fn first_click_sets_origin() {
        let (mut engine, map) = engine();

        assert_eq!(engine.handle(Event::Click(a())), None);
        assert_eq!(engine.selection(), Selection::OriginSet { origin: a() });
        assert_eq!(engine.view().origin_text(), "-34.6000, -58.3800");
        assert_eq!(map.0.lock().unwrap().markers, vec![(a(), MarkerLabel::Origin)]);
    }

    #[test]
    fn second_click_sets_destination_and_fetches_route() {
        let (mut engine, map) = engine();

        engine.handle(Event::Click(a()));
        let command = engine.handle(Event::Click(b()));

        assert_eq!(
            command,
            Some(Command::FetchRoute {
                token: 1,
                origin: a(),
                destination: b()
            })
        );
        assert!(engine.selection().is_complete());
        assert_eq!(engine.view().destination, Some(b()));
        assert_eq!(map.0.lock().unwrap().markers[1], (b(), MarkerLabel::Destination));
    }

    #[test]
    fn third_click_asks_before_replacing() {
        let (mut engine, _) = engine();

        engine.handle(Event::Click(a()));
        engine.handle(Event::Click(b()));

        assert_eq!(engine.handle(Event::Click(c())), None);
        assert_eq!(engine.view().confirm_replace, Some(c()));
        assert_eq!(engine.selection().origin(), Some(a()));
    }

    #[test]
    fn confirmed_replace_starts_over_from_the_click() {
        let (mut engine, map) = engine();

        engine.handle(Event::Click(a()));
        engine.handle(Event::Click(b()));
        engine.handle(Event::Click(c()));

        assert_eq!(engine.handle(Event::ConfirmReplace(true)), None);

        assert_eq!(engine.selection(), Selection::OriginSet { origin: c() });
        assert_eq!(engine.view().destination, None);
        assert_eq!(engine.view().confirm_replace, None);

        let log = map.0.lock().unwrap();
        let new_origins = log
            .markers
            .iter()
            .filter(|(coordinate, label)| *coordinate == c() && *label == MarkerLabel::Origin)
            .count();
        assert_eq!(new_origins, 1);
    }

    #[test]
    fn declined_replace_changes_nothing() {
        let (mut engine, map) = engine();

        engine.handle(Event::Click(a()));
        engine.handle(Event::Click(b()));
        let before = engine.selection();
        let markers = map.0.lock().unwrap().markers.len();

        engine.handle(Event::Click(c()));
        assert_eq!(engine.handle(Event::ConfirmReplace(false)), None);

        assert_eq!(engine.selection(), before);
        assert_eq!(engine.view().confirm_replace, None);
        assert_eq!(map.0.lock().unwrap().markers.len(), markers);
    }

    #[test]
    fn unsolicited_answer_is_ignored() {
        let (mut engine, _) = engine();

        engine.handle(Event::Click(a()));
        assert_eq!(engine.handle(Event::ConfirmReplace(true)), None);
        assert_eq!(engine.selection(), Selection::OriginSet { origin: a() });
    }

    #[test]
    fn later_click_replaces_pending_candidate() {
        let (mut engine, _) = engine();

        engine.handle(Event::Click(a()));
        engine.handle(Event::Click(b()));
        engine.handle(Event::Click(c()));
        engine.handle(Event::Click(a()));
        engine.handle(Event::ConfirmReplace(true));

        assert_eq!(engine.selection(), Selection::OriginSet { origin: a() });
    }

    #[test]
    fn clear_from_every_state() {
        let points = [vec![], vec![a()], vec![a(), b()], vec![a(), b(), c()]];

        for clicks in points {
            let (mut engine, map) = engine();

            for point in clicks {
                engine.handle(Event::Click(point));
            }
            engine.handle(Event::Clear);

            assert_eq!(engine.selection(), Selection::Empty);
            assert_eq!(engine.view().origin, None);
            assert_eq!(engine.view().destination, None);
            assert_eq!(engine.view().route_info, None);
            assert_eq!(engine.view().driver_status, None);
            assert_eq!(engine.view().confirm_replace, None);
            assert!(!engine.view().request.enabled);
            assert!(map.0.lock().unwrap().overlays.is_empty());
        }
    }

    #[test]
    fn clear_drops_pending_confirmation() {
        let (mut engine, _) = engine();

        engine.handle(Event::Click(a()));
        engine.handle(Event::Click(b()));
        engine.handle(Event::Click(c()));
        engine.handle(Event::Clear);

        assert_eq!(engine.handle(Event::ConfirmReplace(true)), None);
        assert_eq!(engine.selection(), Selection::Empty);
    }
}
