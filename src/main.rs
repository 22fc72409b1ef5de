use std::sync::Arc;

use geo_types::LineString;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

use ridenow::api::{MapSurface, MapView, MarkerLabel, OverlayStyle};
use ridenow::config::Config;
use ridenow::engine::{Engine, Event};
use ridenow::entities::{Coordinate, ResultPanel, View, ASSIGNMENT_FAILED};
use ridenow::error::Error;
use ridenow::external::{HttpDispatch, MapboxDirections};

/// Text stand-in for the map widget.
struct ConsoleMap;

impl MapSurface for ConsoleMap {
    fn render_map(&mut self, view: &MapView) {
        println!("map {} centered on {} at zoom {}", view.style, view.center, view.zoom);
    }

    fn place_marker(&mut self, coordinate: Coordinate, label: MarkerLabel) {
        println!("marker {:?} at {}", label, coordinate);
    }

    fn add_overlay(&mut self, id: &str, geometry: &LineString<f64>, style: &OverlayStyle) {
        println!(
            "overlay {} drawn with {} points in {}",
            id,
            geometry.0.len(),
            style.line_color
        );
    }

    fn remove_overlay(&mut self, id: &str) {
        println!("overlay {} removed", id);
    }
}

fn parse(line: &str) -> Result<Option<Event>, Error> {
    let mut parts = line.trim().splitn(2, ' ');

    let event = match parts.next().unwrap_or_default() {
        "click" => Event::Click(parts.next().unwrap_or_default().parse()?),
        "yes" | "y" => Event::ConfirmReplace(true),
        "no" | "n" => Event::ConfirmReplace(false),
        "clear" => Event::Clear,
        "request" => Event::RequestTrip,
        "" => return Ok(None),
        _ => return Err(ridenow::error::invalid_input_error()),
    };

    Ok(Some(event))
}

fn present(previous: &View, view: &View) {
    if view.origin != previous.origin || view.destination != previous.destination {
        println!("origin: {}  destination: {}", view.origin_text(), view.destination_text());
    }

    if let Some(point) = view.confirm_replace.filter(|_| previous.confirm_replace.is_none()) {
        println!("origin and destination are set. Replace origin with {}? [yes/no]", point);
    }

    if view.route_info != previous.route_info {
        if let Some(info) = &view.route_info {
            println!("distance: {}  eta: {}", info.distance_text(), info.eta_text());
        }
    }

    if view.request != previous.request {
        let state = if view.request.enabled { "" } else { " (disabled)" };
        println!("[{}]{}", view.request.label.text(), state);
    }

    if view.result != previous.result {
        match &view.result {
            Some(ResultPanel::Success { assignment }) => {
                println!(
                    "assigned! driver {} is {} km away (latency {} ms)",
                    assignment.driver_id, assignment.distance_km, assignment.latency_ms
                );
                if let Some(trace_id) = &assignment.trace_id {
                    println!("  trace id: {}", trace_id);
                }
            }
            Some(ResultPanel::Failure) => println!("{}", ASSIGNMENT_FAILED),
            None => (),
        }
    }

    if view.driver_status != previous.driver_status {
        if let Some(status) = &view.driver_status {
            println!(
                "driver {} is on the way, arriving in ~{} min",
                status.driver_id, status.eta_minutes
            );
        }
    }

    if let Some(alert) = view.alert.as_ref().filter(|_| previous.alert.is_none()) {
        println!("! {}", alert);
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;

    let routing = Arc::new(MapboxDirections::new(
        config.mapbox_api_url.clone(),
        config.mapbox_access_token.clone(),
    ));
    let dispatch = Arc::new(HttpDispatch::new(config.dispatch_api_url.clone()));

    let engine = Engine::new(&config, routing, dispatch, Box::new(ConsoleMap));

    let (events, events_rx) = async_channel::unbounded();
    let (views, mut views_rx) = watch::channel(View::default());

    let session = tokio::spawn(engine.run(events_rx, views));

    tokio::spawn(async move {
        let mut previous = View::default();
        while views_rx.changed().await.is_ok() {
            let view = views_rx.borrow_and_update().clone();
            present(&previous, &view);
            previous = view;
        }
    });

    println!("commands: click <lat>,<lng> | yes | no | clear | request | quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Ok(Some(line)) = lines.next_line().await {
        if line.trim() == "quit" {
            break;
        }

        match parse(&line) {
            Ok(Some(event)) => {
                if events.send(event).await.is_err() {
                    break;
                }
            }
            Ok(None) => (),
            Err(_) => println!("unrecognized command: {}", line.trim()),
        }
    }

    drop(events);
    session.await.map_err(|_| ridenow::error::unexpected_error())?;

    Ok(())
}
