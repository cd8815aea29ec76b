//! HTTP command surface
//!
//! `GET /cmd/{name}` publishes the named UI command onto the bus; the
//! response bodies match the appliance's original interface so existing
//! clients keep working.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use speaker_core::{Event, Publisher, UiCommand};
use tracing::info;

/// Build the command router around a bus publisher
pub fn router(ui: Publisher) -> Router {
    Router::new()
        .route("/cmd/:name", get(run_command))
        .with_state(ui)
}

async fn run_command(
    State(ui): State<Publisher>,
    Path(name): Path<String>,
) -> (StatusCode, String) {
    let Some(cmd) = UiCommand::from_str(&name) else {
        return (StatusCode::BAD_REQUEST, format!("Invalid command: {name}\n"));
    };

    info!(command = cmd.as_str(), "ui command received");
    match ui.publish(Event::Ui(cmd)) {
        Ok(()) => (StatusCode::OK, format!("Ran command: {name}\n")),
        Err(err) => (
            StatusCode::SERVICE_UNAVAILABLE,
            format!("Command dropped: {err}\n"),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use speaker_core::{EventBus, OverflowPolicy};
    use tower::ServiceExt;

    fn get_cmd(name: &str) -> Request<Body> {
        Request::builder()
            .uri(format!("/cmd/{name}"))
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn valid_command_is_published() {
        let bus = EventBus::new(4);
        let app = router(bus.publisher(OverflowPolicy::DropNewest));
        let rx = bus.into_receiver();

        let response = app.oneshot(get_cmd("volume-up")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(rx.receive(), Some(Event::Ui(UiCommand::VolumeUp)));
    }

    #[tokio::test]
    async fn unknown_command_rejected() {
        let bus = EventBus::new(4);
        let app = router(bus.publisher(OverflowPolicy::DropNewest));

        let response = app.oneshot(get_cmd("self-destruct")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn full_bus_reports_unavailable() {
        let bus = EventBus::new(1);
        let publisher = bus.publisher(OverflowPolicy::DropNewest);
        publisher.publish(Event::Ui(UiCommand::VolumeDown)).unwrap();

        let app = router(publisher);
        let response = app.oneshot(get_cmd("volume-up")).await.unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
