//! `GET /api/events`: live feed of searches and discovery runs.
//!
//! Each frame is named after its [`AppEvent`] variant (`discovery_started`,
//! `discovery_completed`, ...) and carries the event as JSON, so a page can
//! attach one listener per kind.

use std::convert::Infallible;
use std::time::Duration;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures_util::Stream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;
use tracing::{debug, warn};

use crate::state::{AppEvent, SharedState};

const KEEP_ALIVE: Duration = Duration::from_secs(15);

pub async fn sse_handler(
    State(state): State<SharedState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    debug!("event stream subscriber connected");
    let stream = BroadcastStream::new(state.subscribe()).filter_map(|received| match received {
        Ok(event) => to_sse(&event).map(Ok),
        Err(BroadcastStreamRecvError::Lagged(missed)) => {
            warn!(missed, "event stream subscriber lagged, events dropped");
            None
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::new().interval(KEEP_ALIVE).text("ping"))
}

fn to_sse(event: &AppEvent) -> Option<Event> {
    match Event::default().event(event.name()).json_data(event) {
        Ok(frame) => Some(frame),
        Err(e) => {
            warn!(event = event.name(), error = %e, "could not encode event");
            None
        }
    }
}
