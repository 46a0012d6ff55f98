//! Live sensor state changes as Server-Sent Events.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, KeepAliveStream, Sse};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, warn};

use crate::state::AppState;

const EVENT_BUFFER: usize = 32;

/// GET /sensors/events: one `state` event per applied state change.
///
/// Each client gets its own registry subscription, bridged to the response
/// through a channel. The bridge task ends when the client goes away.
pub async fn sensor_events(
    State(state): State<Arc<AppState>>,
) -> Sse<KeepAliveStream<ReceiverStream<Result<Event, Infallible>>>> {
    let mut updates = state.registry.read().await.subscribe();
    let (tx, rx) = mpsc::channel::<Result<Event, Infallible>>(EVENT_BUFFER);

    tokio::spawn(async move {
        loop {
            let update = tokio::select! {
                _ = tx.closed() => break,
                received = updates.recv() => match received {
                    Ok(update) => update,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "sensor event stream lagging, updates dropped");
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                },
            };

            let event = match Event::default().event("state").json_data(&update) {
                Ok(event) => event,
                Err(e) => {
                    warn!(error = %e, sensor = %update.name, "failed to encode sensor update");
                    continue;
                }
            };
            if tx.send(Ok(event)).await.is_err() {
                break;
            }
        }
        debug!("sensor event stream closed");
    });

    Sse::new(ReceiverStream::new(rx)).keep_alive(KeepAlive::default())
}
