pub mod routes;

use crate::AppData;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use cup_core::SessionEvent;
use log::{debug, warn};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

/// Upgrades the connection and forwards every broadcast event to the
/// client as a JSON text frame. The channel only carries deltas: a new
/// client is expected to fetch the full state from the query endpoints
/// before (or right after) subscribing.
pub async fn ws_action(State(state): State<AppData>, ws: WebSocketUpgrade) -> impl IntoResponse {
    let receiver = state.hub.subscribe();
    ws.on_upgrade(move |socket| forward_events(socket, receiver))
}

async fn forward_events(mut socket: WebSocket, mut receiver: broadcast::Receiver<SessionEvent>) {
    debug!("viewer connected");

    loop {
        let event = match receiver.recv().await {
            Ok(event) => event,
            Err(RecvError::Lagged(missed)) => {
                // Best effort, no replay. The client reconciles by
                // reloading the snapshot if it notices the gap.
                warn!("viewer lagged, {} events dropped", missed);
                continue;
            }
            Err(RecvError::Closed) => break,
        };

        let text = match serde_json::to_string(&event) {
            Ok(text) => text,
            Err(err) => {
                warn!("event serialization failed: {}", err);
                continue;
            }
        };

        if socket.send(Message::Text(text.into())).await.is_err() {
            break;
        }
    }

    debug!("viewer disconnected");
}
