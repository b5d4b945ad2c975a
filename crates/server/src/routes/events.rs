//! WebSocket route for real-time order events.
//!
//! Clients connect and receive one JSON text frame per placed order:
//!
//! ```json
//! {"event": "newOrder", "data": {"userId": 5, "totalCarbon": "9.2"}}
//! ```
//!
//! The stream is server-to-client only; inbound frames other than
//! close/ping are ignored. Delivery is best-effort — a client that lags
//! past the channel capacity misses the skipped events and the stream
//! continues.

use axum::{
    extract::State,
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    response::Response,
};
use serde::Serialize;
use tokio::sync::broadcast::Receiver;
use tokio::sync::broadcast::error::RecvError;

use crate::broadcast::OrderEvent;
use crate::state::AppState;

/// Wire envelope for pushed events.
#[derive(Debug, Serialize)]
struct Envelope<'a> {
    event: &'static str,
    data: &'a OrderEvent,
}

/// `GET /ws` - upgrade to a WebSocket and stream order events.
pub async fn ws(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    let rx = state.broadcaster().subscribe();
    ws.on_upgrade(move |socket| stream_events(socket, rx))
}

/// Forward broadcast events to one connected client until it disconnects.
async fn stream_events(mut socket: WebSocket, mut rx: Receiver<OrderEvent>) {
    tracing::debug!("websocket client connected");

    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Ok(event) => {
                    let frame = match serde_json::to_string(&Envelope {
                        event: "newOrder",
                        data: &event,
                    }) {
                        Ok(frame) => frame,
                        Err(e) => {
                            tracing::error!(error = %e, "failed to serialize order event");
                            continue;
                        }
                    };

                    if socket.send(Message::Text(frame.into())).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "websocket client lagged, events dropped");
                }
                Err(RecvError::Closed) => break,
            },
            incoming = socket.recv() => match incoming {
                // Client-initiated messages are not part of the protocol
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }

    tracing::debug!("websocket client disconnected");
}
