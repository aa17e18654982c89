//! WebSocket endpoint for the signaling channel
//!
//! One persistent connection per client. Each text frame carries one
//! envelope; inbound frames feed the hub dispatcher, outbound envelopes
//! are drained from the session's queue by a single writer task so writes
//! serialize per connection. When the socket closes, for any reason, the
//! departure path runs exactly once.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::hub::{dispatcher, SessionHandle};
use crate::protocol;
use crate::state::AppState;

/// WebSocket upgrade handler for `/ws`
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Drive one signaling connection to completion
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let (session, mut outbound) = SessionHandle::new();
    info!(session = %session.id(), "signaling client connected");

    // Sole writer for this socket: envelopes leave in queue order
    let writer = tokio::spawn(async move {
        while let Some(envelope) = outbound.recv().await {
            match protocol::encode(&envelope) {
                Ok(json) => {
                    if ws_tx.send(Message::Text(json)).await.is_err() {
                        break;
                    }
                }
                Err(e) => warn!("failed to encode envelope: {}", e),
            }
        }
    });

    // The identity this session acquires by joining a room
    let mut seat: Option<String> = None;

    while let Some(frame) = ws_rx.next().await {
        match frame {
            Ok(Message::Text(text)) => match protocol::decode(&text) {
                Ok(envelope) => {
                    dispatcher::handle_message(&state.hub, &session, &mut seat, envelope.message)
                }
                Err(e) => {
                    debug!(session = %session.id(), "dropping undecodable frame: {}", e)
                }
            },
            Ok(Message::Close(_)) => {
                debug!(session = %session.id(), "close frame received");
                break;
            }
            // Pings are answered by the websocket layer; binary frames have
            // no meaning on this channel
            Ok(_) => {}
            Err(e) => {
                warn!(session = %session.id(), "websocket error: {}", e);
                break;
            }
        }
    }

    dispatcher::handle_disconnect(&state.hub, &mut seat);
    writer.abort();
    info!(session = %session.id(), "signaling client disconnected");
}
