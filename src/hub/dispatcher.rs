//! Inbound envelope dispatch
//!
//! One logical dispatcher per session: the connection's read loop decodes
//! a frame and hands the message here together with the session's seat
//! (the identity it acquired by joining, if any). Registry mutations
//! happen under the hub lock inside the [`Hub`] operations; every send
//! happens here, after the lock is gone.

use tracing::{debug, info, warn};

use crate::hub::registry::Hub;
use crate::hub::session::SessionHandle;
use crate::hub::types::Role;
use crate::protocol::{
    ChatSend, ClientMessage, ErrorCode, JoinRequest, ServerMessage, SignalPayload,
};

/// Handle one decoded inbound message
///
/// `seat` is the user id this session acquired by joining, owned by the
/// connection's read loop. Before a join, everything except JOIN_ROOM is
/// ignored.
pub fn handle_message(
    hub: &Hub,
    session: &SessionHandle,
    seat: &mut Option<String>,
    message: ClientMessage,
) {
    match message {
        ClientMessage::JoinRoom(request) => handle_join(hub, session, seat, request),
        message => {
            let Some(user_id) = seat.as_deref() else {
                debug!(session = %session.id(), "ignoring frame from session that has not joined");
                return;
            };
            match message {
                ClientMessage::ChatMessage(send) => handle_chat(hub, user_id, send),
                ClientMessage::StreamReady(_) => handle_stream_ready(hub, user_id),
                ClientMessage::ViewerReady(_) => handle_viewer_ready(hub, user_id),
                ClientMessage::Offer(payload) => {
                    relay_signal(hub, user_id, payload, ServerMessage::Offer)
                }
                ClientMessage::Answer(payload) => {
                    relay_signal(hub, user_id, payload, ServerMessage::Answer)
                }
                ClientMessage::IceCandidate(payload) => {
                    relay_signal(hub, user_id, payload, ServerMessage::IceCandidate)
                }
                ClientMessage::JoinRoom(_) => unreachable!("handled by the outer match"),
            }
        }
    }
}

/// Run the departure path for a closed connection
///
/// Safe to call for sessions that never joined, and a second call is a
/// no-op: the seat is taken on the first call and the registry removal is
/// itself idempotent.
pub fn handle_disconnect(hub: &Hub, seat: &mut Option<String>) {
    let Some(user_id) = seat.take() else {
        return;
    };
    let Some(departure) = hub.part(&user_id) else {
        return;
    };
    info!(
        user = %departure.user.id,
        username = %departure.user.username,
        room = %departure.user.room_id,
        "user left"
    );

    if let Some(room) = departure.room {
        for member in &departure.remaining {
            member.send(ServerMessage::UserLeft {
                user: departure.user.clone(),
                room: room.clone(),
            });
        }
        for member in &departure.remaining {
            member.send(ServerMessage::RoomState { room: room.clone() });
        }
    }
}

fn handle_join(
    hub: &Hub,
    session: &SessionHandle,
    seat: &mut Option<String>,
    request: JoinRequest,
) {
    if seat.is_some() {
        // Accepting would seat one session twice; the client is confused
        warn!(session = %session.id(), "ignoring JOIN_ROOM from an already-seated session");
        return;
    }
    let Some(role) = Role::parse(&request.role) else {
        session.send(ServerMessage::Error {
            code: ErrorCode::InvalidRole,
            message: format!("Invalid role: {:?}", request.role),
        });
        return;
    };
    let username = request.username.trim();
    if username.is_empty() {
        debug!(session = %session.id(), "dropping JOIN_ROOM with empty username");
        return;
    }

    let outcome = match hub.join(&request.room_id, username, role, session) {
        Ok(outcome) => outcome,
        Err(err) => {
            debug!(session = %session.id(), room = %request.room_id, "join rejected: {}", err);
            session.send(ServerMessage::Error {
                code: err.code(),
                message: err.to_string(),
            });
            return;
        }
    };

    *seat = Some(outcome.user.id.clone());
    info!(
        user = %outcome.user.id,
        username = %outcome.user.username,
        room = %request.room_id,
        role = %role,
        "user joined"
    );

    // ROOM_JOINED strictly precedes anything else the joiner receives
    session.send(ServerMessage::RoomJoined {
        room: outcome.room.clone(),
        user: outcome.user.clone(),
        messages: outcome.messages,
    });
    if outcome.room.stream_active && role == Role::Viewer {
        if let Some(broadcaster) = outcome.broadcaster {
            session.send(ServerMessage::BroadcasterReady { broadcaster });
        }
    }
    // Room-wide fan-out, the joiner included
    for other in &outcome.others {
        other.send(ServerMessage::UserJoined {
            user: outcome.user.clone(),
        });
    }
    session.send(ServerMessage::UserJoined {
        user: outcome.user.clone(),
    });
    for other in &outcome.others {
        other.send(ServerMessage::RoomState {
            room: outcome.room.clone(),
        });
    }
    session.send(ServerMessage::RoomState { room: outcome.room });
}

fn handle_chat(hub: &Hub, user_id: &str, send: ChatSend) {
    match hub.append_chat(user_id, &send.message) {
        Some(delivery) => {
            for recipient in &delivery.recipients {
                recipient.send(ServerMessage::ChatMessageReceived {
                    message: delivery.entry.clone(),
                });
            }
        }
        None => debug!(user = %user_id, "dropping unroutable chat message"),
    }
}

fn handle_stream_ready(hub: &Hub, user_id: &str) {
    match hub.stream_ready(user_id) {
        Some(fanout) => {
            info!(
                user = %fanout.broadcaster.id,
                room = %fanout.broadcaster.room_id,
                viewers = fanout.viewers.len(),
                "stream live"
            );
            for viewer in &fanout.viewers {
                viewer.send(ServerMessage::BroadcasterReady {
                    broadcaster: fanout.broadcaster.clone(),
                });
            }
        }
        None => debug!(user = %user_id, "ignoring STREAM_READY from non-broadcaster"),
    }
}

fn handle_viewer_ready(hub: &Hub, user_id: &str) {
    match hub.viewer_ready(user_id) {
        Some(forward) => forward.broadcaster.send(ServerMessage::ViewerReady {
            viewer: forward.viewer,
        }),
        None => debug!(user = %user_id, "dropping VIEWER_READY with no broadcaster to notify"),
    }
}

fn relay_signal(
    hub: &Hub,
    user_id: &str,
    payload: SignalPayload,
    wrap: fn(SignalPayload) -> ServerMessage,
) {
    match hub.relay(user_id, payload) {
        Some((rewritten, receiver)) => receiver.send(wrap(rewritten)),
        None => debug!(user = %user_id, "dropping signal for unknown receiver"),
    }
}
