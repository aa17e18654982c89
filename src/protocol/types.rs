//! Signaling message types
//!
//! The envelope payload is a tagged union keyed by `type`. Inbound and
//! outbound frames are separate enums because a few tags (notably
//! `VIEWER_READY`) carry different payload shapes per direction; the
//! direction of travel distinguishes them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::hub::{ChatEntry, ChatKind, RoomSnapshot, User};

/// Client → hub frames
///
/// Unknown tags or mismatched payload shapes fail deserialization at the
/// decode boundary; the dispatcher never re-checks shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ClientMessage {
    #[serde(rename = "JOIN_ROOM")]
    JoinRoom(JoinRequest),
    #[serde(rename = "STREAM_READY")]
    StreamReady(ReadySignal),
    #[serde(rename = "VIEWER_READY")]
    ViewerReady(ReadySignal),
    #[serde(rename = "CHAT_MESSAGE")]
    ChatMessage(ChatSend),
    #[serde(rename = "OFFER")]
    Offer(SignalPayload),
    #[serde(rename = "ANSWER")]
    Answer(SignalPayload),
    #[serde(rename = "ICE_CANDIDATE")]
    IceCandidate(SignalPayload),
}

/// Hub → client frames
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ServerMessage {
    /// Sent only to the joiner, before any fan-out it may receive
    #[serde(rename = "ROOM_JOINED")]
    RoomJoined {
        room: RoomSnapshot,
        user: User,
        messages: Vec<ChatEntry>,
    },
    #[serde(rename = "ROOM_STATE")]
    RoomState { room: RoomSnapshot },
    #[serde(rename = "USER_JOINED")]
    UserJoined { user: User },
    #[serde(rename = "USER_LEFT")]
    UserLeft { user: User, room: RoomSnapshot },
    /// The broadcaster has a live stream; viewers should prepare to receive
    #[serde(rename = "BROADCASTER_READY")]
    BroadcasterReady { broadcaster: User },
    /// A viewer is ready to receive; the broadcaster initiates the OFFER
    #[serde(rename = "VIEWER_READY")]
    ViewerReady { viewer: User },
    #[serde(rename = "CHAT_MESSAGE_RECEIVED")]
    ChatMessageReceived { message: ChatEntry },
    #[serde(rename = "OFFER")]
    Offer(SignalPayload),
    #[serde(rename = "ANSWER")]
    Answer(SignalPayload),
    #[serde(rename = "ICE_CANDIDATE")]
    IceCandidate(SignalPayload),
    #[serde(rename = "ERROR")]
    Error { code: ErrorCode, message: String },
}

/// JOIN_ROOM payload
///
/// `role` stays a string here so an unrecognized value yields a typed
/// `INVALID_ROLE` error instead of a dropped frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinRequest {
    pub room_id: String,
    pub username: String,
    pub role: String,
}

/// STREAM_READY / VIEWER_READY payload
///
/// `user_id` is informational only; the hub resolves the sender from the
/// session's bound identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadySignal {
    pub room_id: String,
    pub user_id: String,
}

/// CHAT_MESSAGE payload wrapper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSend {
    pub message: ChatDraft,
}

/// Client-authored chat content before the hub mints id and timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatDraft {
    pub content: String,
    pub kind: ChatKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_id: Option<String>,
    pub room_id: String,
}

/// OFFER / ANSWER / ICE_CANDIDATE payload
///
/// `data` is opaque to the hub (SDP or ICE structures owned by the peers).
/// On relay the hub rewrites `sender` to the resolved originator and
/// forwards `room_id` and `data` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalPayload {
    pub sender: String,
    pub receiver: String,
    pub room_id: String,
    pub data: Value,
}

/// Semantic join failure codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    RoomNotFound,
    BroadcasterExists,
    UserExists,
    InvalidRole,
}
