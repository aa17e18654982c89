//! Wire protocol for the signaling channel
//!
//! Every WebSocket text frame carries exactly one envelope:
//!
//! ```json
//! {
//!   "type": "JOIN_ROOM",
//!   "payload": { "room_id": "r", "username": "Alice", "role": "broadcaster" },
//!   "timestamp": "2025-06-01T12:00:00Z"
//! }
//! ```
//!
//! The sender's `timestamp` is informational only; the hub stamps a fresh
//! one on every envelope it emits. A frame that fails to decode (unknown
//! `type`, wrong payload shape) is logged and dropped, and the session
//! stays open.

pub mod types;

pub use types::{
    ChatDraft, ChatSend, ClientMessage, ErrorCode, JoinRequest, ReadySignal, ServerMessage,
    SignalPayload,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One tagged frame on the signaling channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(flatten)]
    pub message: T,
    pub timestamp: DateTime<Utc>,
}

impl<T> Envelope<T> {
    /// Wrap a message, stamping the current time
    pub fn new(message: T) -> Self {
        Self {
            message,
            timestamp: Utc::now(),
        }
    }
}

/// Decode an inbound text frame
pub fn decode(text: &str) -> Result<Envelope<ClientMessage>, serde_json::Error> {
    serde_json::from_str(text)
}

/// Encode an outbound envelope
pub fn encode(envelope: &Envelope<ServerMessage>) -> Result<String, serde_json::Error> {
    serde_json::to_string(envelope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hub::ChatKind;
    use serde_json::json;

    #[test]
    fn test_decode_join_room() {
        let frame = r#"{
            "type": "JOIN_ROOM",
            "payload": {"room_id": "r", "username": "Alice", "role": "broadcaster"},
            "timestamp": "2025-06-01T12:00:00Z"
        }"#;
        let envelope = decode(frame).unwrap();
        match envelope.message {
            ClientMessage::JoinRoom(req) => {
                assert_eq!(req.room_id, "r");
                assert_eq!(req.username, "Alice");
                assert_eq!(req.role, "broadcaster");
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_decode_unknown_tag_fails() {
        let frame = r#"{"type": "SELF_DESTRUCT", "payload": {}, "timestamp": "2025-06-01T12:00:00Z"}"#;
        assert!(decode(frame).is_err());
    }

    #[test]
    fn test_decode_wrong_payload_shape_fails() {
        // JOIN_ROOM without a username
        let frame = r#"{"type": "JOIN_ROOM", "payload": {"room_id": "r"}, "timestamp": "2025-06-01T12:00:00Z"}"#;
        assert!(decode(frame).is_err());
    }

    #[test]
    fn test_decode_missing_timestamp_fails() {
        let frame = r#"{"type": "VIEWER_READY", "payload": {"room_id": "r", "user_id": "u1"}}"#;
        assert!(decode(frame).is_err());
    }

    #[test]
    fn test_signal_round_trip_preserves_message() {
        let message = ClientMessage::Offer(SignalPayload {
            sender: "u1".into(),
            receiver: "u2".into(),
            room_id: "r".into(),
            data: json!({"sdp": "v=0...", "type": "offer"}),
        });
        let encoded = serde_json::to_string(&Envelope::new(message.clone())).unwrap();
        let decoded = decode(&encoded).unwrap();
        // Timestamps are re-stamped on emission and excluded from equality.
        assert_eq!(decoded.message, message);
    }

    #[test]
    fn test_chat_round_trip_preserves_message() {
        let message = ClientMessage::ChatMessage(ChatSend {
            message: ChatDraft {
                content: "hello".into(),
                kind: ChatKind::Private,
                recipient_id: Some("u2".into()),
                room_id: "r".into(),
            },
        });
        let encoded = serde_json::to_string(&Envelope::new(message.clone())).unwrap();
        assert_eq!(decode(&encoded).unwrap().message, message);
    }

    #[test]
    fn test_encode_error_envelope() {
        let envelope = Envelope::new(ServerMessage::Error {
            code: ErrorCode::RoomNotFound,
            message: "Room not found: q".into(),
        });
        let json: serde_json::Value =
            serde_json::from_str(&encode(&envelope).unwrap()).unwrap();
        assert_eq!(json["type"], "ERROR");
        assert_eq!(json["payload"]["code"], "ROOM_NOT_FOUND");
        assert!(json["timestamp"].is_string());
    }
}
