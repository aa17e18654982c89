//! Core room-coordination types
//!
//! These are both the registry's state records and the wire objects carried
//! in signaling payloads, so they serialize exactly as clients see them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of a room member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Produces the live audio/video stream; at most one per room
    Broadcaster,
    /// Consumes the broadcaster's stream
    Viewer,
}

impl Role {
    /// Parse the wire form ("broadcaster" / "viewer")
    ///
    /// Returns `None` for anything else so the dispatcher can answer with
    /// `INVALID_ROLE` instead of dropping the frame.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "broadcaster" => Some(Role::Broadcaster),
            "viewer" => Some(Role::Viewer),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Broadcaster => "broadcaster",
            Role::Viewer => "viewer",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A room member
///
/// Immutable after creation: a user's role and room are fixed for the
/// lifetime of the identity, and a reconnecting client gets a fresh id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Server-minted unique id
    pub id: String,
    /// Display name, unique within the room under ASCII case folding
    pub username: String,
    pub role: Role,
    pub room_id: String,
}

/// Wire-facing view of a room
///
/// `broadcaster` and `viewers` carry ids; `users` carries the resolved
/// records, broadcaster first, then viewers in join order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSnapshot {
    pub id: String,
    pub name: String,
    pub broadcaster: Option<String>,
    pub viewers: Vec<String>,
    pub users: Vec<User>,
    pub stream_active: bool,
}

/// Visibility of a chat entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatKind {
    Public,
    Private,
}

/// One entry in a room's chat log
///
/// `id`, `timestamp` and the `sender_*` fields are server-minted; clients
/// only supply content, kind and (for private messages) the recipient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatEntry {
    pub id: String,
    pub sender_id: String,
    pub sender_username: String,
    pub room_id: String,
    pub content: String,
    pub kind: ChatKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_id: Option<String>,
    pub timestamp: DateTime<Utc>,
}
