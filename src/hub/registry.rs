//! Room and identity registries
//!
//! All coordination state lives behind one lock: rooms, identities,
//! membership lists, `stream_active` flags and chat logs are semantically a
//! single atom, and splitting them would let a relay observe a receiver
//! that a concurrent part has already unseated. Critical sections are
//! short and never perform I/O; every mutating operation returns the
//! session handles it wants notified so the dispatcher can send after the
//! lock is released.

use std::collections::HashMap;

use chrono::Utc;
use parking_lot::RwLock;
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use crate::hub::chat::{ChatLog, CHAT_HISTORY_LIMIT};
use crate::hub::session::SessionHandle;
use crate::hub::types::{ChatEntry, ChatKind, Role, RoomSnapshot, User};
use crate::protocol::{ChatDraft, ErrorCode, SignalPayload};

/// Semantic join failure
///
/// These map one-to-one onto wire `ERROR` codes; the requesting session's
/// state is unchanged by any of them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    #[error("Room not found: {0}")]
    RoomNotFound(String),
    #[error("Room {0} already has a broadcaster")]
    BroadcasterExists(String),
    #[error("Username {0:?} is already taken in this room")]
    UserExists(String),
}

impl JoinError {
    pub fn code(&self) -> ErrorCode {
        match self {
            JoinError::RoomNotFound(_) => ErrorCode::RoomNotFound,
            JoinError::BroadcasterExists(_) => ErrorCode::BroadcasterExists,
            JoinError::UserExists(_) => ErrorCode::UserExists,
        }
    }
}

/// Result of a successful join, with the fan-out targets pre-collected
#[derive(Debug)]
pub struct JoinOutcome {
    pub user: User,
    pub room: RoomSnapshot,
    /// Tail of the room's chat log at join time
    pub messages: Vec<ChatEntry>,
    /// Resolved broadcaster, if the room has one (the joiner included)
    pub broadcaster: Option<User>,
    /// Every member except the joiner
    pub others: Vec<SessionHandle>,
}

/// Result of removing an identity
#[derive(Debug)]
pub struct Departure {
    pub user: User,
    /// Updated snapshot, or `None` when the room emptied and was deleted
    pub room: Option<RoomSnapshot>,
    pub remaining: Vec<SessionHandle>,
}

/// A minted chat entry and the sessions that should receive it
#[derive(Debug)]
pub struct ChatDelivery {
    pub entry: ChatEntry,
    pub recipients: Vec<SessionHandle>,
}

/// Fan-out for a broadcaster's STREAM_READY
#[derive(Debug)]
pub struct StreamReadyFanout {
    pub broadcaster: User,
    pub viewers: Vec<SessionHandle>,
}

/// Forwarding target for a viewer's VIEWER_READY
#[derive(Debug)]
pub struct ViewerReadyForward {
    pub viewer: User,
    pub broadcaster: SessionHandle,
}

/// A seated identity: the user record and the session that owns it
struct Identity {
    user: User,
    session: SessionHandle,
}

/// Registry-side room record; owns its chat log
struct Room {
    id: String,
    name: String,
    broadcaster: Option<String>,
    viewers: Vec<String>,
    stream_active: bool,
    chat: ChatLog,
}

impl Room {
    fn new(id: &str) -> Self {
        Self {
            id: id.to_owned(),
            name: format!("Room {}", id),
            broadcaster: None,
            viewers: Vec::new(),
            stream_active: false,
            chat: ChatLog::new(),
        }
    }

    fn is_empty(&self) -> bool {
        self.broadcaster.is_none() && self.viewers.is_empty()
    }

    /// Member ids, broadcaster first, then viewers in join order
    fn member_ids(&self) -> impl Iterator<Item = &String> {
        self.broadcaster.iter().chain(self.viewers.iter())
    }
}

#[derive(Default)]
struct HubState {
    rooms: HashMap<String, Room>,
    identities: HashMap<String, Identity>,
}

/// The coordination hub
///
/// Holds the room and identity registries behind the single hub lock.
/// Envelope sends never happen under this lock.
pub struct Hub {
    state: RwLock<HubState>,
}

impl Hub {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(HubState::default()),
        }
    }

    /// Seat a user in a room, creating the room for a first broadcaster
    ///
    /// Atomic: the registry invariants hold at both boundaries of this
    /// call. Fails without side effects.
    pub fn join(
        &self,
        room_id: &str,
        username: &str,
        role: Role,
        session: &SessionHandle,
    ) -> Result<JoinOutcome, JoinError> {
        use std::collections::hash_map::Entry;

        let mut state = self.state.write();
        let HubState { rooms, identities } = &mut *state;

        let room = match rooms.entry(room_id.to_owned()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                // Rooms come into being only through their broadcaster
                if role != Role::Broadcaster {
                    return Err(JoinError::RoomNotFound(room_id.to_owned()));
                }
                entry.insert(Room::new(room_id))
            }
        };
        prune_dangling(room, identities);

        if role == Role::Broadcaster && room.broadcaster.is_some() {
            return Err(JoinError::BroadcasterExists(room_id.to_owned()));
        }
        let taken = room.member_ids().any(|id| {
            identities
                .get(id)
                .is_some_and(|i| i.user.username.eq_ignore_ascii_case(username))
        });
        if taken {
            return Err(JoinError::UserExists(username.to_owned()));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            username: username.to_owned(),
            role,
            room_id: room_id.to_owned(),
        };
        match role {
            Role::Broadcaster => room.broadcaster = Some(user.id.clone()),
            Role::Viewer => room.viewers.push(user.id.clone()),
        }
        let displaced = identities.insert(
            user.id.clone(),
            Identity {
                user: user.clone(),
                session: session.clone(),
            },
        );
        debug_assert!(displaced.is_none(), "server-minted id collision");

        let snapshot = snapshot_of(room, identities);
        let broadcaster = room
            .broadcaster
            .as_ref()
            .and_then(|id| identities.get(id))
            .map(|i| i.user.clone());
        Ok(JoinOutcome {
            others: member_handles(room, identities, Some(&user.id)),
            messages: room.chat.tail(CHAT_HISTORY_LIMIT),
            broadcaster,
            room: snapshot,
            user,
        })
    }

    /// Remove an identity and unseat it from its room
    ///
    /// Idempotent: a second call for the same id returns `None`. A
    /// departing broadcaster drops `stream_active`; an emptied room is
    /// deleted together with its chat log.
    pub fn part(&self, user_id: &str) -> Option<Departure> {
        let mut state = self.state.write();
        let HubState { rooms, identities } = &mut *state;

        let user = identities.remove(user_id)?.user;
        let Some(room) = rooms.get_mut(&user.room_id) else {
            return Some(Departure {
                user,
                room: None,
                remaining: Vec::new(),
            });
        };

        if room.broadcaster.as_deref() == Some(user_id) {
            room.broadcaster = None;
            room.stream_active = false;
        } else {
            room.viewers.retain(|id| id != user_id);
        }
        prune_dangling(room, identities);

        if room.is_empty() {
            rooms.remove(&user.room_id);
            return Some(Departure {
                user,
                room: None,
                remaining: Vec::new(),
            });
        }
        Some(Departure {
            room: Some(snapshot_of(room, identities)),
            remaining: member_handles(room, identities, None),
            user,
        })
    }

    /// Mint a chat entry, append it, and collect its recipients
    ///
    /// Returns `None` when the message cannot be routed: unseated sender,
    /// empty-after-trim content, a private message without a recipient, or
    /// a recipient that is stale or outside the sender's room. The caller
    /// logs and drops.
    pub fn append_chat(&self, sender_id: &str, draft: &ChatDraft) -> Option<ChatDelivery> {
        let content = draft.content.trim();
        if content.is_empty() {
            return None;
        }

        let mut state = self.state.write();
        let HubState { rooms, identities } = &mut *state;

        let sender = identities.get(sender_id)?;
        let sender_user = sender.user.clone();
        let sender_session = sender.session.clone();
        let room = rooms.get_mut(&sender_user.room_id)?;

        let (recipient_id, recipients) = match draft.kind {
            ChatKind::Private => {
                let recipient_id = draft.recipient_id.as_deref()?;
                let recipient = identities.get(recipient_id)?;
                if recipient.user.room_id != sender_user.room_id {
                    return None;
                }
                let mut recipients = vec![recipient.session.clone()];
                if recipient_id != sender_id {
                    recipients.push(sender_session);
                }
                (Some(recipient_id.to_owned()), recipients)
            }
            ChatKind::Public => (None, member_handles(room, identities, None)),
        };

        let entry = ChatEntry {
            id: Uuid::new_v4().to_string(),
            sender_id: sender_user.id,
            sender_username: sender_user.username,
            room_id: sender_user.room_id,
            content: content.to_owned(),
            kind: draft.kind,
            recipient_id,
            timestamp: Utc::now(),
        };
        room.chat.append(entry.clone());

        Some(ChatDelivery { entry, recipients })
    }

    /// Mark the sender's stream live and collect its viewers
    ///
    /// Only the room's broadcaster may announce; anything else returns
    /// `None`. Repeats are idempotent on the flag and re-collect the
    /// viewers for re-emission.
    pub fn stream_ready(&self, user_id: &str) -> Option<StreamReadyFanout> {
        let mut state = self.state.write();
        let HubState { rooms, identities } = &mut *state;

        let user = identities.get(user_id)?.user.clone();
        let room = rooms.get_mut(&user.room_id)?;
        if room.broadcaster.as_deref() != Some(user_id) {
            return None;
        }
        room.stream_active = true;

        let viewers = room
            .viewers
            .iter()
            .filter_map(|id| identities.get(id))
            .map(|i| i.session.clone())
            .collect();
        Some(StreamReadyFanout {
            broadcaster: user,
            viewers,
        })
    }

    /// Resolve the broadcaster a viewer's VIEWER_READY forwards to
    pub fn viewer_ready(&self, user_id: &str) -> Option<ViewerReadyForward> {
        let state = self.state.read();

        let viewer = state.identities.get(user_id)?.user.clone();
        if viewer.role != Role::Viewer {
            return None;
        }
        let room = state.rooms.get(&viewer.room_id)?;
        let broadcaster_id = room.broadcaster.as_ref()?;
        let broadcaster = state.identities.get(broadcaster_id)?.session.clone();
        Some(ViewerReadyForward {
            viewer,
            broadcaster,
        })
    }

    /// Resolve a signaling relay: rewrite the sender, find the receiver
    ///
    /// The in-band `sender` field is never trusted; it is overwritten with
    /// the originator resolved from the session's bound identity. A stale
    /// or unknown receiver yields `None` (silent drop).
    pub fn relay(
        &self,
        sender_id: &str,
        payload: SignalPayload,
    ) -> Option<(SignalPayload, SessionHandle)> {
        let state = self.state.read();

        let sender = state.identities.get(sender_id)?;
        let receiver = state.identities.get(&payload.receiver)?.session.clone();
        let rewritten = SignalPayload {
            sender: sender.user.id.clone(),
            ..payload
        };
        Some((rewritten, receiver))
    }

    /// Snapshot one room
    pub fn snapshot(&self, room_id: &str) -> Option<RoomSnapshot> {
        let state = self.state.read();
        let room = state.rooms.get(room_id)?;
        Some(snapshot_of(room, &state.identities))
    }

    /// Snapshot every known room, ordered by id
    pub fn list_rooms(&self) -> Vec<RoomSnapshot> {
        let state = self.state.read();
        let mut rooms: Vec<_> = state
            .rooms
            .values()
            .map(|room| snapshot_of(room, &state.identities))
            .collect();
        rooms.sort_by(|a, b| a.id.cmp(&b.id));
        rooms
    }

    /// Tail of a room's chat log; `[]` for absent rooms
    pub fn chat_tail(&self, room_id: &str, limit: usize) -> Vec<ChatEntry> {
        let state = self.state.read();
        state
            .rooms
            .get(room_id)
            .map(|room| room.chat.tail(limit))
            .unwrap_or_default()
    }
}

impl Default for Hub {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the wire-facing view of a room, broadcaster first
fn snapshot_of(room: &Room, identities: &HashMap<String, Identity>) -> RoomSnapshot {
    let users = room
        .member_ids()
        .filter_map(|id| match identities.get(id) {
            Some(identity) => Some(identity.user.clone()),
            None => {
                warn!(room = %room.id, user = %id, "skipping dangling member id");
                None
            }
        })
        .collect();
    RoomSnapshot {
        id: room.id.clone(),
        name: room.name.clone(),
        broadcaster: room.broadcaster.clone(),
        viewers: room.viewers.clone(),
        users,
        stream_active: room.stream_active,
    }
}

/// Collect live member sessions, optionally excluding the originator
fn member_handles(
    room: &Room,
    identities: &HashMap<String, Identity>,
    exclude: Option<&str>,
) -> Vec<SessionHandle> {
    room.member_ids()
        .filter(|id| exclude != Some(id.as_str()))
        .filter_map(|id| identities.get(id))
        .map(|i| i.session.clone())
        .collect()
}

/// Drop member ids with no live identity
///
/// An id can dangle only if an internal invariant was violated; traversals
/// heal the room rather than propagate the inconsistency.
fn prune_dangling(room: &mut Room, identities: &HashMap<String, Identity>) {
    if let Some(id) = room.broadcaster.clone() {
        if !identities.contains_key(&id) {
            warn!(room = %room.id, user = %id, "removing dangling broadcaster id");
            room.broadcaster = None;
            room.stream_active = false;
        }
    }
    room.viewers.retain(|id| {
        let live = identities.contains_key(id);
        if !live {
            warn!(room = %room.id, user = %id, "removing dangling viewer id");
        }
        live
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> SessionHandle {
        SessionHandle::new().0
    }

    /// Registry invariants that must hold after every operation
    fn assert_invariants(hub: &Hub) {
        let state = hub.state.read();
        for (room_id, room) in &state.rooms {
            assert!(!room.is_empty(), "empty room {} still registered", room_id);
            assert!(
                !room.stream_active || room.broadcaster.is_some(),
                "stream_active without broadcaster in {}",
                room_id
            );
            let mut usernames: Vec<String> = Vec::new();
            for id in room.member_ids() {
                let identity = state
                    .identities
                    .get(id)
                    .unwrap_or_else(|| panic!("dangling member {} in {}", id, room_id));
                assert_eq!(identity.user.room_id, *room_id);
                usernames.push(identity.user.username.to_ascii_lowercase());
            }
            let before = usernames.len();
            usernames.sort();
            usernames.dedup();
            assert_eq!(before, usernames.len(), "duplicate usernames in {}", room_id);
        }
    }

    #[test]
    fn test_broadcaster_creates_room() {
        let hub = Hub::new();
        let outcome = hub
            .join("r", "Alice", Role::Broadcaster, &session())
            .unwrap();

        assert_eq!(outcome.room.broadcaster.as_ref(), Some(&outcome.user.id));
        assert!(outcome.room.viewers.is_empty());
        assert!(outcome.messages.is_empty());
        assert!(!outcome.room.stream_active);
        assert_eq!(outcome.room.name, "Room r");
        assert_invariants(&hub);
    }

    #[test]
    fn test_viewer_cannot_create_room() {
        let hub = Hub::new();
        let err = hub.join("q", "Bob", Role::Viewer, &session()).unwrap_err();
        assert_eq!(err, JoinError::RoomNotFound("q".into()));
        assert!(hub.list_rooms().is_empty());
    }

    #[test]
    fn test_second_broadcaster_rejected() {
        let hub = Hub::new();
        hub.join("r", "Alice", Role::Broadcaster, &session()).unwrap();
        let err = hub
            .join("r", "Mallory", Role::Broadcaster, &session())
            .unwrap_err();
        assert_eq!(err, JoinError::BroadcasterExists("r".into()));
        assert_invariants(&hub);
    }

    #[test]
    fn test_username_unique_case_insensitive() {
        let hub = Hub::new();
        hub.join("r", "Alice", Role::Broadcaster, &session()).unwrap();
        let err = hub.join("r", "ALICE", Role::Viewer, &session()).unwrap_err();
        assert_eq!(err, JoinError::UserExists("ALICE".into()));

        // Same name in a different room is fine
        hub.join("s", "alice", Role::Broadcaster, &session()).unwrap();
        assert_invariants(&hub);
    }

    #[test]
    fn test_snapshot_orders_broadcaster_first() {
        let hub = Hub::new();
        hub.join("r", "Alice", Role::Broadcaster, &session()).unwrap();
        hub.join("r", "Bob", Role::Viewer, &session()).unwrap();
        hub.join("r", "Carol", Role::Viewer, &session()).unwrap();

        let snapshot = hub.snapshot("r").unwrap();
        let names: Vec<&str> = snapshot.users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, ["Alice", "Bob", "Carol"]);
        assert_eq!(snapshot.viewers.len(), 2);
    }

    #[test]
    fn test_join_outcome_collects_other_members() {
        let hub = Hub::new();
        hub.join("r", "Alice", Role::Broadcaster, &session()).unwrap();
        hub.join("r", "Bob", Role::Viewer, &session()).unwrap();
        let outcome = hub.join("r", "Carol", Role::Viewer, &session()).unwrap();
        assert_eq!(outcome.others.len(), 2);
        assert_eq!(outcome.broadcaster.unwrap().username, "Alice");
    }

    #[test]
    fn test_broadcaster_departure_keeps_populated_room() {
        let hub = Hub::new();
        let alice = hub.join("r", "Alice", Role::Broadcaster, &session()).unwrap();
        hub.join("r", "Bob", Role::Viewer, &session()).unwrap();
        hub.stream_ready(&alice.user.id).unwrap();

        let departure = hub.part(&alice.user.id).unwrap();
        let room = departure.room.unwrap();
        assert_eq!(room.broadcaster, None);
        assert!(!room.stream_active);
        assert_eq!(departure.remaining.len(), 1);
        assert_invariants(&hub);
    }

    #[test]
    fn test_last_departure_deletes_room() {
        let hub = Hub::new();
        let alice = hub.join("r", "Alice", Role::Broadcaster, &session()).unwrap();
        let departure = hub.part(&alice.user.id).unwrap();
        assert!(departure.room.is_none());
        assert!(hub.list_rooms().is_empty());
        assert!(hub.chat_tail("r", 50).is_empty());
    }

    #[test]
    fn test_part_is_idempotent() {
        let hub = Hub::new();
        let alice = hub.join("r", "Alice", Role::Broadcaster, &session()).unwrap();
        assert!(hub.part(&alice.user.id).is_some());
        assert!(hub.part(&alice.user.id).is_none());
        assert_invariants(&hub);
    }

    #[test]
    fn test_stream_ready_gated_to_broadcaster() {
        let hub = Hub::new();
        let alice = hub.join("r", "Alice", Role::Broadcaster, &session()).unwrap();
        let bob = hub.join("r", "Bob", Role::Viewer, &session()).unwrap();

        assert!(hub.stream_ready(&bob.user.id).is_none());
        assert!(!hub.snapshot("r").unwrap().stream_active);

        let fanout = hub.stream_ready(&alice.user.id).unwrap();
        assert_eq!(fanout.broadcaster.username, "Alice");
        assert_eq!(fanout.viewers.len(), 1);
        assert!(hub.snapshot("r").unwrap().stream_active);

        // Idempotent: the flag stays set and viewers are re-collected
        let again = hub.stream_ready(&alice.user.id).unwrap();
        assert_eq!(again.viewers.len(), 1);
        assert!(hub.snapshot("r").unwrap().stream_active);
        assert_invariants(&hub);
    }

    #[test]
    fn test_viewer_ready_forwards_to_broadcaster() {
        let hub = Hub::new();
        let alice = hub.join("r", "Alice", Role::Broadcaster, &session()).unwrap();
        let bob = hub.join("r", "Bob", Role::Viewer, &session()).unwrap();

        let forward = hub.viewer_ready(&bob.user.id).unwrap();
        assert_eq!(forward.viewer.username, "Bob");

        // Not valid from the broadcaster itself
        assert!(hub.viewer_ready(&alice.user.id).is_none());

        // No broadcaster, no forwarding target
        hub.part(&alice.user.id).unwrap();
        assert!(hub.viewer_ready(&bob.user.id).is_none());
    }

    #[test]
    fn test_relay_rewrites_sender() {
        let hub = Hub::new();
        let alice = hub.join("r", "Alice", Role::Broadcaster, &session()).unwrap();
        let bob = hub.join("r", "Bob", Role::Viewer, &session()).unwrap();

        let payload = SignalPayload {
            sender: "ATTACKER".into(),
            receiver: bob.user.id.clone(),
            room_id: "r".into(),
            data: serde_json::json!({"sdp": "v=0"}),
        };
        let (rewritten, _receiver) = hub.relay(&alice.user.id, payload).unwrap();
        assert_eq!(rewritten.sender, alice.user.id);
        assert_eq!(rewritten.room_id, "r");
        assert_eq!(rewritten.data, serde_json::json!({"sdp": "v=0"}));
    }

    #[test]
    fn test_relay_to_stale_receiver_drops() {
        let hub = Hub::new();
        let alice = hub.join("r", "Alice", Role::Broadcaster, &session()).unwrap();
        let payload = SignalPayload {
            sender: alice.user.id.clone(),
            receiver: "gone".into(),
            room_id: "r".into(),
            data: serde_json::Value::Null,
        };
        assert!(hub.relay(&alice.user.id, payload).is_none());
    }

    #[test]
    fn test_public_chat_reaches_all_members() {
        let hub = Hub::new();
        let alice = hub.join("r", "Alice", Role::Broadcaster, &session()).unwrap();
        hub.join("r", "Bob", Role::Viewer, &session()).unwrap();

        let draft = ChatDraft {
            content: "  hello  ".into(),
            kind: ChatKind::Public,
            recipient_id: None,
            room_id: "r".into(),
        };
        let delivery = hub.append_chat(&alice.user.id, &draft).unwrap();
        assert_eq!(delivery.recipients.len(), 2);
        assert_eq!(delivery.entry.content, "hello");
        assert_eq!(delivery.entry.sender_username, "Alice");
        assert_eq!(hub.chat_tail("r", 50).len(), 1);
    }

    #[test]
    fn test_private_chat_reaches_recipient_and_sender() {
        let hub = Hub::new();
        let alice = hub.join("r", "Alice", Role::Broadcaster, &session()).unwrap();
        let bob = hub.join("r", "Bob", Role::Viewer, &session()).unwrap();
        hub.join("r", "Carol", Role::Viewer, &session()).unwrap();

        let draft = ChatDraft {
            content: "hi".into(),
            kind: ChatKind::Private,
            recipient_id: Some(bob.user.id.clone()),
            room_id: "r".into(),
        };
        let delivery = hub.append_chat(&alice.user.id, &draft).unwrap();
        assert_eq!(delivery.recipients.len(), 2);
        assert_eq!(delivery.entry.recipient_id.as_ref(), Some(&bob.user.id));
    }

    #[test]
    fn test_unroutable_chat_is_dropped() {
        let hub = Hub::new();
        let alice = hub.join("r", "Alice", Role::Broadcaster, &session()).unwrap();

        let blank = ChatDraft {
            content: "   ".into(),
            kind: ChatKind::Public,
            recipient_id: None,
            room_id: "r".into(),
        };
        assert!(hub.append_chat(&alice.user.id, &blank).is_none());

        let stale_recipient = ChatDraft {
            content: "psst".into(),
            kind: ChatKind::Private,
            recipient_id: Some("gone".into()),
            room_id: "r".into(),
        };
        assert!(hub.append_chat(&alice.user.id, &stale_recipient).is_none());
        assert!(hub.chat_tail("r", 50).is_empty());
    }

    #[test]
    fn test_invariants_across_join_part_sequences() {
        let hub = Hub::new();
        let mut seated: Vec<String> = Vec::new();

        // Interleave joins and parts across three rooms and check the
        // registry after every step.
        for step in 0..60usize {
            let room = ["a", "b", "c"][step % 3];
            if step % 5 == 4 {
                if let Some(id) = seated.pop() {
                    hub.part(&id).unwrap();
                }
            } else {
                let role = if step % 2 == 0 {
                    Role::Broadcaster
                } else {
                    Role::Viewer
                };
                if let Ok(outcome) =
                    hub.join(room, &format!("user{}", step), role, &session())
                {
                    seated.push(outcome.user.id);
                }
            }
            assert_invariants(&hub);
        }
        for id in seated {
            hub.part(&id).unwrap();
            assert_invariants(&hub);
        }
        assert!(hub.list_rooms().is_empty());
    }
}
