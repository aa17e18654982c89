//! Room/session coordination hub
//!
//! The hub is a concurrent, in-memory state machine over a population of
//! long-lived signaling sessions. It enforces the role invariants (at most
//! one broadcaster per room, usernames unique per room), relays addressed
//! signaling payloads, orders the stream-ready rendezvous, and tears state
//! down on disconnect. It never touches media.
//!
//! Registries share one lock and are mutated only through [`Hub`]
//! operations; envelope sends happen in the dispatcher after the lock is
//! released, so a slow client can never stall membership changes.

pub mod chat;
pub mod dispatcher;
pub mod registry;
pub mod session;
pub mod types;

pub use chat::{ChatLog, CHAT_HISTORY_LIMIT};
pub use registry::{
    ChatDelivery, Departure, Hub, JoinError, JoinOutcome, StreamReadyFanout, ViewerReadyForward,
};
pub use session::{SessionHandle, SessionId};
pub use types::{ChatEntry, ChatKind, Role, RoomSnapshot, User};
