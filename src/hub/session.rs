//! Per-connection session handles
//!
//! A [`SessionHandle`] is the hub's route to one connected client. Outbound
//! envelopes are queued on an unbounded channel drained by the connection's
//! single writer task, so concurrent senders serialize and exactly one
//! envelope is on the wire at a time. Queueing never blocks, which keeps
//! the registry's "collect targets under the lock, send after release"
//! discipline cheap even with slow clients.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::mpsc;
use tracing::trace;

use crate::protocol::{Envelope, ServerMessage};

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Process-wide unique identifier for one live connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl SessionId {
    /// Mint the next session id
    pub fn next() -> Self {
        Self(NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// Sending half of one client connection
#[derive(Clone)]
pub struct SessionHandle {
    id: SessionId,
    tx: mpsc::UnboundedSender<Envelope<ServerMessage>>,
}

impl SessionHandle {
    /// Create a handle and the outbound queue its writer task drains
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Envelope<ServerMessage>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                id: SessionId::next(),
                tx,
            },
            rx,
        )
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Stamp and enqueue an envelope
    ///
    /// A send to a session whose connection is gone is silently dropped;
    /// the departure path cleans the registry up independently.
    pub fn send(&self, message: ServerMessage) {
        if self.tx.send(Envelope::new(message)).is_err() {
            trace!(session = %self.id, "dropping envelope for closed session");
        }
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle").field("id", &self.id).finish()
    }
}
