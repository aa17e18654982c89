//! Per-room chat log
//!
//! Bounded append-only sequence. The log is trimmed on append to the same
//! bound the read side exposes, so an abandoned-then-busy room can never
//! grow without limit. The log is owned by its room and discarded with it.

use std::collections::VecDeque;

use crate::hub::types::ChatEntry;

/// Entries retained per room (and the default tail-read size)
pub const CHAT_HISTORY_LIMIT: usize = 50;

/// Ordered chat history for one room
#[derive(Debug, Default)]
pub struct ChatLog {
    entries: VecDeque<ChatEntry>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, evicting the oldest beyond the retention bound
    pub fn append(&mut self, entry: ChatEntry) {
        if self.entries.len() == CHAT_HISTORY_LIMIT {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Last `limit` entries, oldest first (most-recent-last)
    pub fn tail(&self, limit: usize) -> Vec<ChatEntry> {
        let skip = self.entries.len().saturating_sub(limit);
        self.entries.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
