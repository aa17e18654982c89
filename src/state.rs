use std::sync::Arc;

use crate::hub::Hub;

/// Application-wide state shared across handlers
///
/// All coordination state lives in the hub; nothing is persisted.
pub struct AppState {
    /// Room/session coordination hub
    pub hub: Hub,
}

impl AppState {
    /// Create new application state
    pub fn new() -> Arc<Self> {
        Arc::new(Self { hub: Hub::new() })
    }
}
