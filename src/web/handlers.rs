//! Read-only REST handlers
//!
//! These endpoints observe the hub; nothing here mutates it, and none of
//! them can fail — absent rooms serve empty collections rather than 404s.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::hub::{ChatEntry, RoomSnapshot, CHAT_HISTORY_LIMIT};
use crate::state::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// List known rooms
pub async fn list_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSnapshot>> {
    Json(state.hub.list_rooms())
}

#[derive(Debug, Deserialize)]
pub struct MessagesQuery {
    /// Maximum number of entries to return (most-recent-last)
    pub limit: Option<usize>,
}

/// Tail of a room's chat log
pub async fn room_messages(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    Query(query): Query<MessagesQuery>,
) -> Json<Vec<ChatEntry>> {
    let limit = query.limit.unwrap_or(CHAT_HISTORY_LIMIT);
    Json(state.hub.chat_tail(&room_id, limit))
}
