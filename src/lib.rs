//! livecast - Signaling and room-coordination hub
//!
//! This crate provides the server-side coordination core for a one-to-many
//! live broadcasting service: room membership, signaling relay between
//! WebRTC peers, and the broadcaster/viewer rendezvous handshake. Media
//! itself flows peer-to-peer and never touches this process.

pub mod config;
pub mod error;
pub mod hub;
pub mod protocol;
pub mod state;
pub mod web;

pub use error::{AppError, Result};
