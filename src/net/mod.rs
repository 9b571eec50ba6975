//! Networking modules for HTTP + STOMP realtime protocol.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST calls, `connection` manages the websocket lifecycle,
//! `registry` owns topic subscriptions, `events` defines the closed inbound
//! event set, and `commands`/`destinations` build outbound frames.

pub mod api;
pub mod commands;
pub mod connection;
pub mod destinations;
pub mod error;
pub mod events;
pub mod registry;
pub mod types;
