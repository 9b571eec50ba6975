//! Closed error taxonomy for the networking layer.
//!
//! ERROR HANDLING
//! ==============
//! REST-backed actions resolve to `Result<_, ClientError>` instead of
//! panicking, so pages can render inline errors. Websocket decode failures
//! never cross the dispatch loop; they are logged and the raw payload is
//! handed to the topic handler.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Every failure the networking layer can surface to callers.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// Missing or rejected token during the websocket handshake.
    #[error("authentication failed")]
    Authentication,
    /// The STOMP handshake did not complete within the connect deadline.
    #[error("connection timed out")]
    ConnectTimeout,
    /// Automatic reconnection gave up after the configured attempt budget.
    #[error("reconnect attempts exhausted")]
    MaxReconnectAttempts,
    /// An action that requires a live transport was attempted without one.
    #[error("not connected")]
    NotConnected,
    /// The backend reported no room for a user-entered code.
    #[error("room not found")]
    RoomNotFound,
    /// Generic REST rejection carrying the backend's human-readable message.
    #[error("{0}")]
    ActionRejected(String),
    /// Transport-level failure (HTTP error, socket error).
    #[error("transport error: {0}")]
    Transport(String),
    /// A payload could not be decoded into its expected shape.
    #[error("decode error: {0}")]
    Decode(String),
}

impl ClientError {
    /// Rejection from a backend envelope, falling back to a generic message
    /// when the envelope carried none.
    #[must_use]
    pub fn rejected(message: Option<String>) -> Self {
        Self::ActionRejected(message.unwrap_or_else(|| "request failed".to_owned()))
    }
}
