//! Topic subscription registry.
//!
//! SYSTEM CONTEXT
//! ==============
//! The registry is the only component allowed to register handlers against
//! the transport. It maps logical topic names to handlers, hands back the
//! STOMP frames the connection loop must transmit, and dispatches decoded
//! MESSAGE bodies. Keeping frame emission out of this type makes the whole
//! registry natively testable.
//!
//! ERROR HANDLING
//! ==============
//! Decode failures are passed through to the handler as raw text so one
//! malformed frame can never interrupt delivery of subsequent frames.

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use crate::net::error::ClientError;
use crate::net::events::{GameEvent, decode_event};

/// Payload delivered to a topic handler.
#[derive(Clone, Debug, PartialEq)]
pub enum TopicMessage {
    /// A well-formed event from the closed server event set.
    Event(GameEvent),
    /// Anything that failed to decode; the handler decides how to degrade.
    Raw(String),
}

type Handler = Box<dyn FnMut(TopicMessage)>;

struct Subscription {
    topic: String,
    id: String,
    handler: Handler,
}

/// Registry of active topic subscriptions. One instance per connection
/// manager; owned state, no globals.
#[derive(Default)]
pub struct SubscriptionRegistry {
    connected: bool,
    next_id: u64,
    subscriptions: Vec<Subscription>,
}

impl SubscriptionRegistry {
    /// Mark the transport live or gone. Going offline does not clear
    /// subscriptions; they are kept for reconnect replay.
    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Register `handler` for `topic`, replacing any prior handler for the
    /// same topic instead of accumulating duplicates. Returns the SUBSCRIBE
    /// frame to transmit.
    ///
    /// # Errors
    ///
    /// `NotConnected` when no live transport exists.
    pub fn subscribe(
        &mut self,
        topic: &str,
        handler: impl FnMut(TopicMessage) + 'static,
    ) -> Result<stomp::Frame, ClientError> {
        if !self.connected {
            return Err(ClientError::NotConnected);
        }

        if let Some(existing) = self.subscriptions.iter_mut().find(|s| s.topic == topic) {
            existing.handler = Box::new(handler);
            return Ok(subscribe_frame(&existing.id, topic));
        }

        self.next_id += 1;
        let id = format!("sub-{}", self.next_id);
        let frame = subscribe_frame(&id, topic);
        self.subscriptions.push(Subscription {
            topic: topic.to_owned(),
            id,
            handler: Box::new(handler),
        });
        Ok(frame)
    }

    /// Drop the subscription for `topic`, returning the UNSUBSCRIBE frame to
    /// transmit. Idempotent: unknown topics return `None` and change nothing.
    pub fn unsubscribe(&mut self, topic: &str) -> Option<stomp::Frame> {
        let idx = self.subscriptions.iter().position(|s| s.topic == topic)?;
        let sub = self.subscriptions.remove(idx);
        Some(
            stomp::Frame::new(stomp::Command::Unsubscribe).with_header("id", &sub.id),
        )
    }

    /// Deliver a MESSAGE body to the matching handler. `selector` is either
    /// the `subscription` header (preferred) or the destination topic.
    ///
    /// Returns `false` when no subscription matches.
    pub fn dispatch(&mut self, selector: &str, body: &str) -> bool {
        let Some(sub) = self
            .subscriptions
            .iter_mut()
            .find(|s| s.id == selector || s.topic == selector)
        else {
            return false;
        };

        let message = match decode_event(body) {
            Ok(event) => TopicMessage::Event(event),
            Err(_) => TopicMessage::Raw(body.to_owned()),
        };
        (sub.handler)(message);
        true
    }

    /// SUBSCRIBE frames for every registered topic, for replay after a
    /// successful reconnect handshake.
    #[must_use]
    pub fn replay_frames(&self) -> Vec<stomp::Frame> {
        self.subscriptions
            .iter()
            .map(|s| subscribe_frame(&s.id, &s.topic))
            .collect()
    }

    /// Atomic teardown: drop every subscription without emitting per-topic
    /// UNSUBSCRIBE frames (the transport is already gone).
    pub fn clear(&mut self) {
        self.subscriptions.clear();
        self.connected = false;
    }
}

fn subscribe_frame(id: &str, topic: &str) -> stomp::Frame {
    stomp::Frame::new(stomp::Command::Subscribe)
        .with_header("id", id)
        .with_header("destination", topic)
        .with_header("ack", "auto")
}
