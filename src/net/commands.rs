//! Shared helpers for constructing outbound SEND frames.
//!
//! SYSTEM CONTEXT
//! ==============
//! Several surfaces emit commands over the websocket. Centralizing the base
//! SEND envelope (destination, content type, receipt id) prevents drift
//! across call sites.

#[cfg(test)]
#[path = "commands_test.rs"]
mod commands_test;

use crate::net::destinations;
use crate::net::types::AnswerSubmission;

/// Build a SEND frame with the standard client envelope.
#[must_use]
pub fn send_frame(destination: &str, payload: &serde_json::Value) -> stomp::Frame {
    stomp::Frame::new(stomp::Command::Send)
        .with_header("destination", destination)
        .with_header("content-type", "application/json")
        .with_header("receipt", &uuid::Uuid::new_v4().to_string())
        .with_body(payload.to_string())
}

/// Command: submit this player's answer for the active question.
#[must_use]
pub fn submit_answer(room_id: i64, submission: &AnswerSubmission) -> stomp::Frame {
    let mut payload = serde_json::to_value(submission)
        .unwrap_or_else(|_| serde_json::json!({}));
    payload["roomId"] = serde_json::json!(room_id);
    send_frame(&destinations::submit_answer_destination(room_id), &payload)
}

/// Command: host starts the game.
#[must_use]
pub fn start_game(room_id: i64) -> stomp::Frame {
    send_frame(
        &destinations::start_game_destination(room_id),
        &serde_json::json!({ "roomId": room_id }),
    )
}

/// Command: request the current game state snapshot (used after reconnect).
#[must_use]
pub fn request_game_state(room_id: i64) -> stomp::Frame {
    send_frame(
        &destinations::game_state_destination(room_id),
        &serde_json::json!({ "roomId": room_id }),
    )
}

/// Command: ask the server to start feeding the room-list topic.
#[must_use]
pub fn request_room_list() -> stomp::Frame {
    send_frame(
        &destinations::room_list_request_destination(),
        &serde_json::json!({}),
    )
}
