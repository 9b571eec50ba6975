//! STOMP destination builders.
//!
//! SYSTEM CONTEXT
//! ==============
//! Topic and command destinations are assembled here so subscription and
//! send sites cannot drift from the broker's naming scheme.

#[cfg(test)]
#[path = "destinations_test.rs"]
mod destinations_test;

/// Broadcast topic carrying room-list events (CREATE_ROOM, ROOM_DELETED, ...).
#[must_use]
pub fn room_list_topic() -> String {
    "/topic/rooms".to_owned()
}

/// Broadcast topic scoped to one room.
#[must_use]
pub fn room_topic(room_id: i64) -> String {
    format!("/topic/room/{room_id}")
}

/// Per-user queue for personal events (answer results, answered notices).
#[must_use]
pub fn user_queue() -> String {
    "/user/queue/game".to_owned()
}

/// Command destination: submit an answer for the active question.
#[must_use]
pub fn submit_answer_destination(room_id: i64) -> String {
    format!("/app/room/{room_id}/answer")
}

/// Command destination: host starts the game.
#[must_use]
pub fn start_game_destination(room_id: i64) -> String {
    format!("/app/room/{room_id}/start")
}

/// Command destination: request the current game state snapshot.
#[must_use]
pub fn game_state_destination(room_id: i64) -> String {
    format!("/app/room/{room_id}/state")
}

/// Command destination: ask the server to feed the room-list topic.
#[must_use]
pub fn room_list_request_destination() -> String {
    "/app/rooms/subscribe".to_owned()
}
