//! Closed set of server-pushed realtime events.
//!
//! DESIGN
//! ======
//! Every inbound MESSAGE body is decoded here, exactly once, into a tagged
//! variant over the enumerated event names. Adding a server event type is a
//! compile-time-visible change: the dispatch sites match exhaustively on
//! [`GameEvent`]. Field aliases in loose payloads are normalized here and
//! nowhere else.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use serde_json::Value;

use crate::net::error::ClientError;
use crate::net::types::{AnswerResult, Player, Question, RankingEntry, Room};

/// A decoded realtime event.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    /// A public room appeared (room-list topic).
    RoomCreated(Room),
    /// A room was closed (room-list topic).
    RoomDeleted { room_id: i64 },
    /// Room settings or occupancy changed.
    RoomUpdated(Room),
    /// A player entered the room.
    PlayerJoined(Player),
    /// A player left the room.
    PlayerLeft { user_id: i64 },
    /// The host started the game; the first question may ride along.
    GameStarted { question: Option<Question> },
    /// The room advanced to a new question.
    NextQuestion(Question),
    /// A player was removed by the host.
    PlayerKicked { user_id: i64, reason: Option<String> },
    /// Host privileges moved to another player.
    HostChanged { new_host_id: i64 },
    /// The game finished; standings arrive pre-sorted by the server.
    GameEnded { rankings: Vec<RankingEntry> },
    /// Personal queue: result for this player's own submission.
    AnswerResult(AnswerResult),
    /// Personal queue: some player (possibly another) locked in an answer.
    PlayerAnswered { user_id: i64 },
}

/// Decode a raw MESSAGE body into a [`GameEvent`].
///
/// # Errors
///
/// `Decode` for non-JSON bodies, missing/unknown `type` tags, or payloads
/// missing required fields. Callers pass the raw body through to handlers on
/// failure; this function never panics.
pub fn decode_event(body: &str) -> Result<GameEvent, ClientError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| ClientError::Decode(e.to_string()))?;
    let tag = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| ClientError::Decode("event missing type tag".to_owned()))?;

    match tag {
        "CREATE_ROOM" => Ok(GameEvent::RoomCreated(parse_room(&value)?)),
        "ROOM_DELETED" => Ok(GameEvent::RoomDeleted {
            room_id: pick_i64(&value, &["roomId", "id"])
                .ok_or_else(|| missing(tag, "roomId"))?,
        }),
        "ROOM_UPDATED" => Ok(GameEvent::RoomUpdated(parse_room(&value)?)),
        "JOIN_ROOM" => Ok(GameEvent::PlayerJoined(parse_player(&value)?)),
        "LEAVE_ROOM" => Ok(GameEvent::PlayerLeft {
            user_id: pick_i64(&value, &["userId", "playerId"])
                .ok_or_else(|| missing(tag, "userId"))?,
        }),
        "GAME_STARTED" => Ok(GameEvent::GameStarted { question: parse_question_opt(&value) }),
        "NEXT_QUESTION" => {
            let question =
                parse_question_opt(&value).ok_or_else(|| missing(tag, "question"))?;
            Ok(GameEvent::NextQuestion(question))
        }
        "PLAYER_KICKED" => Ok(GameEvent::PlayerKicked {
            user_id: pick_i64(&value, &["playerId", "userId", "targetId"])
                .ok_or_else(|| missing(tag, "playerId"))?,
            reason: pick_str(&value, &["reason", "message"]).map(str::to_owned),
        }),
        "HOST_CHANGED" => Ok(GameEvent::HostChanged {
            new_host_id: pick_i64(&value, &["newHostId", "hostId", "userId"])
                .ok_or_else(|| missing(tag, "newHostId"))?,
        }),
        "GAME_ENDED" => Ok(GameEvent::GameEnded { rankings: parse_rankings(&value) }),
        "ANSWER_RESULT" => {
            let payload = value.get("result").unwrap_or(&value).clone();
            serde_json::from_value::<AnswerResult>(payload)
                .map(GameEvent::AnswerResult)
                .map_err(|e| ClientError::Decode(e.to_string()))
        }
        "PLAYER_ANSWERED" => Ok(GameEvent::PlayerAnswered {
            user_id: pick_i64(&value, &["userId", "playerId"])
                .ok_or_else(|| missing(tag, "userId"))?,
        }),
        other => Err(ClientError::Decode(format!("unknown event type: {other}"))),
    }
}

fn missing(tag: &str, field: &str) -> ClientError {
    ClientError::Decode(format!("{tag} event missing {field}"))
}

fn parse_room(value: &Value) -> Result<Room, ClientError> {
    let payload = value.get("room").unwrap_or(value).clone();
    serde_json::from_value(payload).map_err(|e| ClientError::Decode(e.to_string()))
}

fn parse_player(value: &Value) -> Result<Player, ClientError> {
    let payload = value.get("player").unwrap_or(value).clone();
    serde_json::from_value(payload).map_err(|e| ClientError::Decode(e.to_string()))
}

fn parse_question_opt(value: &Value) -> Option<Question> {
    let payload = value
        .get("question")
        .or_else(|| value.get("firstQuestion"))?
        .clone();
    serde_json::from_value(payload).ok()
}

fn parse_rankings(value: &Value) -> Vec<RankingEntry> {
    value
        .get("rankings")
        .or_else(|| value.get("results"))
        .and_then(Value::as_array)
        .map(|rows| {
            rows.iter()
                .filter_map(|row| serde_json::from_value(row.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

pub(crate) fn pick_str<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
}

pub(crate) fn pick_i64(value: &Value, keys: &[&str]) -> Option<i64> {
    for key in keys {
        if let Some(v) = value.get(*key) {
            if let Some(n) = v.as_i64() {
                return Some(n);
            }
            // Some backends emit ids as integral floats.
            if let Some(f) = v.as_f64()
                && f.is_finite()
                && f.fract() == 0.0
            {
                #[allow(clippy::cast_possible_truncation)]
                return Some(f as i64);
            }
        }
    }
    None
}
