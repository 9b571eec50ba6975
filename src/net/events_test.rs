use super::*;

fn room_json() -> serde_json::Value {
    serde_json::json!({
        "id": 11,
        "code": "QZ42XY",
        "name": "History night",
        "ownerId": 5,
        "maxPlayers": 6,
        "currentPlayers": 3,
        "questionCount": 10,
        "countdownTime": 15,
        "status": "WAITING"
    })
}

#[test]
fn decode_rejects_non_json_body() {
    assert!(matches!(decode_event("not json"), Err(ClientError::Decode(_))));
}

#[test]
fn decode_rejects_missing_type_tag() {
    let err = decode_event(r#"{"roomId": 3}"#).expect_err("tag should be required");
    assert!(matches!(err, ClientError::Decode(_)));
}

#[test]
fn decode_rejects_unknown_type_tag() {
    let err = decode_event(r#"{"type": "ROOM_EXPLODED"}"#).expect_err("unknown tag");
    assert!(matches!(err, ClientError::Decode(m) if m.contains("ROOM_EXPLODED")));
}

#[test]
fn create_room_parses_inline_room_fields() {
    let mut body = room_json();
    body["type"] = serde_json::json!("CREATE_ROOM");
    let event = decode_event(&body.to_string()).expect("event should decode");
    let GameEvent::RoomCreated(room) = event else {
        panic!("expected RoomCreated");
    };
    assert_eq!(room.code, "QZ42XY");
    assert_eq!(room.countdown_seconds, 15);
}

#[test]
fn room_updated_parses_nested_room_payload() {
    let body = serde_json::json!({ "type": "ROOM_UPDATED", "room": room_json() });
    let event = decode_event(&body.to_string()).expect("event should decode");
    assert!(matches!(event, GameEvent::RoomUpdated(r) if r.id == 11));
}

#[test]
fn room_deleted_accepts_id_alias() {
    let event = decode_event(r#"{"type":"ROOM_DELETED","id":11}"#).expect("event");
    assert_eq!(event, GameEvent::RoomDeleted { room_id: 11 });
}

#[test]
fn join_room_parses_player_with_username_alias() {
    let body = serde_json::json!({
        "type": "JOIN_ROOM",
        "player": { "userId": 8, "username": "kay" }
    });
    let event = decode_event(&body.to_string()).expect("event");
    let GameEvent::PlayerJoined(player) = event else {
        panic!("expected PlayerJoined");
    };
    assert_eq!(player.user_id, 8);
    assert_eq!(player.display_name, "kay");
}

#[test]
fn leave_room_accepts_player_id_alias() {
    let event = decode_event(r#"{"type":"LEAVE_ROOM","playerId":8}"#).expect("event");
    assert_eq!(event, GameEvent::PlayerLeft { user_id: 8 });
}

#[test]
fn game_started_carries_first_question_when_present() {
    let body = serde_json::json!({
        "type": "GAME_STARTED",
        "question": {
            "id": 1,
            "text": "2+2?",
            "options": [{ "id": 10, "text": "4" }],
            "timeLimitSeconds": 20,
            "sequenceNumber": 1,
            "totalQuestions": 5
        }
    });
    let event = decode_event(&body.to_string()).expect("event");
    let GameEvent::GameStarted { question: Some(q) } = event else {
        panic!("expected GameStarted with question");
    };
    assert_eq!(q.time_limit_seconds, 20);
}

#[test]
fn game_started_without_question_is_still_valid() {
    let event = decode_event(r#"{"type":"GAME_STARTED"}"#).expect("event");
    assert_eq!(event, GameEvent::GameStarted { question: None });
}

#[test]
fn next_question_requires_a_question_payload() {
    let err = decode_event(r#"{"type":"NEXT_QUESTION"}"#).expect_err("question required");
    assert!(matches!(err, ClientError::Decode(_)));
}

#[test]
fn player_kicked_reads_reason_when_present() {
    let event = decode_event(r#"{"type":"PLAYER_KICKED","playerId":4,"reason":"afk"}"#)
        .expect("event");
    assert_eq!(
        event,
        GameEvent::PlayerKicked { user_id: 4, reason: Some("afk".to_owned()) }
    );
}

#[test]
fn host_changed_accepts_host_id_alias() {
    let event = decode_event(r#"{"type":"HOST_CHANGED","hostId":9}"#).expect("event");
    assert_eq!(event, GameEvent::HostChanged { new_host_id: 9 });
}

#[test]
fn game_ended_parses_rankings_in_server_order() {
    let body = serde_json::json!({
        "type": "GAME_ENDED",
        "rankings": [
            { "userId": 2, "username": "bea", "score": 900, "rank": 1 },
            { "userId": 1, "username": "alf", "score": 700, "rank": 2 }
        ]
    });
    let event = decode_event(&body.to_string()).expect("event");
    let GameEvent::GameEnded { rankings } = event else {
        panic!("expected GameEnded");
    };
    assert_eq!(rankings.len(), 2);
    assert_eq!(rankings[0].user_id, 2);
    assert_eq!(rankings[1].user_id, 1);
}

#[test]
fn answer_result_parses_nested_result_payload() {
    let body = serde_json::json!({
        "type": "ANSWER_RESULT",
        "result": { "correct": true, "pointsAwarded": 150, "hasNextQuestion": true }
    });
    let event = decode_event(&body.to_string()).expect("event");
    let GameEvent::AnswerResult(result) = event else {
        panic!("expected AnswerResult");
    };
    assert!(result.is_correct);
    assert_eq!(result.points_awarded, 150);
    assert!(result.has_next_question);
}

#[test]
fn player_answered_reads_user_id() {
    let event = decode_event(r#"{"type":"PLAYER_ANSWERED","userId":3}"#).expect("event");
    assert_eq!(event, GameEvent::PlayerAnswered { user_id: 3 });
}

#[test]
fn pick_i64_accepts_integral_floats_only() {
    let value = serde_json::json!({ "a": 3.0, "b": 3.5 });
    assert_eq!(pick_i64(&value, &["a"]), Some(3));
    assert_eq!(pick_i64(&value, &["b"]), None);
    assert_eq!(pick_i64(&value, &["missing"]), None);
}

#[test]
fn pick_str_returns_first_matching_key() {
    let value = serde_json::json!({ "reason": "afk", "message": "other" });
    assert_eq!(pick_str(&value, &["reason", "message"]), Some("afk"));
    assert_eq!(pick_str(&value, &["missing"]), None);
}
