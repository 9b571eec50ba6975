use super::*;

#[test]
fn envelope_without_success_field_is_success() {
    let env: ApiEnvelope<i32> =
        serde_json::from_value(serde_json::json!({ "data": 5 })).expect("envelope should parse");
    assert_eq!(env.into_result().expect("result"), 5);
}

#[test]
fn envelope_with_explicit_false_is_rejected_with_message() {
    let env: ApiEnvelope<i32> = serde_json::from_value(serde_json::json!({
        "success": false,
        "message": "room is full"
    }))
    .expect("envelope should parse");
    let err = env.into_result().expect_err("should reject");
    assert_eq!(err, ClientError::ActionRejected("room is full".to_owned()));
}

#[test]
fn envelope_success_without_data_is_a_decode_error() {
    let env: ApiEnvelope<i32> =
        serde_json::from_value(serde_json::json!({ "success": true })).expect("envelope");
    assert!(matches!(env.into_result(), Err(ClientError::Decode(_))));
}

#[test]
fn envelope_ack_ignores_missing_data() {
    let env: ApiEnvelope<serde_json::Value> =
        serde_json::from_value(serde_json::json!({ "success": true })).expect("envelope");
    assert!(env.into_ack().is_ok());
}

#[test]
fn room_parses_camel_case_and_countdown_alias() {
    let room: Room = serde_json::from_value(serde_json::json!({
        "id": 9,
        "code": "ABX913",
        "name": "Friday quiz",
        "ownerId": 3,
        "maxPlayers": 8,
        "currentPlayers": 2,
        "isPrivate": true,
        "questionCount": 10,
        "countdownTime": 20,
        "status": "WAITING"
    }))
    .expect("room should parse");
    assert_eq!(room.code, "ABX913");
    assert_eq!(room.countdown_seconds, 20);
    assert_eq!(room.status, RoomStatus::Waiting);
    assert!(room.is_private);
}

#[test]
fn room_status_accepts_lowercase_alias() {
    let status: RoomStatus = serde_json::from_value(serde_json::json!("playing")).expect("status");
    assert_eq!(status, RoomStatus::Playing);
}

#[test]
fn question_accepts_aliased_option_fields() {
    let q: Question = serde_json::from_value(serde_json::json!({
        "id": 4,
        "questionText": "Capital of France?",
        "answers": [
            { "id": 1, "answerText": "Paris" },
            { "id": 2, "answerText": "Lyon" }
        ],
        "timeLimit": 15,
        "questionNumber": 1,
        "totalQuestions": 5
    }))
    .expect("question should parse");
    assert_eq!(q.text, "Capital of France?");
    assert_eq!(q.options.len(), 2);
    assert_eq!(q.options[0].text, "Paris");
    assert_eq!(q.time_limit_seconds, 15);
    assert_eq!(q.sequence_number, 1);
}

#[test]
fn answer_result_defaults_optional_fields() {
    let result: AnswerResult =
        serde_json::from_value(serde_json::json!({ "correct": true, "pointsAwarded": 120 }))
            .expect("result should parse");
    assert!(result.is_correct);
    assert_eq!(result.points_awarded, 120);
    assert!((result.streak_multiplier - 1.0).abs() < f64::EPSILON);
    assert!(!result.has_next_question);
    assert!(result.next_question.is_none());
    assert!(!result.completed);
}

#[test]
fn timed_out_submission_is_empty() {
    let sub = AnswerSubmission::timed_out(42, 5000);
    assert_eq!(sub.question_id, 42);
    assert!(sub.selected_option_id.is_none());
    assert!(sub.selected_option_index.is_none());
    assert!(sub.answer_text.is_empty());
    assert_eq!(sub.elapsed_ms, 5000);
}

#[test]
fn room_config_serializes_countdown_time_field() {
    let config = RoomConfig {
        name: "Quiz1".to_owned(),
        topic_id: Some(2),
        max_players: 4,
        is_private: false,
        question_count: 5,
        countdown_seconds: 20,
        mode: None,
    };
    let value = serde_json::to_value(&config).expect("serialize");
    assert_eq!(value["countdownTime"], 20);
    assert_eq!(value["maxPlayers"], 4);
}

#[test]
fn paged_accepts_spring_style_field_names() {
    let page: Paged<Room> = serde_json::from_value(serde_json::json!({
        "content": [],
        "page": 0,
        "totalPages": 3,
        "totalElements": 25
    }))
    .expect("page should parse");
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.total_items, 25);
    assert!(page.items.is_empty());
}

#[test]
fn player_accepts_username_alias() {
    let player: Player = serde_json::from_value(serde_json::json!({
        "userId": 7,
        "username": "ada",
        "isHost": true
    }))
    .expect("player should parse");
    assert_eq!(player.display_name, "ada");
    assert!(player.is_host);
    assert_eq!(player.score, 0);
    assert!(!player.has_answered);
}
