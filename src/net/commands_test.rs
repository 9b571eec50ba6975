use super::*;

#[test]
fn send_frame_carries_destination_and_content_type() {
    let frame = send_frame("/app/x", &serde_json::json!({ "k": 1 }));
    assert_eq!(frame.command, stomp::Command::Send);
    assert_eq!(frame.header("destination"), Some("/app/x"));
    assert_eq!(frame.header("content-type"), Some("application/json"));
    assert!(frame.header("receipt").is_some());
    assert_eq!(frame.body, r#"{"k":1}"#);
}

#[test]
fn submit_answer_includes_room_and_submission_fields() {
    let submission = AnswerSubmission {
        question_id: 7,
        selected_option_id: Some(21),
        selected_option_index: Some(2),
        answer_text: "Paris".to_owned(),
        elapsed_ms: 3200,
    };
    let frame = submit_answer(5, &submission);
    assert_eq!(frame.header("destination"), Some("/app/room/5/answer"));

    let body: serde_json::Value = serde_json::from_str(&frame.body).expect("body is json");
    assert_eq!(body["roomId"], 5);
    assert_eq!(body["questionId"], 7);
    assert_eq!(body["selectedOptionId"], 21);
    assert_eq!(body["selectedOptionIndex"], 2);
    assert_eq!(body["answerText"], "Paris");
    assert_eq!(body["elapsedMs"], 3200);
}

#[test]
fn timed_out_submission_serializes_null_selection() {
    let frame = submit_answer(5, &AnswerSubmission::timed_out(7, 20_000));
    let body: serde_json::Value = serde_json::from_str(&frame.body).expect("body is json");
    assert!(body["selectedOptionId"].is_null());
    assert!(body["selectedOptionIndex"].is_null());
    assert_eq!(body["answerText"], "");
}

#[test]
fn start_game_targets_the_room_destination() {
    let frame = start_game(9);
    assert_eq!(frame.header("destination"), Some("/app/room/9/start"));
}

#[test]
fn request_game_state_targets_the_state_destination() {
    let frame = request_game_state(9);
    assert_eq!(frame.header("destination"), Some("/app/room/9/state"));
}

#[test]
fn request_room_list_sends_empty_payload() {
    let frame = request_room_list();
    assert_eq!(frame.header("destination"), Some("/app/rooms/subscribe"));
    assert_eq!(frame.body, "{}");
}
