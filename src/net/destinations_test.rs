use super::*;

#[test]
fn room_topic_embeds_room_id() {
    assert_eq!(room_topic(42), "/topic/room/42");
}

#[test]
fn command_destinations_are_room_scoped() {
    assert_eq!(submit_answer_destination(7), "/app/room/7/answer");
    assert_eq!(start_game_destination(7), "/app/room/7/start");
    assert_eq!(game_state_destination(7), "/app/room/7/state");
}

#[test]
fn shared_destinations_are_fixed() {
    assert_eq!(room_list_topic(), "/topic/rooms");
    assert_eq!(user_queue(), "/user/queue/game");
    assert_eq!(room_list_request_destination(), "/app/rooms/subscribe");
}
