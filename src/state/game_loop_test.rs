use super::*;
use crate::net::types::{Player, Question, QuestionOption, Room, RoomStatus};
use crate::state::game::GameInput;

fn room_store() -> RoomStore {
    let mut store = RoomStore::default();
    store.enter_room(
        Room {
            id: 7,
            code: "QZ42XY".to_owned(),
            name: "room".to_owned(),
            topic_id: None,
            owner_id: 1,
            max_players: 8,
            current_players: 2,
            is_private: false,
            mode: None,
            question_count: 10,
            countdown_seconds: 5,
            status: RoomStatus::Waiting,
            created_at: None,
        },
        vec![
            Player {
                user_id: 1,
                display_name: "alice".to_owned(),
                avatar_url: None,
                is_host: true,
                has_answered: true,
                score: 0,
            },
            Player {
                user_id: 2,
                display_name: "bob".to_owned(),
                avatar_url: None,
                is_host: false,
                has_answered: false,
                score: 0,
            },
        ],
    );
    store
}

fn question() -> Question {
    Question {
        id: 1,
        text: "q".to_owned(),
        image_url: None,
        options: vec![QuestionOption { id: 11, text: "red".to_owned() }],
        time_limit_seconds: 5,
        sequence_number: 1,
        total_questions: 3,
    }
}

#[test]
fn game_start_snapshots_the_roster_with_flags_cleared() {
    let store = room_store();
    let input = input_from_event(GameEvent::GameStarted { question: None }, &store)
        .expect("game input");

    let GameInput::Started { room_id, question, roster } = input else {
        panic!("expected a start input");
    };
    assert_eq!(room_id, 7);
    assert!(question.is_none());
    assert_eq!(roster.len(), 2);
    assert!(roster.iter().all(|f| !f.has_answered));
}

#[test]
fn game_start_outside_a_room_maps_to_nothing() {
    let store = RoomStore::default();
    assert!(input_from_event(GameEvent::GameStarted { question: None }, &store).is_none());
}

#[test]
fn game_scoped_events_map_to_inputs() {
    let store = room_store();
    assert_eq!(
        input_from_event(GameEvent::PlayerAnswered { user_id: 2 }, &store),
        Some(GameInput::PeerAnswered { user_id: 2 })
    );
    assert_eq!(
        input_from_event(GameEvent::NextQuestion(question()), &store),
        Some(GameInput::Question(question()))
    );
    assert_eq!(
        input_from_event(GameEvent::GameEnded { rankings: Vec::new() }, &store),
        Some(GameInput::Ended { rankings: Vec::new() })
    );
}

#[test]
fn room_membership_events_are_not_game_inputs() {
    let store = room_store();
    assert!(input_from_event(GameEvent::PlayerLeft { user_id: 2 }, &store).is_none());
    assert!(input_from_event(GameEvent::HostChanged { new_host_id: 2 }, &store).is_none());
}
