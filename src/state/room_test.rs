use super::*;
use crate::net::types::RoomStatus;

fn room(id: i64, owner_id: i64) -> Room {
    Room {
        id,
        code: "QZ42XY".to_owned(),
        name: format!("room-{id}"),
        topic_id: Some(1),
        owner_id,
        max_players: 8,
        current_players: 0,
        is_private: false,
        mode: None,
        question_count: 10,
        countdown_seconds: 5,
        status: RoomStatus::Waiting,
        created_at: None,
    }
}

fn player(user_id: i64, name: &str) -> Player {
    Player {
        user_id,
        display_name: name.to_owned(),
        avatar_url: None,
        is_host: false,
        has_answered: false,
        score: 0,
    }
}

fn store_with_room() -> RoomStore {
    let mut store = RoomStore {
        self_user_id: Some(1),
        ..RoomStore::default()
    };
    store.enter_room(room(7, 1), vec![player(1, "alice"), player(2, "bob")]);
    store.current.as_mut().expect("room").current_players = 2;
    store
}

// =============================================================
// Action guard
// =============================================================

#[test]
fn begin_action_rejects_overlapping_actions() {
    let mut store = RoomStore::default();
    assert!(store.begin_action());
    assert!(!store.begin_action());

    store.finish_action(None);
    assert!(store.begin_action());
}

#[test]
fn finish_action_records_the_inline_error() {
    let mut store = RoomStore::default();
    assert!(store.begin_action());
    store.finish_action(Some("room is full".to_owned()));
    assert!(!store.is_loading);
    assert_eq!(store.last_error.as_deref(), Some("room is full"));
}

// =============================================================
// Roster as a keyed set
// =============================================================

#[test]
fn roster_preserves_insertion_order() {
    let mut store = store_with_room();
    store.apply_event(&GameEvent::PlayerJoined(player(3, "carol")));
    store.apply_event(&GameEvent::PlayerJoined(player(4, "dave")));

    let names: Vec<&str> = store.roster.iter().map(|p| p.display_name.as_str()).collect();
    assert_eq!(names, vec!["alice", "bob", "carol", "dave"]);
}

#[test]
fn duplicate_join_updates_in_place_without_duplicating() {
    let mut store = store_with_room();
    let mut bob = player(2, "bob");
    bob.score = 50;
    store.apply_event(&GameEvent::PlayerJoined(bob));

    assert_eq!(store.roster.len(), 2);
    assert_eq!(store.roster[1].score, 50);
    assert_eq!(store.current.as_ref().expect("room").current_players, 2);
}

#[test]
fn player_left_removes_only_that_player() {
    let mut store = store_with_room();
    store.apply_event(&GameEvent::PlayerLeft { user_id: 2 });

    assert_eq!(store.roster.len(), 1);
    assert_eq!(store.roster[0].user_id, 1);
    assert_eq!(store.current.as_ref().expect("room").current_players, 1);
}

#[test]
fn removing_an_unknown_player_is_a_noop() {
    let mut store = store_with_room();
    store.apply_event(&GameEvent::PlayerLeft { user_id: 99 });
    assert_eq!(store.roster.len(), 2);
    assert_eq!(store.current.as_ref().expect("room").current_players, 2);
}

// =============================================================
// Room field updates
// =============================================================

#[test]
fn room_updated_replaces_fields_but_not_roster() {
    let mut store = store_with_room();
    let mut updated = room(7, 1);
    updated.name = "renamed".to_owned();
    store.apply_event(&GameEvent::RoomUpdated(updated));

    assert_eq!(store.current.as_ref().expect("room").name, "renamed");
    assert_eq!(store.roster.len(), 2);
}

#[test]
fn room_updated_for_a_different_room_is_ignored() {
    let mut store = store_with_room();
    store.apply_event(&GameEvent::RoomUpdated(room(99, 5)));
    assert_eq!(store.current.as_ref().expect("room").id, 7);
}

#[test]
fn host_changed_moves_the_host_flag() {
    let mut store = store_with_room();
    store.apply_event(&GameEvent::HostChanged { new_host_id: 2 });

    assert_eq!(store.current.as_ref().expect("room").owner_id, 2);
    assert!(!store.is_host());
    assert!(store.roster[1].is_host);
    assert!(!store.roster[0].is_host);
}

#[test]
fn game_started_flips_room_status_to_playing() {
    let mut store = store_with_room();
    store.apply_event(&GameEvent::GameStarted { question: None });
    assert_eq!(store.current.as_ref().expect("room").status, RoomStatus::Playing);
}

// =============================================================
// Kicks and closure
// =============================================================

#[test]
fn kicking_self_clears_the_room_and_records_the_reason() {
    let mut store = store_with_room();
    store.apply_event(&GameEvent::PlayerKicked {
        user_id: 1,
        reason: Some("inactivity".to_owned()),
    });

    assert!(store.current.is_none());
    assert!(store.roster.is_empty());
    assert_eq!(store.kick_notice.as_deref(), Some("inactivity"));
}

#[test]
fn kick_without_reason_falls_back_to_the_default_notice() {
    let mut store = store_with_room();
    store.apply_event(&GameEvent::PlayerKicked { user_id: 1, reason: None });
    assert_eq!(store.kick_notice.as_deref(), Some(KICKED_NOTICE));
}

#[test]
fn kicking_another_player_just_removes_them() {
    let mut store = store_with_room();
    store.apply_event(&GameEvent::PlayerKicked { user_id: 2, reason: None });

    assert!(store.current.is_some());
    assert_eq!(store.roster.len(), 1);
    assert!(store.kick_notice.is_none());
}

#[test]
fn deleting_the_current_room_evicts_with_a_notice() {
    let mut store = store_with_room();
    store.apply_event(&GameEvent::RoomDeleted { room_id: 7 });

    assert!(store.current.is_none());
    assert_eq!(store.kick_notice.as_deref(), Some(ROOM_CLOSED_NOTICE));
}

#[test]
fn deleting_some_other_room_is_ignored() {
    let mut store = store_with_room();
    store.apply_event(&GameEvent::RoomDeleted { room_id: 99 });
    assert!(store.current.is_some());
    assert!(store.kick_notice.is_none());
}

#[test]
fn entering_a_room_clears_a_stale_kick_notice() {
    let mut store = store_with_room();
    store.apply_event(&GameEvent::PlayerKicked { user_id: 1, reason: None });
    store.enter_room(room(8, 2), vec![player(1, "alice")]);
    assert!(store.kick_notice.is_none());
}

// =============================================================
// Host predicate
// =============================================================

#[test]
fn is_host_matches_owner_id_against_self() {
    let store = store_with_room();
    assert!(store.is_host());

    let mut guest = store_with_room();
    guest.self_user_id = Some(2);
    assert!(!guest.is_host());
}

#[test]
fn is_host_is_false_outside_a_room() {
    let store = RoomStore { self_user_id: Some(1), ..RoomStore::default() };
    assert!(!store.is_host());
}
