use super::*;
use crate::net::types::RoomStatus;

fn room(id: i64) -> Room {
    Room {
        id,
        code: format!("CODE{id}"),
        name: format!("room-{id}"),
        topic_id: None,
        owner_id: 1,
        max_players: 8,
        current_players: 1,
        is_private: false,
        mode: None,
        question_count: 10,
        countdown_seconds: 5,
        status: RoomStatus::Waiting,
        created_at: None,
    }
}

fn listing() -> RoomsState {
    let mut state = RoomsState::default();
    state.set_page(Paged {
        items: vec![room(1), room(2)],
        page: 0,
        total_pages: 1,
        total_items: 2,
    });
    state
}

#[test]
fn set_page_replaces_items_and_paging() {
    let state = listing();
    assert_eq!(state.items.len(), 2);
    assert_eq!(state.total_items, 2);
    assert!(!state.is_loading);
    assert!(state.error.is_none());
}

#[test]
fn created_room_prepends_to_the_listing() {
    let mut state = listing();
    state.apply_event(&GameEvent::RoomCreated(room(3)));

    assert_eq!(state.items[0].id, 3);
    assert_eq!(state.items.len(), 3);
    assert_eq!(state.total_items, 3);
}

#[test]
fn private_room_creation_stays_hidden() {
    let mut state = listing();
    let mut private = room(3);
    private.is_private = true;
    state.apply_event(&GameEvent::RoomCreated(private));
    assert_eq!(state.items.len(), 2);
}

#[test]
fn duplicate_creation_broadcast_is_deduplicated() {
    let mut state = listing();
    state.apply_event(&GameEvent::RoomCreated(room(1)));
    assert_eq!(state.items.len(), 2);
    assert_eq!(state.total_items, 2);
}

#[test]
fn room_updated_patches_in_place() {
    let mut state = listing();
    let mut updated = room(2);
    updated.current_players = 5;
    state.apply_event(&GameEvent::RoomUpdated(updated));

    assert_eq!(state.items[1].current_players, 5);
    assert_eq!(state.items.len(), 2);
}

#[test]
fn update_for_an_unlisted_room_is_ignored() {
    let mut state = listing();
    state.apply_event(&GameEvent::RoomUpdated(room(9)));
    assert_eq!(state.items.len(), 2);
}

#[test]
fn room_deleted_removes_from_the_listing() {
    let mut state = listing();
    state.apply_event(&GameEvent::RoomDeleted { room_id: 1 });

    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].id, 2);
    assert_eq!(state.total_items, 1);
}

#[test]
fn unrelated_events_leave_the_listing_alone() {
    let mut state = listing();
    state.apply_event(&GameEvent::PlayerAnswered { user_id: 4 });
    assert_eq!(state.items.len(), 2);
}
