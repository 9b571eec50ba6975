//! Room lifecycle actions: the REST call plus the realtime wiring each one
//! implies.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages call these from `spawn_local`. Each action sequences its REST call,
//! the room-store update, and the topic subscriptions so no page has to know
//! the ordering. Subscriptions registered here survive reconnects via the
//! registry's replay.

use leptos::prelude::{GetUntracked, RwSignal, Update};

use crate::net::commands;
use crate::net::connection::SocketClient;
use crate::net::destinations;
use crate::net::error::ClientError;
use crate::net::registry::TopicMessage;
use crate::net::types::{Room, RoomConfig, RoomStatus};
use crate::net::api;
use crate::state::game::GameInput;
use crate::state::game_loop::GameController;
use crate::state::room::RoomStore;
use crate::state::rooms::RoomsState;

use crate::net::events::GameEvent;

/// Did this event just remove the local user from the room? The room store
/// has already been updated when this runs.
fn evicts_self(event: &GameEvent, store: &RoomStore) -> bool {
    match event {
        GameEvent::PlayerKicked { user_id, .. } => store.self_user_id == Some(*user_id),
        GameEvent::RoomDeleted { .. } => store.current.is_none(),
        _ => false,
    }
}

/// Connect the socket if it is not already up, minting a fresh handshake
/// token first.
///
/// # Errors
///
/// `Authentication` when no session exists; connect errors pass through.
pub async fn ensure_connected(socket: &SocketClient) -> Result<(), ClientError> {
    let token = api::create_ws_token().await?;
    socket.connect(&token).await
}

/// Subscribe to the lobby's room-list topic and ask for the initial feed.
///
/// # Errors
///
/// Connect or subscribe failures pass through.
pub async fn watch_lobby(
    socket: &SocketClient,
    rooms: RwSignal<RoomsState>,
) -> Result<(), ClientError> {
    ensure_connected(socket).await?;
    socket.subscribe(&destinations::room_list_topic(), move |msg| match msg {
        TopicMessage::Event(event) => rooms.update(|s| s.apply_event(&event)),
        TopicMessage::Raw(body) => {
            leptos::logging::log!("unhandled lobby frame: {body}");
        }
    })?;
    socket.send(&commands::request_room_list())
}

/// Install a joined room locally and wire up its realtime topics.
///
/// Subscribes to the room's broadcast topic and this user's personal queue;
/// when the room is already mid-game (rejoin after a refresh), also requests
/// a game-state snapshot.
///
/// # Errors
///
/// Connect or subscribe failures pass through; the room store is only
/// populated on success.
pub async fn enter_room(
    socket: &SocketClient,
    room_sig: RwSignal<RoomStore>,
    game: &GameController,
    room: Room,
) -> Result<(), ClientError> {
    ensure_connected(socket).await?;

    let roster = api::room_players(room.id).await.unwrap_or_default();

    let topic_game = game.clone();
    socket.subscribe(&destinations::room_topic(room.id), move |msg| match msg {
        TopicMessage::Event(event) => {
            // Room state first so a game start snapshots the fresh roster.
            room_sig.update(|r| r.apply_event(&event));
            if evicts_self(&event, &room_sig.get_untracked()) {
                topic_game.dispatch(GameInput::Teardown);
            } else {
                topic_game.handle_event(event);
            }
        }
        TopicMessage::Raw(body) => {
            leptos::logging::log!("unhandled room frame: {body}");
        }
    })?;

    let queue_game = game.clone();
    socket.subscribe(&destinations::user_queue(), move |msg| {
        if let TopicMessage::Event(event) = msg {
            queue_game.handle_event(event);
        }
    })?;

    let mid_game = room.status == RoomStatus::Playing;
    let room_id = room.id;
    room_sig.update(|r| r.enter_room(room, roster));
    if mid_game {
        socket.send(&commands::request_game_state(room_id))?;
    }
    Ok(())
}

/// Create a room and enter it as host.
///
/// # Errors
///
/// `ActionRejected` with the backend's validation message.
pub async fn create_and_enter(
    socket: &SocketClient,
    room_sig: RwSignal<RoomStore>,
    game: &GameController,
    config: &RoomConfig,
) -> Result<Room, ClientError> {
    let room = api::create_room(config).await?;
    enter_room(socket, room_sig, game, room.clone()).await?;
    Ok(room)
}

/// Join by human-shareable code and enter.
///
/// # Errors
///
/// `RoomNotFound` for an unknown code; join rejections pass through.
pub async fn join_with_code(
    socket: &SocketClient,
    room_sig: RwSignal<RoomStore>,
    game: &GameController,
    code: &str,
) -> Result<Room, ClientError> {
    let room = api::join_by_code(code).await?;
    enter_room(socket, room_sig, game, room.clone()).await?;
    Ok(room)
}

/// Join a listed room by id and enter.
///
/// # Errors
///
/// `ActionRejected` when the room is full or already playing.
pub async fn join_listed(
    socket: &SocketClient,
    room_sig: RwSignal<RoomStore>,
    game: &GameController,
    room_id: i64,
) -> Result<Room, ClientError> {
    let room = api::join_room(room_id).await?;
    enter_room(socket, room_sig, game, room.clone()).await?;
    Ok(room)
}

/// Leave the current room: unsubscribe, tell the backend, drop local state.
/// Best-effort by design; local state is cleared even if the REST call fails.
pub async fn leave_room(
    socket: &SocketClient,
    room_sig: RwSignal<RoomStore>,
    game: &GameController,
) {
    let room_id = room_sig.get_untracked().current.map(|r| r.id);
    if let Some(room_id) = room_id {
        socket.unsubscribe(&destinations::room_topic(room_id));
        socket.unsubscribe(&destinations::user_queue());
        if let Err(e) = api::leave_room(room_id).await {
            leptos::logging::warn!("leave room failed: {e}");
        }
    }
    room_sig.update(RoomStore::clear_room);
    game.dispatch(GameInput::Teardown);
}

/// Host action: start the game. Goes over the socket when connected, falling
/// back to REST otherwise.
///
/// # Errors
///
/// `ActionRejected` when the caller is not the host or the room is empty.
pub async fn start_game(socket: &SocketClient, room_id: i64) -> Result<(), ClientError> {
    match socket.send(&commands::start_game(room_id)) {
        Ok(()) => Ok(()),
        Err(ClientError::NotConnected) => api::start_game(room_id).await,
        Err(e) => Err(e),
    }
}
