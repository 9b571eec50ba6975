//! Waiting-room page: roster, join code, and host controls.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::components::player_list::PlayerList;
use crate::net::connection::SocketClient;
use crate::net::types::RoomStatus;
use crate::state::auth::AuthState;
use crate::state::game_loop::GameController;
use crate::state::room::RoomStore;
use crate::util::auth::require_session;

#[component]
pub fn RoomPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let room = expect_context::<RwSignal<RoomStore>>();
    let socket = expect_context::<StoredValue<SocketClient, LocalStorage>>();
    let game = expect_context::<GameController>();

    let params = use_params_map();
    let room_id = Memo::new(move |_| {
        params.with(|p| p.get("id").and_then(|id| id.parse::<i64>().ok()))
    });

    require_session(auth);
    let navigate = use_navigate();

    // Rejoin path: after a refresh the store is empty, so fetch the room and
    // rewire its topics.
    // Navigation requested from event handlers lands here and runs in an
    // effect, which owns the router handle.
    let pending_nav = RwSignal::new(None::<String>);
    Effect::new({
        let navigate = navigate.clone();
        move || {
            if let Some(path) = pending_nav.get() {
                navigate(&path, NavigateOptions::default());
            }
        }
    });

    Effect::new({
        let game = game.clone();
        move || {
            let Some(id) = room_id.get() else {
                return;
            };
            if auth.get().user.is_none() {
                return;
            }
            let already_here = room
                .get_untracked()
                .current
                .as_ref()
                .is_some_and(|r| r.id == id);
            if already_here {
                return;
            }
            #[cfg(feature = "hydrate")]
            {
                let socket = socket.get_value();
                let game = game.clone();
                leptos::task::spawn_local(async move {
                    let outcome = match crate::net::api::get_room(id).await {
                        Ok(fetched) => {
                            crate::state::room_actions::enter_room(&socket, room, &game, fetched)
                                .await
                        }
                        Err(e) => Err(e),
                    };
                    if let Err(e) = outcome {
                        leptos::logging::warn!("room {id} unavailable: {e}");
                        pending_nav.set(Some("/".to_owned()));
                    }
                });
            }
            #[cfg(not(feature = "hydrate"))]
            let _ = (socket, &game, id);
        }
    });

    // Kicked or room closed: back to the lobby, which shows the notice.
    Effect::new({
        let navigate = navigate.clone();
        move || {
            let store = room.get();
            if store.current.is_none() && store.kick_notice.is_some() {
                navigate("/", NavigateOptions::default());
            }
        }
    });

    // Game start moves everyone to the game screen.
    Effect::new({
        let navigate = navigate.clone();
        move || {
            let store = room.get();
            if let Some(current) = &store.current
                && current.status == RoomStatus::Playing
            {
                navigate(&format!("/game/{}", current.id), NavigateOptions::default());
            }
        }
    });

    let on_start = move |_| {
        let Some(id) = room_id.get_untracked() else {
            return;
        };
        #[cfg(feature = "hydrate")]
        {
            let socket = socket.get_value();
            leptos::task::spawn_local(async move {
                if let Err(e) = crate::state::room_actions::start_game(&socket, id).await {
                    room.update(|r| r.last_error = Some(e.to_string()));
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (socket, id);
    };

    let on_leave = {
        let game = game.clone();
        move |_| {
            #[cfg(feature = "hydrate")]
            {
                let socket = socket.get_value();
                let game = game.clone();
                leptos::task::spawn_local(async move {
                    crate::state::room_actions::leave_room(&socket, room, &game).await;
                    pending_nav.set(Some("/".to_owned()));
                });
            }
            #[cfg(not(feature = "hydrate"))]
            let _ = (socket, &game);
        }
    };

    let on_kick = Callback::new(move |user_id: i64| {
        let Some(id) = room_id.get_untracked() else {
            return;
        };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            if let Err(e) = crate::net::api::kick_player(id, user_id).await {
                room.update(|r| r.last_error = Some(e.to_string()));
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (id, user_id);
    });

    let on_transfer = Callback::new(move |user_id: i64| {
        let Some(id) = room_id.get_untracked() else {
            return;
        };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            if let Err(e) = crate::net::api::transfer_host(id, user_id).await {
                room.update(|r| r.last_error = Some(e.to_string()));
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (id, user_id);
    });

    view! {
        <div class="room-page">
            <header class="room-header">
                <h1>{move || {
                    room.get().current.map(|r| r.name).unwrap_or_else(|| "Loading...".to_owned())
                }}</h1>
                <span class="room-header__code">
                    {move || {
                        room.get()
                            .current
                            .map(|r| format!("code: {}", r.code))
                            .unwrap_or_default()
                    }}
                </span>
            </header>

            <Show when=move || room.get().last_error.is_some()>
                <p class="room-error">{move || room.get().last_error.unwrap_or_default()}</p>
            </Show>

            <section class="room-roster">
                <h2>
                    {move || {
                        let store = room.get();
                        let cap = store.current.as_ref().map_or(0, |r| r.max_players);
                        format!("Players ({}/{cap})", store.roster.len())
                    }}
                </h2>
                <PlayerList on_kick=on_kick on_transfer=on_transfer/>
            </section>

            <footer class="room-actions">
                <button class="room-actions__leave" on:click=on_leave>"Leave"</button>
                <Show when=move || room.get().is_host()>
                    <button
                        class="room-actions__start"
                        disabled=move || room.get().roster.len() < 2
                        on:click=on_start
                    >
                        "Start Game"
                    </button>
                </Show>
            </footer>
        </div>
    }
}
