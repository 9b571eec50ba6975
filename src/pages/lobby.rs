//! Lobby page: browse, search, create, and join rooms.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::room_card::RoomCard;
use crate::net::connection::SocketClient;
use crate::net::types::RoomConfig;
use crate::state::auth::AuthState;
use crate::state::game_loop::GameController;
use crate::state::room::RoomStore;
use crate::state::rooms::RoomsState;
use crate::state::ui::UiState;
use crate::util::auth::require_session;

#[component]
pub fn LobbyPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let rooms = expect_context::<RwSignal<RoomsState>>();
    let room = expect_context::<RwSignal<RoomStore>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let socket = expect_context::<StoredValue<SocketClient, LocalStorage>>();
    let game = expect_context::<GameController>();

    require_session(auth);
    let navigate = use_navigate();

    // Navigation requested from event handlers lands here and runs in an
    // effect, which owns the router handle.
    let pending_nav = RwSignal::new(None::<String>);
    Effect::new(move || {
        if let Some(path) = pending_nav.get() {
            navigate(&path, NavigateOptions::default());
        }
    });

    // A pending kick notice from the previous room surfaces here.
    if let Some(message) = room.get_untracked().kick_notice {
        room.update(|r| r.kick_notice = None);
        ui.update(|u| u.notify_error(message));
    }

    let show_create = RwSignal::new(false);
    let join_code = RwSignal::new(String::new());

    let fetch_page = {
        move |page: u32| {
            rooms.update(|s| s.is_loading = true);
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                let search = rooms.get_untracked().search;
                let size = crate::state::rooms::PAGE_SIZE;
                match crate::net::api::list_rooms(page, size, &search).await {
                    Ok(listing) => rooms.update(|s| s.set_page(listing)),
                    Err(e) => rooms.update(|s| s.set_error(e.to_string())),
                }
            });
            #[cfg(not(feature = "hydrate"))]
            let _ = page;
        }
    };

    // Initial load plus the live lobby feed.
    Effect::new(move || {
        if auth.get().user.is_none() {
            return;
        }
        fetch_page(0);
        #[cfg(feature = "hydrate")]
        {
            let socket = socket.get_value();
            leptos::task::spawn_local(async move {
                if let Err(e) = crate::state::room_actions::watch_lobby(&socket, rooms).await {
                    leptos::logging::warn!("lobby feed unavailable: {e}");
                }
            });
        }
    });

    let enter = move |room_id: i64| {
        pending_nav.set(Some(format!("/room/{room_id}")));
    };

    let on_join_listed = Callback::new({
        let game = game.clone();
        move |room_id: i64| {
            if !room.try_update(RoomStore::begin_action).unwrap_or(false) {
                return;
            }
            #[cfg(feature = "hydrate")]
            {
                let socket = socket.get_value();
                let game = game.clone();
                leptos::task::spawn_local(async move {
                    let outcome =
                        crate::state::room_actions::join_listed(&socket, room, &game, room_id)
                            .await;
                    match outcome {
                        Ok(joined) => {
                            room.update(|r| r.finish_action(None));
                            enter(joined.id);
                        }
                        Err(e) => room.update(|r| r.finish_action(Some(e.to_string()))),
                    }
                });
            }
            #[cfg(not(feature = "hydrate"))]
            let _ = (room_id, socket, &game);
        }
    });

    let on_join_code = {
        let game = game.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            let code = join_code.get().trim().to_ascii_uppercase();
            if code.is_empty() {
                return;
            }
            if !room.try_update(RoomStore::begin_action).unwrap_or(false) {
                return;
            }
            #[cfg(feature = "hydrate")]
            {
                let socket = socket.get_value();
                let game = game.clone();
                leptos::task::spawn_local(async move {
                    let outcome =
                        crate::state::room_actions::join_with_code(&socket, room, &game, &code)
                            .await;
                    match outcome {
                        Ok(joined) => {
                            room.update(|r| r.finish_action(None));
                            enter(joined.id);
                        }
                        Err(e) => room.update(|r| r.finish_action(Some(e.to_string()))),
                    }
                });
            }
            #[cfg(not(feature = "hydrate"))]
            let _ = (code, socket, &game);
        }
    };

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        fetch_page(0);
    };

    view! {
        <div class="lobby-page">
            <header class="lobby-header">
                <h1>"Rooms"</h1>
                <a class="lobby-header__profile" href="/profile">"Profile"</a>
                <button class="lobby-header__create" on:click=move |_| show_create.set(true)>
                    "Create Room"
                </button>
            </header>

            <form class="lobby-join-code" on:submit=on_join_code>
                <input
                    class="lobby-join-code__input"
                    type="text"
                    maxlength="6"
                    placeholder="ABC123"
                    prop:value=move || join_code.get()
                    on:input=move |ev| join_code.set(event_target_value(&ev).to_ascii_uppercase())
                />
                <button type="submit" disabled=move || room.get().is_loading>
                    "Join by code"
                </button>
            </form>

            <form class="lobby-search" on:submit=on_search>
                <input
                    class="lobby-search__input"
                    type="text"
                    placeholder="Search rooms"
                    prop:value=move || rooms.get().search
                    on:input=move |ev| rooms.update(|s| s.search = event_target_value(&ev))
                />
                <button type="submit">"Search"</button>
            </form>

            <Show when=move || room.get().last_error.is_some()>
                <p class="lobby-error">{move || room.get().last_error.unwrap_or_default()}</p>
            </Show>
            <Show when=move || rooms.get().error.is_some()>
                <p class="lobby-error">{move || rooms.get().error.unwrap_or_default()}</p>
            </Show>

            <div class="lobby-grid">
                <For
                    each=move || rooms.get().items
                    key=|r| (r.id, r.current_players, r.status)
                    let:listed
                >
                    <RoomCard room=listed on_join=on_join_listed/>
                </For>
            </div>

            <div class="lobby-paging">
                <button
                    disabled=move || rooms.get().page == 0
                    on:click=move |_| fetch_page(rooms.get_untracked().page.saturating_sub(1))
                >
                    "Prev"
                </button>
                <span>
                    {move || {
                        let s = rooms.get();
                        format!("page {} of {}", s.page + 1, s.total_pages.max(1))
                    }}
                </span>
                <button
                    disabled=move || {
                        let s = rooms.get();
                        s.page + 1 >= s.total_pages.max(1)
                    }
                    on:click=move |_| fetch_page(rooms.get_untracked().page + 1)
                >
                    "Next"
                </button>
            </div>

            <Show when=move || show_create.get()>
                <CreateRoomDialog
                    on_close=Callback::new(move |()| show_create.set(false))
                    on_created=Callback::new({
                        let enter = enter.clone();
                        move |room_id: i64| {
                            show_create.set(false);
                            enter(room_id);
                        }
                    })
                />
            </Show>
        </div>
    }
}

/// Modal form for room creation.
#[component]
fn CreateRoomDialog(on_close: Callback<()>, on_created: Callback<i64>) -> impl IntoView {
    let room = expect_context::<RwSignal<RoomStore>>();
    let socket = expect_context::<StoredValue<SocketClient, LocalStorage>>();
    let game = expect_context::<GameController>();

    let name = RwSignal::new(String::new());
    let topic_id = RwSignal::new(None::<i64>);
    let topics = RwSignal::new(Vec::<crate::net::types::Topic>::new());
    let max_players = RwSignal::new(8u32);
    let question_count = RwSignal::new(10u32);
    let countdown = RwSignal::new(5u32);
    let is_private = RwSignal::new(false);
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::list_topics().await {
            Ok(list) => topics.set(list),
            Err(e) => leptos::logging::warn!("topics unavailable: {e}"),
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let name_value = name.get().trim().to_owned();
        if name_value.is_empty() {
            error.set("Name the room first.".to_owned());
            return;
        }
        busy.set(true);
        let config = RoomConfig {
            name: name_value,
            topic_id: topic_id.get(),
            max_players: max_players.get(),
            is_private: is_private.get(),
            question_count: question_count.get(),
            countdown_seconds: countdown.get(),
            mode: None,
        };

        #[cfg(feature = "hydrate")]
        {
            let socket = socket.get_value();
            let game = game.clone();
            leptos::task::spawn_local(async move {
                let outcome =
                    crate::state::room_actions::create_and_enter(&socket, room, &game, &config)
                        .await;
                match outcome {
                    Ok(created) => on_created.run(created.id),
                    Err(e) => {
                        error.set(e.to_string());
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (config, socket, &game, room);
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div class="dialog" on:click=|ev| ev.stop_propagation()>
                <h2>"Create Room"</h2>
                <form class="dialog-form" on:submit=on_submit>
                    <input
                        class="dialog-input"
                        type="text"
                        placeholder="Room name"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                    <select
                        class="dialog-select"
                        on:change=move |ev| {
                            topic_id.set(event_target_value(&ev).parse().ok());
                        }
                    >
                        <option value="">"Any topic"</option>
                        <For each=move || topics.get() key=|t| t.id let:topic>
                            <option value=topic.id.to_string()>{topic.name.clone()}</option>
                        </For>
                    </select>
                    <label class="dialog-field">
                        "Max players"
                        <input
                            type="number"
                            min="2"
                            max="32"
                            prop:value=move || max_players.get().to_string()
                            on:input=move |ev| {
                                if let Ok(n) = event_target_value(&ev).parse() {
                                    max_players.set(n);
                                }
                            }
                        />
                    </label>
                    <label class="dialog-field">
                        "Questions"
                        <input
                            type="number"
                            min="1"
                            max="50"
                            prop:value=move || question_count.get().to_string()
                            on:input=move |ev| {
                                if let Ok(n) = event_target_value(&ev).parse() {
                                    question_count.set(n);
                                }
                            }
                        />
                    </label>
                    <label class="dialog-field">
                        "Seconds per question"
                        <input
                            type="number"
                            min="3"
                            max="120"
                            prop:value=move || countdown.get().to_string()
                            on:input=move |ev| {
                                if let Ok(n) = event_target_value(&ev).parse() {
                                    countdown.set(n);
                                }
                            }
                        />
                    </label>
                    <label class="dialog-field dialog-field--check">
                        <input
                            type="checkbox"
                            prop:checked=move || is_private.get()
                            on:change=move |ev| is_private.set(event_target_checked(&ev))
                        />
                        "Private (join by code only)"
                    </label>
                    <Show when=move || !error.get().is_empty()>
                        <p class="dialog-error">{move || error.get()}</p>
                    </Show>
                    <div class="dialog-actions">
                        <button type="button" on:click=move |_| on_close.run(())>
                            "Cancel"
                        </button>
                        <button type="submit" disabled=move || busy.get()>
                            "Create"
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
