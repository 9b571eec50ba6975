//! Game screen: live question, countdown, reveal popup, and standings.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::components::result_popup::ResultPopup;
use crate::net::commands;
use crate::net::connection::{ConnectionStatus, SocketClient};
use crate::state::auth::AuthState;
use crate::state::game::{GameInput, GamePhase, GameState};
use crate::state::game_loop::GameController;
use crate::state::room::RoomStore;
use crate::util::auth::require_session;
use crate::util::format::{format_countdown, format_score, ordinal, streak_label};

#[component]
pub fn GamePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let room = expect_context::<RwSignal<RoomStore>>();
    let game = expect_context::<RwSignal<GameState>>();
    let socket = expect_context::<StoredValue<SocketClient, LocalStorage>>();
    let controller = expect_context::<GameController>();

    require_session(auth);
    let params = use_params_map();
    let navigate = use_navigate();

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

    // Deep link or refresh: no local game yet, so rejoin through the room
    // page, which rewires topics and requests a snapshot.
    Effect::new({
        let navigate = navigate.clone();
        move || {
            if auth.get().user.is_none() {
                return;
            }
            let idle = game.get().phase == GamePhase::Idle;
            let store = room.get();
            if idle && store.current.is_none() && store.kick_notice.is_none()
                && let Some(id) = params.with(|p| p.get("id"))
            {
                navigate(&format!("/room/{id}"), NavigateOptions::default());
            }
        }
    });

    // Kicked mid-game: back to the lobby, which shows the notice.
    Effect::new({
        let navigate = navigate.clone();
        move || {
            let store = room.get();
            if store.current.is_none() && store.kick_notice.is_some() {
                navigate("/", NavigateOptions::default());
            }
        }
    });

    // After a reconnect mid-game, ask for a fresh snapshot; the registry has
    // already replayed the subscriptions.
    Effect::new(move || {
        let connected = room.get().connection == ConnectionStatus::Connected;
        let in_game = game.get_untracked().phase != GamePhase::Idle;
        if connected && in_game {
            if let Some(room_id) = game.get_untracked().room_id {
                let _ = socket.get_value().send(&commands::request_game_state(room_id));
            }
        }
    });

    let on_answer = Callback::new({
        let controller = controller.clone();
        move |option_index: usize| {
            controller.dispatch(GameInput::Submit { option_index });
        }
    });

    let on_leave = {
        let controller = controller.clone();
        move |_| {
            #[cfg(feature = "hydrate")]
            {
                let socket = socket.get_value();
                let controller = controller.clone();
                leptos::task::spawn_local(async move {
                    crate::state::room_actions::leave_room(&socket, room, &controller).await;
                    pending_nav.set(Some("/".to_owned()));
                });
            }
            #[cfg(not(feature = "hydrate"))]
            let _ = (socket, &controller);
        }
    };

    let phase = move || game.get().phase;

    view! {
        <div class="game-page">
            <header class="game-header">
                <span class="game-header__score">
                    {move || format!("Score: {}", format_score(game.get().score))}
                </span>
                <span class="game-header__streak">
                    {move || streak_label(game.get().streak)}
                </span>
                <Show when=move || phase() == GamePhase::QuestionActive>
                    <span
                        class="game-header__countdown"
                        class:game-header__countdown--low=move || game.get().time_remaining <= 3
                    >
                        {move || format_countdown(game.get().time_remaining)}
                    </span>
                </Show>
                <button class="game-header__leave" on:click=on_leave>"Leave"</button>
            </header>

            <Show when=move || phase() == GamePhase::AwaitingFirstQuestion>
                <div class="game-waiting">"Get ready..."</div>
            </Show>

            <Show when=move || {
                matches!(
                    phase(),
                    GamePhase::QuestionActive
                        | GamePhase::AwaitingResult
                        | GamePhase::AnswerRevealed
                )
            }>
                <QuestionPanel on_answer=on_answer/>
            </Show>

            <Show when=move || phase() == GamePhase::Completed>
                <div class="game-waiting">"All done — waiting for the other players..."</div>
            </Show>

            <Show when=move || phase() == GamePhase::Results>
                <StandingsPanel/>
            </Show>

            <aside class="game-roster">
                <h2>"Players"</h2>
                <ul>
                    <For
                        each=move || game.get().roster
                        key=|flag| (flag.user_id, flag.has_answered)
                        let:flag
                    >
                        <li
                            class="game-roster__row"
                            class:game-roster__row--answered=flag.has_answered
                        >
                            {flag.display_name.clone()}
                        </li>
                    </For>
                </ul>
            </aside>

            <ResultPopup/>
        </div>
    }
}

/// The active question with its answer grid.
#[component]
fn QuestionPanel(on_answer: Callback<usize>) -> impl IntoView {
    let game = expect_context::<RwSignal<GameState>>();

    view! {
        <section class="game-question">
            <p class="game-question__progress">
                {move || {
                    game.get()
                        .question
                        .map(|q| format!("Question {} of {}", q.sequence_number, q.total_questions))
                        .unwrap_or_default()
                }}
            </p>
            <h2 class="game-question__text">
                {move || game.get().question.map(|q| q.text).unwrap_or_default()}
            </h2>
            {move || {
                game.get().question.and_then(|q| {
                    q.image_url.map(|url| view! {
                        <img class="game-question__image" src=url alt=""/>
                    })
                })
            }}
            <div class="game-options">
                <For
                    each=move || {
                        game.get()
                            .question
                            .map(|q| q.options.into_iter().enumerate().collect::<Vec<_>>())
                            .unwrap_or_default()
                    }
                    key=|(_, option)| option.id
                    let:entry
                >
                    {
                        let (index, option) = entry;
                        let chosen = move || game.get().selected_option == Some(index);
                        let locked = move || game.get().answered;
                        view! {
                            <button
                                class="game-options__option"
                                class:game-options__option--chosen=chosen
                                disabled=locked
                                on:click=move |_| on_answer.run(index)
                            >
                                {option.text.clone()}
                            </button>
                        }
                    }
                </For>
            </div>
        </section>
    }
}

/// Final standings, in the server's order.
#[component]
fn StandingsPanel() -> impl IntoView {
    let game = expect_context::<RwSignal<GameState>>();
    let room = expect_context::<RwSignal<RoomStore>>();

    view! {
        <section class="game-standings">
            <h2>"Final Standings"</h2>
            <ol class="game-standings__list">
                <For
                    each=move || game.get().rankings
                    key=|entry| entry.user_id
                    let:entry
                >
                    {
                        let user_id = entry.user_id;
                        let is_self = move || room.get().self_user_id == Some(user_id);
                        view! {
                            <li
                                class="game-standings__row"
                                class:game-standings__row--self=is_self
                            >
                                <span class="game-standings__rank">{ordinal(entry.rank)}</span>
                                <span class="game-standings__name">{entry.display_name.clone()}</span>
                                <span class="game-standings__score">
                                    {format_score(entry.score)}
                                </span>
                            </li>
                        }
                    }
                </For>
            </ol>
            <a class="game-standings__back" href="/">"Back to lobby"</a>
        </section>
    }
}
