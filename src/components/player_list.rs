//! Roster list shared by the waiting room and the game sidebar.

use leptos::prelude::*;

use crate::state::room::RoomStore;

/// Roster with optional host controls.
///
/// Host-only kick/transfer buttons appear when callbacks are given and the
/// local user is the host.
#[component]
pub fn PlayerList(
    #[prop(optional)] on_kick: Option<Callback<i64>>,
    #[prop(optional)] on_transfer: Option<Callback<i64>>,
) -> impl IntoView {
    let room = expect_context::<RwSignal<RoomStore>>();

    view! {
        <ul class="player-list">
            <For
                each=move || room.get().roster
                key=|player| player.user_id
                let:player
            >
                {
                    let user_id = player.user_id;
                    let is_self = move || room.get().self_user_id == Some(user_id);
                    let host_controls = move || {
                        room.get().is_host() && !is_self()
                    };
                    view! {
                        <li class="player-list__row">
                            <span class="player-list__name">
                                {player.display_name.clone()}
                                <Show when=move || is_self()>
                                    <span class="player-list__you">" (you)"</span>
                                </Show>
                            </span>
                            <Show when={let p = player.clone(); move || p.is_host}>
                                <span class="player-list__badge">"Host"</span>
                            </Show>
                            <Show when=host_controls>
                                <span class="player-list__controls">
                                    {on_transfer.map(|cb| view! {
                                        <button
                                            class="player-list__transfer"
                                            title="Make host"
                                            on:click=move |_| cb.run(user_id)
                                        >
                                            "⇧"
                                        </button>
                                    })}
                                    {on_kick.map(|cb| view! {
                                        <button
                                            class="player-list__kick"
                                            title="Remove player"
                                            on:click=move |_| cb.run(user_id)
                                        >
                                            "✕"
                                        </button>
                                    })}
                                </span>
                            </Show>
                        </li>
                    }
                }
            </For>
        </ul>
    }
}
