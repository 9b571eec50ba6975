//! Global status bar: connection indicator plus the notice banner.

use leptos::prelude::*;

use crate::net::connection::ConnectionStatus;
use crate::state::room::RoomStore;
use crate::state::ui::UiState;

/// Connection dot and dismissable notice, pinned across all pages.
#[component]
pub fn StatusBar() -> impl IntoView {
    let room = expect_context::<RwSignal<RoomStore>>();
    let ui = expect_context::<RwSignal<UiState>>();

    let connection_label = move || match room.get().connection {
        ConnectionStatus::Disconnected => "offline",
        ConnectionStatus::Connecting => "connecting",
        ConnectionStatus::Connected => "live",
    };
    let connection_error = move || room.get().connection_error.map(|e| e.to_string());

    view! {
        <div class="status-bar">
            <span
                class="status-bar__dot"
                class:status-bar__dot--live=move || {
                    room.get().connection == ConnectionStatus::Connected
                }
            ></span>
            <span class="status-bar__label">{connection_label}</span>
            <Show when=move || connection_error().is_some()>
                <span class="status-bar__error">{move || connection_error().unwrap_or_default()}</span>
            </Show>
            <Show when=move || ui.get().notice.is_some()>
                {move || {
                    ui.get().notice.map(|notice| view! {
                        <span
                            class="status-bar__notice"
                            class:status-bar__notice--error=notice.is_error
                        >
                            {notice.message.clone()}
                            <button
                                class="status-bar__dismiss"
                                on:click=move |_| ui.update(UiState::dismiss_notice)
                            >
                                "✕"
                            </button>
                        </span>
                    })
                }}
            </Show>
        </div>
    }
}
