//! Card component for one room in the lobby listing.
//!
//! DESIGN
//! ======
//! Keeps room presentation consistent between the browse grid and search
//! results while centralizing the join affordance.

use leptos::prelude::*;

use crate::net::types::{Room, RoomStatus};

/// A clickable card representing a joinable room.
#[component]
pub fn RoomCard(room: Room, on_join: Callback<i64>) -> impl IntoView {
    let id = room.id;
    let full = room.current_players >= room.max_players;
    let playing = room.status == RoomStatus::Playing;
    let joinable = !full && !playing;

    let status_label = match room.status {
        RoomStatus::Waiting if full => "Full",
        RoomStatus::Waiting => "Waiting",
        RoomStatus::Playing => "In game",
        RoomStatus::Finished => "Finished",
    };

    view! {
        <div class="room-card" class:room-card--closed=!joinable>
            <div class="room-card__head">
                <span class="room-card__name">{room.name.clone()}</span>
                <span class="room-card__status">{status_label}</span>
            </div>
            <div class="room-card__meta">
                <span class="room-card__players">
                    {format!("{}/{} players", room.current_players, room.max_players)}
                </span>
                <span class="room-card__questions">
                    {format!("{} questions", room.question_count)}
                </span>
            </div>
            <button
                class="room-card__join"
                disabled=!joinable
                on:click=move |_| on_join.run(id)
            >
                {if joinable { "Join" } else { "Unavailable" }}
            </button>
        </div>
    }
}
