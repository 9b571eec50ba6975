//! Reusable UI components shared across pages.

pub mod player_list;
pub mod result_popup;
pub mod room_card;
pub mod status_bar;
