//! Client state containers, provided via context as `RwSignal`s.

pub mod auth;
pub mod game;
pub mod game_loop;
pub mod room;
pub mod room_actions;
pub mod rooms;
pub mod ui;
