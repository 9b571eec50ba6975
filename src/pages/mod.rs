//! Route components.

pub mod game;
pub mod lobby;
pub mod login;
pub mod profile;
pub mod room;
