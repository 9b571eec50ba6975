//! # quizrally
//!
//! Leptos + WASM browser client for a realtime multiplayer quiz service.
//!
//! This crate contains pages, components, application state, the REST
//! boundary, and the STOMP websocket client. Framing lives in the `stomp`
//! member crate.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: attach the client to server-rendered markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(crate::app::App);
}
