//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::status_bar::StatusBar;
use crate::net::connection::SocketClient;
use crate::pages::{
    game::GamePage, lobby::LobbyPage, login::LoginPage, profile::ProfilePage, room::RoomPage,
};
use crate::state::auth::AuthState;
use crate::state::game::GameState;
use crate::state::game_loop::GameController;
use crate::state::room::RoomStore;
use crate::state::rooms::RoomsState;
use crate::state::ui::UiState;
#[cfg(feature = "hydrate")]
use crate::util::dark_mode;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides all shared state contexts, the socket client, and the game
/// controller, then sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState { user: None, loading: true });
    let ui = RwSignal::new(UiState::default());
    let rooms = RwSignal::new(RoomsState::default());
    let room = RwSignal::new(RoomStore::default());
    let game = RwSignal::new(GameState::default());

    let socket = SocketClient::new(room);
    let controller = GameController::new(game, room, socket.clone());

    provide_context(auth);
    provide_context(ui);
    provide_context(rooms);
    provide_context(room);
    provide_context(game);
    // The socket holds browser-thread state, so its context handle is a
    // local StoredValue rather than the client itself.
    provide_context(StoredValue::new_local(socket));
    provide_context(controller);

    // Session probe and theme, browser only.
    #[cfg(feature = "hydrate")]
    {
        let dark = dark_mode::read_preference();
        dark_mode::apply(dark);
        ui.update(|u| u.dark_mode = dark);

        leptos::task::spawn_local(async move {
            let user = crate::net::api::fetch_current_user().await;
            if let Some(user) = &user {
                room.update(|r| r.self_user_id = Some(user.id));
            }
            auth.update(|a| {
                a.user = user;
                a.loading = false;
            });
        });
    }

    view! {
        <Stylesheet id="leptos" href="/pkg/quizrally.css"/>
        <Title text="QuizRally"/>

        <Router>
            <StatusBar/>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("") view=LobbyPage/>
                <Route path=StaticSegment("profile") view=ProfilePage/>
                <Route path=(StaticSegment("room"), ParamSegment("id")) view=RoomPage/>
                <Route path=(StaticSegment("game"), ParamSegment("id")) view=GamePage/>
            </Routes>
        </Router>
    }
}
