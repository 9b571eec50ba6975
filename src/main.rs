//! SSR entry point: serves the app shell and static assets.
#![recursion_limit = "256"]

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use axum::Router;
    use leptos::prelude::*;
    use leptos_axum::{LeptosRoutes, generate_route_list};
    use quizrally::app::{App, shell};

    let conf = get_configuration(None).expect("leptos configuration");
    let addr = conf.leptos_options.site_addr;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(App);

    let app = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || shell(opts.clone())
        })
        .fallback(leptos_axum::file_and_error_handler(shell))
        .with_state(leptos_options);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("bind site address");
    leptos::logging::log!("listening on http://{addr}");
    axum::serve(listener, app.into_make_service())
        .await
        .expect("server run");
}

#[cfg(not(feature = "ssr"))]
fn main() {
    // Browser builds go through the `hydrate` entry in lib.rs.
}
