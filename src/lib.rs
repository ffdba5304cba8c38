pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod gate;
pub mod handlers;
pub mod middleware;
pub mod settings;
pub mod state;

use axum::{middleware::from_fn_with_state, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router. `main` calls this with state built
/// from the environment; tests call it with an in-memory store and a known
/// secret.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(page_routes())
        .merge(settings_routes(state.clone()))
        .merge(auth_routes(state.clone()))
        .route("/health", get(handlers::health::health))
        // The gate wraps everything; bypass rules keep the admin surface,
        // the API namespace, and the maintenance page reachable.
        .layer(from_fn_with_state(state.clone(), middleware::maintenance_gate_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn page_routes() -> Router<AppState> {
    use handlers::pages;

    Router::new()
        .route("/", get(pages::home))
        .route("/Events", get(pages::events))
        .route("/Achievements", get(pages::achievements))
        .route("/Team", get(pages::team))
        .route("/Gallery", get(pages::gallery))
        .route("/News", get(pages::news))
        .route("/Admin", get(pages::admin))
        .route("/maintenance", get(pages::maintenance))
}

fn settings_routes(state: AppState) -> Router<AppState> {
    use axum::routing::post;
    use handlers::settings;

    Router::new()
        // Read is public: the gate and the admin UI both consult it, and it
        // exposes nothing beyond the flag itself.
        .route("/api/settings", get(settings::settings_get))
        // Write requires an admin session. The UI gating alone would leave
        // the mutation endpoint open to anyone who reads the client code.
        .route(
            "/api/settings",
            post(settings::settings_post)
                .layer(from_fn_with_state(state, middleware::admin_auth_middleware)),
        )
}

fn auth_routes(state: AppState) -> Router<AppState> {
    use axum::routing::{delete, post};
    use handlers::auth;

    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route(
            "/api/auth/session",
            get(auth::session_status)
                .layer(from_fn_with_state(state, middleware::admin_auth_middleware)),
        )
        .route("/api/auth/session", delete(auth::logout))
}
