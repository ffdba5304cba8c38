use std::sync::Arc;

use tower_http::cors::CorsLayer;

use sitegate::config;
use sitegate::database::{MemorySettingsStore, PgSettingsStore, SettingsStore};
use sitegate::state::AppState;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, ADMIN_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting sitegate in {:?} mode", config.environment);

    if config.security.admin_secret.is_empty() {
        tracing::warn!("ADMIN_SECRET is not set; admin login is disabled");
    }

    // Durable store when DATABASE_URL is configured, in-memory otherwise.
    // The in-memory fallback keeps local development working without
    // Postgres, at the cost of losing the flag on restart.
    let store: Arc<dyn SettingsStore> = match std::env::var("DATABASE_URL") {
        Ok(_) => match PgSettingsStore::connect().await {
            Ok(store) => Arc::new(store),
            Err(e) => {
                tracing::error!("Failed to connect settings store: {}", e);
                std::process::exit(1);
            }
        },
        Err(_) => {
            tracing::warn!("DATABASE_URL not set; using in-memory settings store");
            Arc::new(MemorySettingsStore::new())
        }
    };

    let state = AppState::new(config, store);

    let mut app = sitegate::app(state);
    if config.server.enable_cors {
        app = app.layer(CorsLayer::permissive());
    }

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("sitegate listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
