/**
 * Server Initialization
 *
 * This module builds the application: it picks the room store, assembles
 * `AppState` and hands it to the router.
 *
 * # Initialization Process
 *
 * 1. Load the optional PostgreSQL pool (running migrations)
 * 2. Use `PgRoomStore` when the pool is available, `MemoryRoomStore` otherwise
 * 3. Create the connection registry and notification bridge
 * 4. Create and configure the router
 */

use std::sync::Arc;

use axum::Router;

use crate::backend::chat::db::PgRoomStore;
use crate::backend::chat::memory::MemoryRoomStore;
use crate::backend::chat::store::SharedRoomStore;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;
use crate::shared::config::ServerConfig;

/// Create and configure the Axum application
pub async fn create_app(config: ServerConfig) -> Router<()> {
    tracing::info!("Initializing pairchat server");

    let db_pool = load_database(config.database_url.as_deref(), config.database_max_connections).await;

    let store: SharedRoomStore = match db_pool {
        Some(pool) => {
            tracing::info!("Using PostgreSQL room store");
            Arc::new(PgRoomStore::new(pool))
        }
        None => {
            tracing::info!("Using in-memory room store");
            Arc::new(MemoryRoomStore::new())
        }
    };

    create_app_with_store(store, config)
}

/// Create the application around an existing store
pub fn create_app_with_store(store: SharedRoomStore, config: ServerConfig) -> Router<()> {
    let app_state = AppState::new(store, config);
    let app = create_router(app_state);
    tracing::info!("Router configured");
    app
}
