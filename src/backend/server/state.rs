/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct serves as the central state container, holding:
 * - The active room store (PostgreSQL or in-memory)
 * - The connection registry shared by every realtime connection
 * - The notification bridge
 * - The server configuration
 *
 * Every field is a cheap handle; cloning `AppState` never copies data.
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::chat::store::SharedRoomStore;
use crate::backend::realtime::{ConnectionRegistry, NotificationBridge};
use crate::shared::config::ServerConfig;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Room store; atomicity of find-or-create and append lives here
    pub store: SharedRoomStore,

    /// Live connections with their identity and room groups
    pub registry: ConnectionRegistry,

    /// Fan-out hook for list refreshes and notifications
    pub notifications: NotificationBridge,

    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Build state around a store, with a fresh registry
    pub fn new(store: SharedRoomStore, config: ServerConfig) -> Self {
        let registry = ConnectionRegistry::new();
        Self {
            store,
            notifications: NotificationBridge::new(registry.clone()),
            registry,
            config: Arc::new(config),
        }
    }
}

impl FromRef<AppState> for SharedRoomStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.store.clone()
    }
}

impl FromRef<AppState> for ConnectionRegistry {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.registry.clone()
    }
}

impl FromRef<AppState> for NotificationBridge {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.notifications.clone()
    }
}

impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
