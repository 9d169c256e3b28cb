//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use crate::ai::Gateway;
use crate::config::Config;
use crate::entities::SqliteStore;

/// State shared across all HTTP handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Chat log plus the read-only user and health-progress tables.
    pub store: Arc<SqliteStore>,
    /// Language-model handle; may be unconfigured.
    pub gateway: Gateway,
}
