use std::sync::Arc;

use crate::assets::PhotoStore;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: stockroom_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Local-disk store for uploaded photo assets.
    pub store: PhotoStore,
}
