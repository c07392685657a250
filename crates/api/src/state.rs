use std::sync::Arc;

use pvz_core::store::Stores;

use crate::config::ServerConfig;
use crate::metrics::Metrics;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: every field is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Persistence backends (PostgreSQL in production, in-memory in tests).
    pub stores: Stores,
    pub config: Arc<ServerConfig>,
    /// Prometheus registry and the series recorded against it.
    pub metrics: Arc<Metrics>,
}
