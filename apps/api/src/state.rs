use std::sync::Arc;

use jobmatch::Engine;

use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Owns the catalog, the vector cache and the whitelist guard.
    pub engine: Arc<Engine>,
    pub config: Config,
}
