use std::sync::Arc;

use axum::http::HeaderValue;
use portfolio_core::DbLocation;

use super::config::Config;

/// Shared request state. Holds only the store location; connections are
/// opened per request.
pub struct AppState {
    pub database: DbLocation,
    pub frontend_origin: HeaderValue,
}

impl AppState {
    pub fn new(config: &Config) -> Arc<Self> {
        Arc::new(Self {
            database: config.database.clone(),
            frontend_origin: config.frontend_origin.clone(),
        })
    }
}
