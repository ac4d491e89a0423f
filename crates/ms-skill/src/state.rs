//! Shared application state for the Axum server.

use std::sync::Arc;

use crate::router::IntentRouter;

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<IntentRouter>,
}

impl AppState {
    pub fn new(router: IntentRouter) -> Self {
        Self {
            router: Arc::new(router),
        }
    }
}
