use std::sync::Arc;

use crate::store::WasteStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Supabase in production; built once at startup and dropped on shutdown.
    pub store: Arc<dyn WasteStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn WasteStore>) -> Self {
        Self { store }
    }
}
