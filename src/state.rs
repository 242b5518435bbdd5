//! Shared application state for all routes.

use crate::store::ItemStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// The one store handle, built at startup and shared by every request.
    pub items: Arc<dyn ItemStore>,
}

impl AppState {
    pub fn new<S: ItemStore + 'static>(store: S) -> Self {
        AppState { items: Arc::new(store) }
    }
}
