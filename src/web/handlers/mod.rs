//! API handlers.

pub mod post;

pub use post::*;

use crate::board::SharedStore;

/// Application state shared by all handlers.
pub struct AppState {
    /// Post store.
    pub store: SharedStore,
}

impl AppState {
    /// Create a new application state.
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}
