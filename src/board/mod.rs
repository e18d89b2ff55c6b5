//! Board module.
//!
//! This module provides the posting board data model and its storage:
//! - Posts with embedded, position-addressed replies
//! - The `PostStore` document-store interface
//! - In-memory and SQLite store implementations

mod memory;
mod post;
#[cfg(feature = "sqlite")]
mod post_repository;
mod store;

pub use memory::MemoryPostStore;
pub use post::{NewPost, NewReply, Post, Reply};
#[cfg(feature = "sqlite")]
pub use post_repository::SqlitePostStore;
pub use store::PostStore;

use std::sync::Arc;

use tracing::info;

use crate::config::{DatabaseConfig, StoreBackend};
#[cfg(feature = "sqlite")]
use crate::db::Database;
use crate::Result;

/// Shared handle to the configured post store.
pub type SharedStore = Arc<dyn PostStore>;

/// Construct the post store selected by the configuration.
///
/// Fails when the backing database cannot be opened.
pub async fn open_store(config: &DatabaseConfig) -> Result<SharedStore> {
    let store: SharedStore = match config.backend {
        StoreBackend::Memory => Arc::new(MemoryPostStore::new()),
        #[cfg(feature = "sqlite")]
        StoreBackend::Sqlite => Arc::new(SqlitePostStore::new(Database::open(&config.url).await?)),
        #[cfg(not(feature = "sqlite"))]
        StoreBackend::Sqlite => {
            return Err(crate::BoardError::Config(
                "sqlite backend requested but the sqlite feature is disabled".to_string(),
            ))
        }
    };
    info!("Post store ready (backend: {})", store.backend_name());
    Ok(store)
}
