//! Test helpers for integration tests.
//!
//! Builds routers and stores for every available backend so each test can
//! assert the same behavior against all of them.

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use postboard::board::{MemoryPostStore, SharedStore};
use postboard::web::handlers::AppState;
use postboard::web::router::create_router;

/// A store under test, labelled for assertion messages.
pub struct NamedStore {
    pub name: &'static str,
    pub store: SharedStore,
}

/// Create one fresh store per backend.
pub async fn test_stores() -> Vec<NamedStore> {
    #[allow(unused_mut)]
    let mut stores = vec![NamedStore {
        name: "memory",
        store: Arc::new(MemoryPostStore::new()) as SharedStore,
    }];

    #[cfg(feature = "sqlite")]
    {
        let db = postboard::db::Database::open_in_memory()
            .await
            .expect("Failed to create test database");
        stores.push(NamedStore {
            name: "sqlite",
            store: Arc::new(postboard::SqlitePostStore::new(db)),
        });
    }

    stores
}

/// Create a test server over the given store.
pub fn create_test_server(store: SharedStore) -> TestServer {
    let app_state = Arc::new(AppState::new(store));
    let router = create_router(app_state, &[]);
    TestServer::new(router).expect("Failed to create test server")
}

/// Create one test server per backend.
pub async fn test_servers() -> Vec<(&'static str, TestServer)> {
    test_stores()
        .await
        .into_iter()
        .map(|named| (named.name, create_test_server(named.store)))
        .collect()
}
