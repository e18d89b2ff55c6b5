//! Postboard - a posting board REST backend.
//!
//! Clients create posts, attach replies, edit and delete posts, and delete
//! individual replies through a JSON API.

pub mod board;
pub mod config;
#[cfg(feature = "sqlite")]
pub mod db;
pub mod error;
pub mod logging;
pub mod web;

pub use board::{open_store, MemoryPostStore, NewPost, NewReply, Post, PostStore, Reply, SharedStore};
#[cfg(feature = "sqlite")]
pub use board::SqlitePostStore;
pub use config::Config;
pub use error::{BoardError, Result};
pub use web::WebServer;
