//! Web API module.
//!
//! This module provides the REST API over the post store: JSON handlers,
//! CORS and security-header middleware, and the HTTP server.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
