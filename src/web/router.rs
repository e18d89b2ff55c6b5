//! Router configuration for Web API.

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::error::ApiError;
use super::handlers::{
    add_reply, create_post, delete_post, delete_reply, get_post, list_posts, update_post,
    AppState,
};
use super::middleware::{create_cors_layer, security_headers};

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let post_routes = Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/:id", get(get_post).put(update_post).delete(delete_post))
        .route("/:id/replies", post(add_reply))
        .route("/:id/replies/:reply_index", delete(delete_reply));

    let api_routes = Router::new().nest("/posts", post_routes);

    Router::new()
        .nest("/api", api_routes)
        .fallback(fallback)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(security_headers)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

/// JSON 404 for unknown routes.
async fn fallback() -> ApiError {
    ApiError::not_found("Route not found")
}
