//! Post and reply handlers for Web API.
//!
//! Each handler validates its input, performs a single store operation and
//! maps the outcome to a response.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::board::Post;
use crate::web::dto::{
    CreatePostRequest, CreateReplyRequest, MessageResponse, UpdatePostRequest, ValidatedJson,
};
use crate::web::error::{ApiError, INVALID_REPLY_INDEX};
use crate::web::handlers::AppState;

const FAILED_TO_CREATE_POST: &str = "Failed to create post";
const FAILED_TO_FETCH_POSTS: &str = "Failed to fetch posts";
const FAILED_TO_FETCH_POST: &str = "Failed to fetch post";
const FAILED_TO_ADD_REPLY: &str = "Failed to add reply";
const FAILED_TO_UPDATE_POST: &str = "Failed to update post";
const FAILED_TO_DELETE_POST: &str = "Failed to delete post";
const FAILED_TO_DELETE_REPLY: &str = "Failed to delete reply";

/// Confirmation returned by a successful post deletion.
pub const POST_DELETED: &str = "Post deleted";

/// POST /api/posts - Create a new post.
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    let post = state
        .store
        .create_post(req.into())
        .await
        .map_err(|e| ApiError::from_board_error(e, FAILED_TO_CREATE_POST))?;

    tracing::info!(post_id = %post.id, author = %post.author, "Post created");
    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /api/posts - List all posts.
pub async fn list_posts(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Post>>, ApiError> {
    let posts = state
        .store
        .list_posts()
        .await
        .map_err(|e| ApiError::from_board_error(e, FAILED_TO_FETCH_POSTS))?;

    Ok(Json(posts))
}

/// GET /api/posts/:id - Get a single post.
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<String>,
) -> Result<Json<Post>, ApiError> {
    let post = state
        .store
        .get_post(&post_id)
        .await
        .map_err(|e| ApiError::from_board_error(e, FAILED_TO_FETCH_POST))?;

    Ok(Json(post))
}

/// POST /api/posts/:id/replies - Append a reply to a post.
pub async fn add_reply(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<String>,
    ValidatedJson(req): ValidatedJson<CreateReplyRequest>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    let post = state
        .store
        .add_reply(&post_id, req.into())
        .await
        .map_err(|e| ApiError::from_board_error(e, FAILED_TO_ADD_REPLY))?;

    tracing::info!(
        post_id = %post.id,
        reply_count = post.replies.len(),
        "Reply added"
    );
    Ok((StatusCode::CREATED, Json(post)))
}

/// PUT /api/posts/:id - Replace the content of a post.
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdatePostRequest>,
) -> Result<Json<Post>, ApiError> {
    let content = req.content.unwrap_or_default();
    let post = state
        .store
        .update_post_content(&post_id, &content)
        .await
        .map_err(|e| ApiError::from_board_error(e, FAILED_TO_UPDATE_POST))?;

    tracing::info!(post_id = %post.id, "Post updated");
    Ok(Json(post))
}

/// DELETE /api/posts/:id - Delete a post and its replies.
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .store
        .delete_post(&post_id)
        .await
        .map_err(|e| ApiError::from_board_error(e, FAILED_TO_DELETE_POST))?;

    tracing::info!(post_id = %post_id, "Post deleted");
    Ok(Json(MessageResponse::new(POST_DELETED)))
}

/// DELETE /api/posts/:id/replies/:reply_index - Remove a reply by position.
pub async fn delete_reply(
    State(state): State<Arc<AppState>>,
    Path((post_id, raw_index)): Path<(String, String)>,
) -> Result<Json<Post>, ApiError> {
    let reply_index = parse_reply_index(&raw_index)?;
    let post = state
        .store
        .delete_reply(&post_id, reply_index)
        .await
        .map_err(|e| ApiError::from_board_error(e, FAILED_TO_DELETE_REPLY))?;

    tracing::info!(post_id = %post.id, reply_index, "Reply deleted");
    Ok(Json(post))
}

/// Parse a reply index path segment. Range checks are left to the store.
fn parse_reply_index(raw: &str) -> Result<i64, ApiError> {
    raw.trim().parse::<i64>().map_err(|_| {
        ApiError::bad_request(INVALID_REPLY_INDEX)
            .with_details(format!("reply index is not an integer: {raw}"))
    })
}
