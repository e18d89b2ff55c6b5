//! Resource store interface for post documents.

use async_trait::async_trait;

use super::post::{NewPost, NewReply, Post};
use crate::Result;

/// Document store holding posts and their embedded replies.
///
/// Every mutation of a single post is applied against the current stored
/// state, so concurrent writers to the same post never lose each other's
/// updates. Operations on different posts need no coordination.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Returns the name of the store backend.
    fn backend_name(&self) -> &'static str;

    /// Persist a new post with an empty reply list.
    async fn create_post(&self, new_post: NewPost) -> Result<Post>;

    /// List every post in store order.
    async fn list_posts(&self) -> Result<Vec<Post>>;

    /// Get a post by ID.
    async fn get_post(&self, id: &str) -> Result<Post>;

    /// Append a reply and return the updated post.
    async fn add_reply(&self, post_id: &str, new_reply: NewReply) -> Result<Post>;

    /// Replace the content of a post and return the updated post.
    async fn update_post_content(&self, post_id: &str, content: &str) -> Result<Post>;

    /// Delete a post together with its replies.
    async fn delete_post(&self, id: &str) -> Result<()>;

    /// Remove the reply at `reply_index` and return the updated post.
    async fn delete_reply(&self, post_id: &str, reply_index: i64) -> Result<Post>;

    /// Release backend resources.
    async fn close(&self) {}
}
