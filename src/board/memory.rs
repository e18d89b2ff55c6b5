//! In-memory document store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;
use uuid::Uuid;

use super::post::{require_field, NewPost, NewReply, Post};
use super::store::PostStore;
use crate::{BoardError, Result};

/// Stored document plus its tombstone flag.
#[derive(Debug)]
struct Document {
    post: Post,
    deleted: bool,
}

type DocumentRef = Arc<Mutex<Document>>;

#[derive(Debug, Default)]
struct Collection {
    documents: HashMap<String, DocumentRef>,
    /// IDs in insertion order.
    order: Vec<String>,
}

/// Post store kept in process memory.
///
/// The collection lock only guards membership. Each document has its own
/// lock, held for the whole read-modify-write of a mutation.
#[derive(Debug, Default)]
pub struct MemoryPostStore {
    collection: RwLock<Collection>,
}

impl MemoryPostStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    async fn document(&self, id: &str) -> Result<DocumentRef> {
        self.collection
            .read()
            .await
            .documents
            .get(id)
            .cloned()
            .ok_or_else(BoardError::post_not_found)
    }

    /// Run `f` against the live document under its lock.
    async fn mutate<F>(&self, id: &str, f: F) -> Result<Post>
    where
        F: FnOnce(&mut Post) -> Result<()> + Send,
    {
        let document = self.document(id).await?;
        let mut document = document.lock().await;
        if document.deleted {
            return Err(BoardError::post_not_found());
        }
        f(&mut document.post)?;
        Ok(document.post.clone())
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create_post(&self, new_post: NewPost) -> Result<Post> {
        new_post.validate()?;

        let id = Uuid::new_v4().simple().to_string();
        let post = Post::new(id.clone(), new_post, Utc::now());
        let document = Arc::new(Mutex::new(Document {
            post: post.clone(),
            deleted: false,
        }));

        let mut collection = self.collection.write().await;
        collection.documents.insert(id.clone(), document);
        collection.order.push(id);
        debug!(post_id = %post.id, "Stored post in memory");
        Ok(post)
    }

    async fn list_posts(&self) -> Result<Vec<Post>> {
        let documents: Vec<DocumentRef> = {
            let collection = self.collection.read().await;
            collection
                .order
                .iter()
                .filter_map(|id| collection.documents.get(id).cloned())
                .collect()
        };

        let mut posts = Vec::with_capacity(documents.len());
        for document in documents {
            let document = document.lock().await;
            if !document.deleted {
                posts.push(document.post.clone());
            }
        }
        Ok(posts)
    }

    async fn get_post(&self, id: &str) -> Result<Post> {
        let document = self.document(id).await?;
        let document = document.lock().await;
        if document.deleted {
            return Err(BoardError::post_not_found());
        }
        Ok(document.post.clone())
    }

    async fn add_reply(&self, post_id: &str, new_reply: NewReply) -> Result<Post> {
        new_reply.validate()?;
        self.mutate(post_id, |post| {
            post.push_reply(new_reply, Utc::now());
            Ok(())
        })
        .await
    }

    async fn update_post_content(&self, post_id: &str, content: &str) -> Result<Post> {
        require_field("content", content)?;
        self.mutate(post_id, |post| {
            post.set_content(content, Utc::now());
            Ok(())
        })
        .await
    }

    async fn delete_post(&self, id: &str) -> Result<()> {
        let document = self.document(id).await?;
        {
            let mut document = document.lock().await;
            if document.deleted {
                return Err(BoardError::post_not_found());
            }
            document.deleted = true;
        }

        let mut collection = self.collection.write().await;
        collection.documents.remove(id);
        collection.order.retain(|existing| existing != id);
        Ok(())
    }

    async fn delete_reply(&self, post_id: &str, reply_index: i64) -> Result<Post> {
        self.mutate(post_id, |post| {
            post.remove_reply(reply_index, Utc::now()).map(|_| ())
        })
        .await
    }
}
