//! SQLite-backed post store.
//!
//! Posts and replies live in two tables. Each mutation runs in its own
//! transaction and writes against the stored rows, never a stale copy.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;
use tracing::debug;
use uuid::Uuid;

use super::post::{require_field, NewPost, NewReply, Post, Reply};
use super::store::PostStore;
use crate::db::Database;
use crate::{BoardError, Result};

#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: String,
    author: String,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct ReplyRow {
    post_id: String,
    replier: String,
    reply_text: String,
    created_at: DateTime<Utc>,
}

impl PostRow {
    fn into_post(self, replies: Vec<Reply>) -> Post {
        Post {
            id: self.id,
            author: self.author,
            content: self.content,
            replies,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<ReplyRow> for Reply {
    fn from(row: ReplyRow) -> Self {
        Reply {
            replier: row.replier,
            reply_text: row.reply_text,
            created_at: row.created_at,
        }
    }
}

/// Post store persisted in SQLite.
#[derive(Debug, Clone)]
pub struct SqlitePostStore {
    db: Database,
}

impl SqlitePostStore {
    /// Create a new store over an opened database.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Get the underlying database.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Load a post and its replies on the given connection.
    async fn fetch_post(conn: &mut SqliteConnection, id: &str) -> Result<Post> {
        let row = sqlx::query_as::<_, PostRow>(
            "SELECT id, author, content, created_at, updated_at FROM posts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(BoardError::post_not_found)?;

        let replies = sqlx::query_as::<_, ReplyRow>(
            "SELECT post_id, replier, reply_text, created_at
             FROM replies WHERE post_id = $1 ORDER BY id ASC",
        )
        .bind(id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(row.into_post(replies.into_iter().map(Reply::from).collect()))
    }

    async fn touch(conn: &mut SqliteConnection, id: &str, now: DateTime<Utc>) -> Result<()> {
        sqlx::query("UPDATE posts SET updated_at = $2 WHERE id = $1")
            .bind(id)
            .bind(now)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl PostStore for SqlitePostStore {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn create_post(&self, new_post: NewPost) -> Result<Post> {
        new_post.validate()?;

        let id = Uuid::new_v4().simple().to_string();
        let now = Utc::now();
        sqlx::query(
            "INSERT INTO posts (id, author, content, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&id)
        .bind(&new_post.author)
        .bind(&new_post.content)
        .bind(now)
        .bind(now)
        .execute(self.db.pool())
        .await?;

        debug!(post_id = %id, "Inserted post");
        Ok(Post::new(id, new_post, now))
    }

    async fn list_posts(&self) -> Result<Vec<Post>> {
        let mut tx = self.db.pool().begin().await?;

        let rows = sqlx::query_as::<_, PostRow>(
            "SELECT id, author, content, created_at, updated_at FROM posts ORDER BY seq ASC",
        )
        .fetch_all(&mut *tx)
        .await?;

        let reply_rows = sqlx::query_as::<_, ReplyRow>(
            "SELECT post_id, replier, reply_text, created_at FROM replies ORDER BY id ASC",
        )
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        let mut replies: HashMap<String, Vec<Reply>> = HashMap::new();
        for row in reply_rows {
            replies.entry(row.post_id.clone()).or_default().push(row.into());
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let post_replies = replies.remove(&row.id).unwrap_or_default();
                row.into_post(post_replies)
            })
            .collect())
    }

    async fn get_post(&self, id: &str) -> Result<Post> {
        let mut tx = self.db.pool().begin().await?;
        let post = Self::fetch_post(&mut tx, id).await?;
        tx.commit().await?;
        Ok(post)
    }

    async fn add_reply(&self, post_id: &str, new_reply: NewReply) -> Result<Post> {
        new_reply.validate()?;

        let now = Utc::now();
        let mut tx = self.db.pool().begin().await?;

        // Inserts nothing when the post does not exist.
        let inserted = sqlx::query(
            "INSERT INTO replies (post_id, replier, reply_text, created_at)
             SELECT id, $2, $3, $4 FROM posts WHERE id = $1",
        )
        .bind(post_id)
        .bind(&new_reply.replier)
        .bind(&new_reply.reply_text)
        .bind(now)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if inserted == 0 {
            return Err(BoardError::post_not_found());
        }

        Self::touch(&mut tx, post_id, now).await?;
        let post = Self::fetch_post(&mut tx, post_id).await?;
        tx.commit().await?;
        Ok(post)
    }

    async fn update_post_content(&self, post_id: &str, content: &str) -> Result<Post> {
        require_field("content", content)?;

        let mut tx = self.db.pool().begin().await?;
        let updated = sqlx::query("UPDATE posts SET content = $2, updated_at = $3 WHERE id = $1")
            .bind(post_id)
            .bind(content)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if updated == 0 {
            return Err(BoardError::post_not_found());
        }

        let post = Self::fetch_post(&mut tx, post_id).await?;
        tx.commit().await?;
        Ok(post)
    }

    async fn delete_post(&self, id: &str) -> Result<()> {
        // Replies go with the post through ON DELETE CASCADE.
        let deleted = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(self.db.pool())
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(BoardError::post_not_found());
        }

        debug!(post_id = %id, "Deleted post");
        Ok(())
    }

    async fn delete_reply(&self, post_id: &str, reply_index: i64) -> Result<Post> {
        let mut tx = self.db.pool().begin().await?;

        // SQLite treats a negative OFFSET as zero, so only run the delete for
        // indexes that can match.
        let deleted = if reply_index >= 0 {
            sqlx::query(
                "DELETE FROM replies WHERE id = (
                     SELECT id FROM replies WHERE post_id = $1
                     ORDER BY id ASC LIMIT 1 OFFSET $2
                 )",
            )
            .bind(post_id)
            .bind(reply_index)
            .execute(&mut *tx)
            .await?
            .rows_affected()
        } else {
            0
        };

        if deleted == 0 {
            let post = Self::fetch_post(&mut tx, post_id).await?;
            return Err(BoardError::InvalidIndex {
                index: reply_index,
                len: post.replies.len(),
            });
        }

        Self::touch(&mut tx, post_id, Utc::now()).await?;
        let post = Self::fetch_post(&mut tx, post_id).await?;
        tx.commit().await?;
        Ok(post)
    }

    async fn close(&self) {
        self.db.close().await;
    }
}
