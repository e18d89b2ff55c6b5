//! Post and reply models.
//!
//! A post is a document that embeds its replies in insertion order. Replies
//! have no identity of their own and are addressed by position.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{BoardError, Result};

/// A reply embedded in a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    /// Name of the replier.
    pub replier: String,
    /// Reply body.
    pub reply_text: String,
    /// Reply creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Post document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Store-generated identifier.
    pub id: String,
    /// Name of the author.
    pub author: String,
    /// Post body.
    pub content: String,
    /// Replies in insertion order. Empty when there are none.
    pub replies: Vec<Reply>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last mutation.
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Build a freshly persisted post from validated input.
    pub fn new(id: impl Into<String>, new_post: NewPost, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            author: new_post.author,
            content: new_post.content,
            replies: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a reply and bump `updated_at`.
    pub fn push_reply(&mut self, new_reply: NewReply, now: DateTime<Utc>) {
        self.replies.push(Reply {
            replier: new_reply.replier,
            reply_text: new_reply.reply_text,
            created_at: now,
        });
        self.updated_at = now;
    }

    /// Replace the content and bump `updated_at`.
    pub fn set_content(&mut self, content: impl Into<String>, now: DateTime<Utc>) {
        self.content = content.into();
        self.updated_at = now;
    }

    /// Remove the reply at `index`, keeping the order of the rest.
    ///
    /// Leaves the replies untouched when the index is out of range.
    pub fn remove_reply(&mut self, index: i64, now: DateTime<Utc>) -> Result<Reply> {
        let position = reply_position(index, self.replies.len())?;
        let removed = self.replies.remove(position);
        self.updated_at = now;
        Ok(removed)
    }
}

/// Resolve a client-supplied reply index against a reply count.
pub(crate) fn reply_position(index: i64, len: usize) -> Result<usize> {
    usize::try_from(index)
        .ok()
        .filter(|&i| i < len)
        .ok_or(BoardError::InvalidIndex { index, len })
}

/// Data for creating a new post.
#[derive(Debug, Clone)]
pub struct NewPost {
    /// Name of the author.
    pub author: String,
    /// Post body.
    pub content: String,
}

impl NewPost {
    /// Create a new post with required fields.
    pub fn new(author: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            content: content.into(),
        }
    }

    /// Check that both fields are present.
    pub fn validate(&self) -> Result<()> {
        require_field("author", &self.author)?;
        require_field("content", &self.content)
    }
}

/// Data for appending a reply to a post.
#[derive(Debug, Clone)]
pub struct NewReply {
    /// Name of the replier.
    pub replier: String,
    /// Reply body.
    pub reply_text: String,
}

impl NewReply {
    /// Create a new reply with required fields.
    pub fn new(replier: impl Into<String>, reply_text: impl Into<String>) -> Self {
        Self {
            replier: replier.into(),
            reply_text: reply_text.into(),
        }
    }

    /// Check that both fields are present.
    pub fn validate(&self) -> Result<()> {
        require_field("replier", &self.replier)?;
        require_field("replyText", &self.reply_text)
    }
}

/// Reject a required field that is empty after trimming.
pub(crate) fn require_field(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BoardError::Validation(format!("{name} must not be empty")));
    }
    Ok(())
}
