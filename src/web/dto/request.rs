//! Request DTOs for Web API.
//!
//! Fields are optional at the serde level so that a missing field is
//! reported by validation as 400 instead of a deserialization rejection.

use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use super::validation::{into_result, require_text};
use crate::board::{NewPost, NewReply};

/// Create post request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    /// Author name.
    pub author: Option<String>,
    /// Post body.
    pub content: Option<String>,
}

impl Validate for CreatePostRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require_text(&mut errors, "author", self.author.as_deref());
        require_text(&mut errors, "content", self.content.as_deref());
        into_result(errors)
    }
}

impl From<CreatePostRequest> for NewPost {
    fn from(req: CreatePostRequest) -> Self {
        NewPost::new(req.author.unwrap_or_default(), req.content.unwrap_or_default())
    }
}

/// Add reply request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReplyRequest {
    /// Replier name.
    pub replier: Option<String>,
    /// Reply body.
    pub reply_text: Option<String>,
}

impl Validate for CreateReplyRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require_text(&mut errors, "replier", self.replier.as_deref());
        require_text(&mut errors, "replyText", self.reply_text.as_deref());
        into_result(errors)
    }
}

impl From<CreateReplyRequest> for NewReply {
    fn from(req: CreateReplyRequest) -> Self {
        NewReply::new(
            req.replier.unwrap_or_default(),
            req.reply_text.unwrap_or_default(),
        )
    }
}

/// Edit post request.
#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    /// New post body.
    pub content: Option<String>,
}

impl Validate for UpdatePostRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require_text(&mut errors, "content", self.content.as_deref());
        into_result(errors)
    }
}
