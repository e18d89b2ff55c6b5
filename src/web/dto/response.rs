//! Response DTOs for Web API.
//!
//! Posts are returned as-is; see [`crate::board::Post`].

use serde::Serialize;

/// Confirmation message response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Message text.
    pub message: String,
}

impl MessageResponse {
    /// Create a new message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
