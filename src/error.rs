//! Error types for the posting board.

use thiserror::Error;

/// Common error type for store and configuration operations.
#[derive(Error, Debug)]
pub enum BoardError {
    /// A required field is missing or empty.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Reply index outside the bounds of the reply list.
    #[error("reply index {index} out of range for {len} replies")]
    InvalidIndex {
        /// Requested index.
        index: i64,
        /// Number of replies at the time of the request.
        len: usize,
    },

    /// The store could not be reached.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// Database error.
    ///
    /// Any backend failure that is not a connectivity problem.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl BoardError {
    /// Shorthand for a missing post.
    pub fn post_not_found() -> Self {
        BoardError::NotFound("post".to_string())
    }
}

#[cfg(feature = "sqlite")]
impl From<sqlx::Error> for BoardError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                BoardError::StoreUnavailable(e.to_string())
            }
            _ => BoardError::Database(e.to_string()),
        }
    }
}

/// Result type alias for board operations.
pub type Result<T> = std::result::Result<T, BoardError>;
