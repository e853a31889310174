//! Error types for the board service.

use std::num::ParseIntError;

use murmur_core::{PostId, TicketError};
use murmur_store::StoreError;
use thiserror::Error;

/// Errors that can occur during board operations.
#[derive(Debug, Error)]
pub enum BoardError {
    /// The submitted comment was empty after trimming whitespace.
    #[error("missing message body")]
    EmptyBody,

    /// The submitted ticket does not match the one derived for the request.
    #[error("invalid ticket")]
    InvalidTicket(#[source] TicketError),

    /// The `parent` field was present but not an integer.
    #[error("malformed parent: {0}")]
    MalformedParent(#[source] ParseIntError),

    /// The parent does not exist or is not a thread opener.
    #[error("invalid parent: {0}")]
    InvalidParent(PostId),

    /// No post with this id.
    #[error("post not found: {0}")]
    PostNotFound(PostId),

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for board operations.
pub type Result<T> = std::result::Result<T, BoardError>;
