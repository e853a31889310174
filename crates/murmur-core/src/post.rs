//! The post record shared by the store and the board.

use serde::{Deserialize, Serialize};

use crate::digest::AuthorDigest;
use crate::types::PostId;

/// A single post: either a thread opener or a reply to one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Store-assigned id.
    pub id: PostId,
    /// The thread this post replies to; `None` for a thread opener.
    pub parent: Option<PostId>,
    /// Pseudonymous author digest for the thread this post belongs to.
    ///
    /// Always present for posts written through the board; nullable in
    /// storage so rows written by other tools still load.
    pub author: Option<AuthorDigest>,
    /// The message text, already trimmed.
    pub body: String,
    /// When the post was stored (Unix ms).
    pub posted_at: i64,
}

impl Post {
    /// Whether this post opens a thread.
    pub fn is_thread(&self) -> bool {
        self.parent.is_none()
    }

    /// Whether this post is a reply.
    pub fn is_reply(&self) -> bool {
        self.parent.is_some()
    }

    /// The id of the thread this post belongs to.
    pub fn thread_id(&self) -> PostId {
        self.parent.unwrap_or(self.id)
    }
}
