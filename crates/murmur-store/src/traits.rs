//! Store trait: the abstract interface for post persistence.
//!
//! This trait allows the board to be storage-agnostic. Implementations
//! include SQLite (primary) and in-memory (for tests).

use async_trait::async_trait;
use murmur_core::{AuthorDigest, Post, PostId};

use crate::error::Result;

/// Computes a thread opener's author digest from its newly assigned id.
pub type AuthorFn = Box<dyn FnOnce(PostId) -> AuthorDigest + Send>;

/// Result of inserting a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyResult {
    /// Reply was stored under this id.
    Inserted(PostId),
    /// No post exists with the parent id.
    ParentNotFound,
    /// The parent exists but is itself a reply.
    ParentIsReply,
}

/// The Store trait: async interface for post persistence.
///
/// All methods are async to support both sync (SQLite) and async backends.
/// For SQLite, we use `spawn_blocking` internally to avoid blocking the runtime.
#[async_trait]
pub trait Store: Send + Sync {
    // ─────────────────────────────────────────────────────────────────────────
    // Write Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Insert a new thread opener.
    ///
    /// The id is assigned by the store; `author` is called with it and the
    /// returned digest is stored in the same transaction.
    async fn insert_thread(&self, body: &str, author: AuthorFn) -> Result<PostId>;

    /// Insert a reply to an existing thread.
    ///
    /// Nothing is written unless `parent` names a thread opener.
    async fn insert_reply(
        &self,
        parent: PostId,
        author: AuthorDigest,
        body: &str,
    ) -> Result<ReplyResult>;

    // ─────────────────────────────────────────────────────────────────────────
    // Read Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Get a post (thread or reply) by id.
    async fn get_post(&self, id: PostId) -> Result<Option<Post>>;

    /// All thread openers, oldest first.
    async fn list_threads(&self) -> Result<Vec<Post>>;

    /// All replies to `thread`, oldest first.
    async fn list_replies(&self, thread: PostId) -> Result<Vec<Post>>;

    /// Total number of stored posts.
    async fn count_posts(&self) -> Result<u64>;
}
