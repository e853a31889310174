//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::Arc;

use murmur::{Board, BoardConfig, BoardError, Posted};
use murmur_core::{PostId, RequestContext, SecretKey, SecurityContext, SECRET_KEY_LEN};
use murmur_store::MemoryStore;

/// A board over a memory store with fixed keys.
pub struct TestBoard {
    pub board: Arc<Board<MemoryStore>>,
}

impl TestBoard {
    /// Create a board whose author key is all `0x01` and ticket key all `0x02`.
    pub fn new() -> Self {
        Self::with_keys(0x01, 0x02)
    }

    /// Create a board with keys filled with the given bytes.
    pub fn with_keys(author_byte: u8, ticket_byte: u8) -> Self {
        let keys = SecurityContext::new(
            SecretKey::from_bytes(vec![author_byte; SECRET_KEY_LEN]),
            SecretKey::from_bytes(vec![ticket_byte; SECRET_KEY_LEN]),
        );
        Self {
            board: Arc::new(Board::new(
                Arc::new(keys),
                MemoryStore::new(),
                BoardConfig::default(),
            )),
        }
    }

    /// The ticket a client with `ctx` would find in its form.
    pub fn ticket(&self, ctx: &RequestContext) -> String {
        self.board.issue_ticket(ctx).to_base64()
    }

    /// Open a thread as `ctx`, with a valid ticket.
    pub async fn open_thread(&self, ctx: &RequestContext, body: &str) -> Result<PostId, BoardError> {
        match self.board.submit(ctx, body, &self.ticket(ctx), None).await? {
            Posted::Thread(id) => Ok(id),
            Posted::Reply { thread, .. } => Err(BoardError::InvalidParent(thread)),
        }
    }

    /// Reply to `thread` as `ctx`, with a valid ticket.
    pub async fn reply(
        &self,
        ctx: &RequestContext,
        thread: PostId,
        body: &str,
    ) -> Result<PostId, BoardError> {
        let parent = thread.to_string();
        match self
            .board
            .submit(ctx, body, &self.ticket(ctx), Some(&parent))
            .await?
        {
            Posted::Reply { id, .. } => Ok(id),
            Posted::Thread(id) => Err(BoardError::InvalidParent(id)),
        }
    }
}

impl Default for TestBoard {
    fn default() -> Self {
        Self::new()
    }
}

/// A browser-like client at a documentation address (RFC 5737).
pub fn client(n: u8) -> RequestContext {
    RequestContext::new(
        format!("192.0.2.{}", n),
        "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0",
    )
}

/// Distinct clients for multi-party tests.
pub fn clients(count: u8) -> Vec<RequestContext> {
    (1..=count).map(client).collect()
}
