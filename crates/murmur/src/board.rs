//! The Board: posting and page queries for the Murmur system.
//!
//! The Board brings together the security keys and the post store. It is
//! shared by reference across request handlers and holds no per-request
//! state: tickets and author digests are re-derived for every request.

use std::sync::Arc;

use murmur_core::{Post, PostId, RequestContext, SecurityContext, Ticket};
use murmur_store::{ReplyResult, Store};
use tracing::{debug, info, warn};

use crate::error::{BoardError, Result};

/// Configuration for the Board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    /// Site name shown in page titles and headers.
    pub site_name: String,
    /// One-line slogan shown under the site name.
    pub slogan: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            site_name: "murmur".to_string(),
            slogan: "say something".to_string(),
        }
    }
}

/// Everything needed to render the front page.
#[derive(Debug, Clone)]
pub struct FrontPage {
    /// Thread openers, newest first.
    pub threads: Vec<Post>,
    /// Ticket for the posting form.
    pub ticket: Ticket,
}

/// A thread with its replies.
#[derive(Debug, Clone)]
pub struct ThreadPage {
    /// The thread opener.
    pub thread: Post,
    /// Replies in ascending id order.
    pub replies: Vec<Post>,
    /// Ticket for the reply form.
    pub ticket: Ticket,
}

impl ThreadPage {
    /// Whether `post` was written from the same address as the thread opener.
    pub fn is_opener(&self, post: &Post) -> bool {
        post.author.is_some() && post.author == self.thread.author
    }
}

/// Result of looking up a post by id for display.
#[derive(Debug, Clone)]
pub enum ThreadView {
    /// The id names a thread opener.
    Thread(ThreadPage),
    /// The id names a reply; it is shown inside its thread.
    Redirect { thread: PostId, post: PostId },
}

/// Result of a successful submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Posted {
    /// A new thread was created.
    Thread(PostId),
    /// A reply was added to `thread`.
    Reply { thread: PostId, id: PostId },
}

/// The main Board struct.
pub struct Board<S: Store> {
    /// Author and ticket keys.
    keys: Arc<SecurityContext>,
    /// The storage backend.
    store: Arc<S>,
    /// Configuration.
    config: BoardConfig,
}

impl<S: Store> Board<S> {
    /// Create a new board instance.
    pub fn new(keys: Arc<SecurityContext>, store: S, config: BoardConfig) -> Self {
        Self {
            keys,
            store: Arc::new(store),
            config,
        }
    }

    /// Get the board configuration.
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get the security context.
    pub fn keys(&self) -> &SecurityContext {
        &self.keys
    }

    /// Derive the ticket a client must echo back when posting.
    pub fn issue_ticket(&self, ctx: &RequestContext) -> Ticket {
        self.keys.ticket(ctx)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// All threads, newest first, with a ticket for the posting form.
    pub async fn front_page(&self, ctx: &RequestContext) -> Result<FrontPage> {
        let mut threads = self.store.list_threads().await?;
        threads.reverse();

        Ok(FrontPage {
            threads,
            ticket: self.issue_ticket(ctx),
        })
    }

    /// Look up a post for display.
    pub async fn thread_page(&self, id: PostId, ctx: &RequestContext) -> Result<ThreadView> {
        let post = self
            .store
            .get_post(id)
            .await?
            .ok_or(BoardError::PostNotFound(id))?;

        if let Some(thread) = post.parent {
            return Ok(ThreadView::Redirect { thread, post: id });
        }

        let replies = self.store.list_replies(id).await?;
        Ok(ThreadView::Thread(ThreadPage {
            thread: post,
            replies,
            ticket: self.issue_ticket(ctx),
        }))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Posting
    // ─────────────────────────────────────────────────────────────────────────

    /// Submit a new thread or reply.
    ///
    /// Checks run in order: body, ticket, parent. Nothing is written unless
    /// all of them pass.
    pub async fn submit(
        &self,
        ctx: &RequestContext,
        comment: &str,
        ticket: &str,
        parent: Option<&str>,
    ) -> Result<Posted> {
        let body = comment.trim();
        if body.is_empty() {
            return Err(BoardError::EmptyBody);
        }

        if let Err(e) = self.keys.verify_ticket(ctx, ticket) {
            warn!(error = %e, "rejected post with invalid ticket");
            return Err(BoardError::InvalidTicket(e));
        }

        match parent {
            Some(raw) => {
                let parent: PostId = raw.parse().map_err(BoardError::MalformedParent)?;
                self.reply(ctx, parent, body).await
            }
            None => self.open_thread(ctx, body).await,
        }
    }

    async fn open_thread(&self, ctx: &RequestContext, body: &str) -> Result<Posted> {
        let keys = Arc::clone(&self.keys);
        let ctx = ctx.clone();

        let id = self
            .store
            .insert_thread(body, Box::new(move |id| keys.author_digest(&ctx, id)))
            .await?;

        info!(%id, "thread created");
        Ok(Posted::Thread(id))
    }

    async fn reply(&self, ctx: &RequestContext, parent: PostId, body: &str) -> Result<Posted> {
        let author = self.keys.author_digest(ctx, parent);

        match self.store.insert_reply(parent, author, body).await? {
            ReplyResult::Inserted(id) => {
                info!(%id, thread = %parent, "reply created");
                Ok(Posted::Reply { thread: parent, id })
            }
            ReplyResult::ParentNotFound | ReplyResult::ParentIsReply => {
                debug!(%parent, "rejected reply to invalid parent");
                Err(BoardError::InvalidParent(parent))
            }
        }
    }
}
