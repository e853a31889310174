//! In-memory implementation of the Store trait.
//!
//! This is primarily for testing. It has the same semantics as SQLite
//! but keeps everything in memory with no persistence.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use murmur_core::{AuthorDigest, Post, PostId};

use crate::error::{Result, StoreError};
use crate::sqlite::now_millis;
use crate::traits::{AuthorFn, ReplyResult, Store};

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock.
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

struct MemoryStoreInner {
    /// Posts indexed by id; iteration order is id order.
    posts: BTreeMap<PostId, Post>,

    /// Last id handed out. Ids start at 1 and are never reused.
    last_id: i64,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryStoreInner {
                posts: BTreeMap::new(),
                last_id: 0,
            }),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MemoryStoreInner>> {
        self.inner
            .read()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryStoreInner>> {
        self.inner
            .write()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStoreInner {
    fn next_id(&mut self) -> PostId {
        self.last_id += 1;
        PostId::new(self.last_id)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_thread(&self, body: &str, author: AuthorFn) -> Result<PostId> {
        let mut inner = self.write()?;
        let id = inner.next_id();

        inner.posts.insert(
            id,
            Post {
                id,
                parent: None,
                author: Some(author(id)),
                body: body.to_owned(),
                posted_at: now_millis(),
            },
        );

        Ok(id)
    }

    async fn insert_reply(
        &self,
        parent: PostId,
        author: AuthorDigest,
        body: &str,
    ) -> Result<ReplyResult> {
        let mut inner = self.write()?;

        match inner.posts.get(&parent) {
            None => return Ok(ReplyResult::ParentNotFound),
            Some(post) if post.is_reply() => return Ok(ReplyResult::ParentIsReply),
            Some(_) => {}
        }

        let id = inner.next_id();
        inner.posts.insert(
            id,
            Post {
                id,
                parent: Some(parent),
                author: Some(author),
                body: body.to_owned(),
                posted_at: now_millis(),
            },
        );

        Ok(ReplyResult::Inserted(id))
    }

    async fn get_post(&self, id: PostId) -> Result<Option<Post>> {
        let inner = self.read()?;
        Ok(inner.posts.get(&id).cloned())
    }

    async fn list_threads(&self) -> Result<Vec<Post>> {
        let inner = self.read()?;
        Ok(inner
            .posts
            .values()
            .filter(|p| p.is_thread())
            .cloned()
            .collect())
    }

    async fn list_replies(&self, thread: PostId) -> Result<Vec<Post>> {
        let inner = self.read()?;
        Ok(inner
            .posts
            .values()
            .filter(|p| p.parent == Some(thread))
            .cloned()
            .collect())
    }

    async fn count_posts(&self) -> Result<u64> {
        let inner = self.read()?;
        Ok(inner.posts.len() as u64)
    }
}
