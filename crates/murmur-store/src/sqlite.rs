//! SQLite implementation of the Store trait.
//!
//! This is the primary storage backend for Murmur. It uses rusqlite with
//! bundled SQLite, wrapped in async via tokio::spawn_blocking.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use murmur_core::{AuthorDigest, Post, PostId};

use crate::error::{Result, StoreError};
use crate::migration;
use crate::traits::{AuthorFn, ReplyResult, Store};

const POST_COLUMNS: &str = "id, parent, author, body, posted_at";

/// SQLite-based store implementation.
///
/// Thread-safe via internal Mutex. All operations use spawn_blocking
/// to avoid blocking the async runtime.
pub struct SqliteStore {
    /// The SQLite connection, protected by a mutex.
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` against the connection on the blocking thread pool.
    async fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);

        tokio::task::spawn_blocking(move || {
            let mut conn = conn
                .lock()
                .map_err(|e| StoreError::Poisoned(e.to_string()))?;
            f(&mut *conn)
        })
        .await
        .map_err(|e| StoreError::Task(e.to_string()))?
    }
}

// Helper to convert a row to Post
fn row_to_post(row: &rusqlite::Row<'_>) -> rusqlite::Result<Post> {
    let author = row
        .get::<_, Option<Vec<u8>>>("author")?
        .map(|bytes| {
            AuthorDigest::try_from(bytes.as_slice())
                .map_err(|_| rusqlite::Error::InvalidColumnType(2, "author".into(), Type::Blob))
        })
        .transpose()?;

    Ok(Post {
        id: PostId::new(row.get("id")?),
        parent: row.get::<_, Option<i64>>("parent")?.map(PostId::new),
        author,
        body: row.get("body")?,
        posted_at: row.get("posted_at")?,
    })
}

#[async_trait]
impl Store for SqliteStore {
    async fn insert_thread(&self, body: &str, author: AuthorFn) -> Result<PostId> {
        let body = body.to_owned();

        self.with_conn(move |conn| {
            let tx = conn.transaction()?;

            tx.execute(
                "INSERT INTO posts (parent, author, body, posted_at) VALUES (NULL, NULL, ?1, ?2)",
                params![body, now_millis()],
            )?;
            let id = PostId::new(tx.last_insert_rowid());

            let digest = author(id);
            tx.execute(
                "UPDATE posts SET author = ?1 WHERE id = ?2",
                params![digest.as_bytes().as_slice(), id.get()],
            )?;

            tx.commit()?;
            debug!(%id, "inserted thread");
            Ok(id)
        })
        .await
    }

    async fn insert_reply(
        &self,
        parent: PostId,
        author: AuthorDigest,
        body: &str,
    ) -> Result<ReplyResult> {
        let body = body.to_owned();

        self.with_conn(move |conn| {
            let tx = conn.transaction()?;

            let parent_of_parent: Option<Option<i64>> = tx
                .query_row(
                    "SELECT parent FROM posts WHERE id = ?1",
                    params![parent.get()],
                    |row| row.get(0),
                )
                .optional()?;

            match parent_of_parent {
                None => return Ok(ReplyResult::ParentNotFound),
                Some(Some(_)) => return Ok(ReplyResult::ParentIsReply),
                Some(None) => {}
            }

            tx.execute(
                "INSERT INTO posts (parent, author, body, posted_at) VALUES (?1, ?2, ?3, ?4)",
                params![parent.get(), author.as_bytes().as_slice(), body, now_millis()],
            )?;
            let id = PostId::new(tx.last_insert_rowid());

            tx.commit()?;
            debug!(%id, %parent, "inserted reply");
            Ok(ReplyResult::Inserted(id))
        })
        .await
    }

    async fn get_post(&self, id: PostId) -> Result<Option<Post>> {
        self.with_conn(move |conn| {
            conn.query_row(
                &format!("SELECT {POST_COLUMNS} FROM posts WHERE id = ?1"),
                params![id.get()],
                row_to_post,
            )
            .optional()
            .map_err(StoreError::from)
        })
        .await
    }

    async fn list_threads(&self) -> Result<Vec<Post>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {POST_COLUMNS} FROM posts WHERE parent IS NULL ORDER BY id"
            ))?;

            let posts = stmt
                .query_map([], row_to_post)?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok(posts)
        })
        .await
    }

    async fn list_replies(&self, thread: PostId) -> Result<Vec<Post>> {
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {POST_COLUMNS} FROM posts WHERE parent = ?1 ORDER BY id"
            ))?;

            let posts = stmt
                .query_map(params![thread.get()], row_to_post)?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok(posts)
        })
        .await
    }

    async fn count_posts(&self) -> Result<u64> {
        self.with_conn(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM posts", [], |row| row.get(0))?;
            u64::try_from(count).map_err(|_| StoreError::InvalidData(format!("post count {count}")))
        })
        .await
    }
}

/// Get current time in milliseconds.
pub(crate) fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
