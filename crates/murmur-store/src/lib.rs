//! # Murmur Store
//!
//! Storage abstraction for the Murmur board. Provides a trait-based
//! interface for post persistence with SQLite and in-memory implementations.
//!
//! ## Overview
//!
//! The store hides post persistence behind the [`Store`] trait so the board
//! is storage-agnostic. The primary implementation is [`SqliteStore`], with
//! [`MemoryStore`] for testing.
//!
//! The store never derives digests itself. It is handed an author digest
//! for replies, and a closure that maps the freshly assigned id to a digest
//! for thread openers (whose digest depends on their own id).
//!
//! ## Usage
//!
//! ```rust,no_run
//! use murmur_store::{SqliteStore, Store};
//! use murmur_core::AuthorDigest;
//!
//! async fn example() {
//!     let store = SqliteStore::open("murmur.db").unwrap();
//!
//!     let thread = store
//!         .insert_thread("first post", Box::new(|_id| AuthorDigest::from_bytes([0; 32])))
//!         .await
//!         .unwrap();
//!
//!     let threads = store.list_threads().await.unwrap();
//!     assert_eq!(threads[0].id, thread);
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Atomic thread creation**: the row and its author digest are written in
//!   one transaction, so no reader sees a thread without an author.
//! - **Flat threads**: replies attach only to thread openers, never to
//!   other replies.
//! - **Ids are never reused**: author digests are keyed by thread id.

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{AuthorFn, ReplyResult, Store};
