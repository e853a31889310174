//! # Murmur
//!
//! The board service for Murmur, a minimal anonymous discussion board.
//!
//! ## Overview
//!
//! Visitors post threads and replies without accounts. Two mechanisms keep
//! this usable without any session state:
//!
//! - **Author digests**: every post carries a pseudonym derived from the
//!   poster's address and the thread id, so one person is recognisable
//!   within a thread but not across threads
//! - **Tickets**: every form carries a token derived from the address and
//!   user agent; a submission is accepted only if the token matches
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use murmur::{Board, BoardConfig, Posted};
//! use murmur::core::{initialize_security_keys, KeyPaths, RequestContext};
//! use murmur::store::SqliteStore;
//!
//! async fn example() {
//!     let keys = initialize_security_keys(&KeyPaths::default()).unwrap();
//!     let store = SqliteStore::open("murmur.db").unwrap();
//!     let board = Board::new(Arc::new(keys), store, BoardConfig::default());
//!
//!     let ctx = RequestContext::new("203.0.113.7", "curl/8.5.0");
//!     let ticket = board.issue_ticket(&ctx).to_base64();
//!
//!     let posted = board.submit(&ctx, "hello", &ticket, None).await.unwrap();
//!     assert!(matches!(posted, Posted::Thread(_)));
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `murmur::core` - keys, digests, posts
//! - `murmur::store` - storage abstraction and SQLite

pub mod board;
pub mod error;

// Re-export component crates
pub use murmur_core as core;
pub use murmur_store as store;

// Re-export main types for convenience
pub use board::{Board, BoardConfig, FrontPage, Posted, ThreadPage, ThreadView};
pub use error::{BoardError, Result};
