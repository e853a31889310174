//! # Murmur Testkit
//!
//! Testing utilities for Murmur.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known digest inputs with expected outputs
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: A ready-made board over an in-memory store
//!
//! ## Golden Vectors
//!
//! ```rust
//! use murmur_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, hex) in verify_all_vectors() {
//!     assert!(matches, "{}: {}", name, hex);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use murmur_core::derive_author_digest;
//! use murmur_testkit::generators::{post_id, secret_key, source_address};
//!
//! proptest! {
//!     #[test]
//!     fn digest_is_deterministic(key in secret_key(), addr in source_address(), id in post_id()) {
//!         prop_assert_eq!(
//!             derive_author_digest(&key, &addr, id),
//!             derive_author_digest(&key, &addr, id)
//!         );
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust,ignore
//! use murmur_testkit::fixtures::{client, TestBoard};
//!
//! let fixture = TestBoard::new();
//! let thread = fixture.open_thread(&client(1), "hello").await?;
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{client, clients, TestBoard};
pub use generators::{comment, request_context, secret_key, source_address, user_agent};
pub use vectors::{all_vectors, verify_all_vectors, vectors_json, GoldenVector, VectorInput};
