//! # Murmur Core
//!
//! Pure primitives for the Murmur board: secret keys, per-thread author
//! digests, and posting tickets.
//!
//! Apart from the one-shot key file bootstrap in [`key`], this crate performs
//! no I/O, no storage, no networking. Digest derivation is pure computation
//! over an immutable [`SecurityContext`].
//!
//! ## Key Types
//!
//! - [`SecretKey`] - 256 bytes of long-lived key material
//! - [`SecurityContext`] - The author key and ticket key, built once at startup
//! - [`AuthorDigest`] - Per-thread pseudonym: SHA-256(author key ‖ address ‖ thread id)
//! - [`Ticket`] - Stateless posting token: SHA-256(ticket key ‖ address ‖ user agent)
//! - [`PostId`] - Store-assigned post identifier
//!
//! ## Bootstrap
//!
//! ```rust,no_run
//! use murmur_core::{initialize_security_keys, KeyPaths, RequestContext};
//!
//! let keys = initialize_security_keys(&KeyPaths::default()).unwrap();
//! let ctx = RequestContext::new("203.0.113.7", "Mozilla/5.0");
//! let ticket = keys.ticket(&ctx);
//! assert!(keys.verify_ticket(&ctx, &ticket.to_base64()).is_ok());
//! ```

pub mod context;
pub mod digest;
pub mod error;
pub mod key;
pub mod post;
pub mod types;

pub use context::{RequestContext, SecurityContext};
pub use digest::{derive_author_digest, derive_ticket, AuthorDigest, Ticket, DIGEST_LEN};
pub use error::{KeyError, TicketError};
pub use key::{initialize_security_keys, load_or_create_key, KeyPaths, SecretKey, SECRET_KEY_LEN};
pub use post::Post;
pub use types::PostId;
