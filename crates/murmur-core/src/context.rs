//! The security context: both secret keys, bound to the derivations.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::digest::{derive_author_digest, derive_ticket, AuthorDigest, Ticket};
use crate::error::TicketError;
use crate::key::SecretKey;
use crate::types::PostId;

/// What the HTTP layer knows about the client making a request.
///
/// Both fields are taken verbatim from request headers; an absent header is
/// the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// The forwarded-for address, trusted as-is.
    pub source_address: String,
    /// The raw user agent.
    pub user_agent: String,
}

impl RequestContext {
    /// Create a request context.
    pub fn new(source_address: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            source_address: source_address.into(),
            user_agent: user_agent.into(),
        }
    }
}

/// The author key and ticket key, loaded once at startup.
///
/// Immutable after construction; share it behind an `Arc` and read it from
/// any number of request handlers concurrently.
pub struct SecurityContext {
    author_key: SecretKey,
    ticket_key: SecretKey,
}

impl SecurityContext {
    /// Build a context from two independent keys.
    pub fn new(author_key: SecretKey, ticket_key: SecretKey) -> Self {
        Self {
            author_key,
            ticket_key,
        }
    }

    /// The key used for author digests.
    pub fn author_key(&self) -> &SecretKey {
        &self.author_key
    }

    /// The key used for tickets.
    pub fn ticket_key(&self) -> &SecretKey {
        &self.ticket_key
    }

    /// Author digest for this client posting in `thread`.
    pub fn author_digest(&self, ctx: &RequestContext, thread: PostId) -> AuthorDigest {
        derive_author_digest(&self.author_key, &ctx.source_address, thread)
    }

    /// The ticket this client should be embedding in its forms.
    pub fn ticket(&self, ctx: &RequestContext) -> Ticket {
        derive_ticket(&self.ticket_key, &ctx.source_address, &ctx.user_agent)
    }

    /// Check a submitted ticket against the one derived for this client.
    pub fn verify_ticket(&self, ctx: &RequestContext, submitted: &str) -> Result<(), TicketError> {
        self.ticket(ctx).verify(submitted)
    }
}

impl fmt::Debug for SecurityContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityContext")
            .field("author_key", &self.author_key)
            .field("ticket_key", &self.ticket_key)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> SecurityContext {
        SecurityContext::new(
            SecretKey::from_bytes(vec![0x01; 256]),
            SecretKey::from_bytes(vec![0x02; 256]),
        )
    }

    #[test]
    fn test_keys_are_not_interchangeable() {
        let keys = context();
        let ctx = RequestContext::new("198.51.100.1", "");

        let digest = keys.author_digest(&ctx, PostId::new(0));
        let swapped = SecurityContext::new(
            SecretKey::from_bytes(vec![0x02; 256]),
            SecretKey::from_bytes(vec![0x01; 256]),
        );
        assert_ne!(digest, swapped.author_digest(&ctx, PostId::new(0)));
    }

    #[test]
    fn test_verify_ticket_for_same_client() {
        let keys = context();
        let ctx = RequestContext::new("198.51.100.1", "Mozilla/5.0");
        let ticket = keys.ticket(&ctx).to_base64();
        assert!(keys.verify_ticket(&ctx, &ticket).is_ok());
    }

    #[test]
    fn test_verify_ticket_rejects_other_client() {
        let keys = context();
        let alice = RequestContext::new("198.51.100.1", "Mozilla/5.0");
        let bob = RequestContext::new("198.51.100.2", "Mozilla/5.0");
        let other_agent = RequestContext::new("198.51.100.1", "curl/8.5.0");

        let ticket = keys.ticket(&alice).to_base64();
        assert_eq!(keys.verify_ticket(&bob, &ticket), Err(TicketError::Mismatch));
        assert_eq!(
            keys.verify_ticket(&other_agent, &ticket),
            Err(TicketError::Mismatch)
        );
    }

    #[test]
    fn test_ticket_ignores_author_key() {
        let keys = context();
        let rotated = SecurityContext::new(
            SecretKey::from_bytes(vec![0x09; 256]),
            SecretKey::from_bytes(vec![0x02; 256]),
        );
        let ctx = RequestContext::new("198.51.100.1", "Mozilla/5.0");
        assert_eq!(keys.ticket(&ctx), rotated.ticket(&ctx));
    }

    #[test]
    fn test_debug_hides_keys() {
        let debug = format!("{:?}", context());
        assert!(debug.contains("SecretKey(256 bytes)"));
        assert!(!debug.contains("[1, 1"));
    }
}
