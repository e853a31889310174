//! Keyed SHA-256 derivations: author digests and posting tickets.
//!
//! Both derivations hash the secret key followed by request context, with
//! no separators or length prefixes between segments:
//!
//! ```text
//! author_digest = SHA-256(author_key ‖ source_address ‖ be_u64(thread_id))
//! ticket        = SHA-256(ticket_key ‖ source_address ‖ user_agent)
//! ```
//!
//! The ticket layout admits collisions between (address, user agent) pairs
//! whose concatenations are equal, e.g. ("1.2.3.4", "5x") and ("1.2.3.45",
//! "x"). The layout is kept as is so tickets stay bit-compatible across
//! deployments.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use subtle::ConstantTimeEq;

use crate::error::TicketError;
use crate::key::SecretKey;
use crate::types::PostId;

/// Length of every derived digest, in bytes.
pub const DIGEST_LEN: usize = 32;

/// Per-thread pseudonymous author identity.
///
/// The same source address posting in the same thread always gets the same
/// digest; the same address in another thread gets an unrelated one.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthorDigest(pub [u8; DIGEST_LEN]);

impl AuthorDigest {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Standard base64 encoding, as shown next to posts.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.0)
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for AuthorDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuthorDigest({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for AuthorDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base64())
    }
}

impl AsRef<[u8]> for AuthorDigest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; DIGEST_LEN]> for AuthorDigest {
    fn from(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for AuthorDigest {
    type Error = std::array::TryFromSliceError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; DIGEST_LEN] = slice.try_into()?;
        Ok(Self(arr))
    }
}

/// Stateless posting token bound to a client's address and user agent.
///
/// Embedded in every rendered form and recomputed when the form comes back.
/// It never expires on its own; it changes only when the address, user
/// agent, or ticket key changes.
#[derive(Clone, Copy, Serialize, Deserialize)]
pub struct Ticket(pub [u8; DIGEST_LEN]);

impl Ticket {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Standard base64 encoding, as embedded in HTML forms.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.0)
    }

    /// Parse the textual form submitted by a client.
    pub fn from_base64(s: &str) -> Result<Self, TicketError> {
        let bytes = STANDARD.decode(s).map_err(|_| TicketError::Malformed)?;
        let arr: [u8; DIGEST_LEN] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| TicketError::Malformed)?;
        Ok(Self(arr))
    }

    /// Check a submitted ticket against this (freshly derived) one.
    pub fn verify(&self, submitted: &str) -> Result<(), TicketError> {
        let submitted = Self::from_base64(submitted)?;
        if bool::from(self.0[..].ct_eq(&submitted.0[..])) {
            Ok(())
        } else {
            Err(TicketError::Mismatch)
        }
    }
}

impl PartialEq for Ticket {
    fn eq(&self, other: &Self) -> bool {
        self.0[..].ct_eq(&other.0[..]).into()
    }
}

impl Eq for Ticket {}

impl fmt::Debug for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ticket({}...)", &hex::encode(self.0)[..8])
    }
}

/// Derive the author digest for `source_address` posting in `thread`.
pub fn derive_author_digest(key: &SecretKey, source_address: &str, thread: PostId) -> AuthorDigest {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hasher.update(source_address.as_bytes());
    hasher.update(thread.to_be_bytes());
    AuthorDigest(hasher.finalize().into())
}

/// Derive the posting ticket for a client.
pub fn derive_ticket(key: &SecretKey, source_address: &str, user_agent: &str) -> Ticket {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hasher.update(source_address.as_bytes());
    hasher.update(user_agent.as_bytes());
    Ticket(hasher.finalize().into())
}
