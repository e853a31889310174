//! Error types for Murmur Core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or creating secret keys.
///
/// Every variant is fatal at startup: the board never serves requests
/// without both keys in memory.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("failed to read key file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write key file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to gather {len} random bytes: {reason}")]
    Entropy { len: usize, reason: String },

    #[error("author and ticket keys must use distinct files, both point at {0}")]
    SharedPath(PathBuf),
}

/// Reasons a submitted ticket is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TicketError {
    #[error("ticket is not valid base64")]
    Malformed,

    #[error("ticket does not match the requester")]
    Mismatch,
}
