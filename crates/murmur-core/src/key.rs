//! Secret key material and the on-disk key store.
//!
//! Murmur keeps two independent 256-byte secrets: one keys author digests,
//! the other keys posting tickets. Each lives in its own flat file holding
//! exactly the raw bytes. A missing file is generated on first start; any
//! other I/O failure aborts startup.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use rand::rngs::OsRng;
use rand::RngCore;
use subtle::ConstantTimeEq;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::context::SecurityContext;
use crate::error::KeyError;

/// Length of a freshly generated secret key, in bytes.
pub const SECRET_KEY_LEN: usize = 256;

/// Default file name of the author key.
pub const DEFAULT_AUTHOR_KEY_PATH: &str = "author.key";

/// Default file name of the ticket key.
pub const DEFAULT_TICKET_KEY_PATH: &str = "ticket.key";

/// Long-lived secret key material.
///
/// Keys read from disk are used exactly as stored, whatever their length.
/// The bytes are wiped when the key is dropped.
pub struct SecretKey {
    bytes: Zeroizing<Vec<u8>>,
}

impl SecretKey {
    /// Wrap existing key bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Zeroizing::new(bytes),
        }
    }

    /// Generate a new key of [`SECRET_KEY_LEN`] bytes from the OS CSPRNG.
    pub fn generate() -> Result<Self, KeyError> {
        let mut bytes = Zeroizing::new(vec![0u8; SECRET_KEY_LEN]);
        OsRng
            .try_fill_bytes(bytes.as_mut_slice())
            .map_err(|e| KeyError::Entropy {
                len: SECRET_KEY_LEN,
                reason: e.to_string(),
            })?;
        Ok(Self { bytes })
    }

    /// Get the raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Length of the key in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the key is empty (only possible for a truncated key file).
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl PartialEq for SecretKey {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.as_bytes().ct_eq(other.as_bytes()))
    }
}

impl Eq for SecretKey {}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey({} bytes)", self.bytes.len())
    }
}

/// Locations of the two key files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPaths {
    /// File holding the author digest key.
    pub author: PathBuf,
    /// File holding the ticket key.
    pub ticket: PathBuf,
}

impl KeyPaths {
    /// Create key paths from two explicit locations.
    pub fn new(author: impl Into<PathBuf>, ticket: impl Into<PathBuf>) -> Self {
        Self {
            author: author.into(),
            ticket: ticket.into(),
        }
    }

    /// Both key files inside `dir`, under their default names.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(
            dir.join(DEFAULT_AUTHOR_KEY_PATH),
            dir.join(DEFAULT_TICKET_KEY_PATH),
        )
    }
}

impl Default for KeyPaths {
    fn default() -> Self {
        Self::new(DEFAULT_AUTHOR_KEY_PATH, DEFAULT_TICKET_KEY_PATH)
    }
}

/// Read the key stored at `path`, creating it if the file does not exist.
///
/// An existing file is returned unmodified: no length or format checks.
/// A missing file is filled with [`SECRET_KEY_LEN`] random bytes and created
/// readable and writable by the owner only.
pub fn load_or_create_key(path: impl AsRef<Path>) -> Result<SecretKey, KeyError> {
    let path = path.as_ref();

    match fs::read(path) {
        Ok(bytes) => {
            debug!(path = %path.display(), len = bytes.len(), "loaded secret key");
            Ok(SecretKey::from_bytes(bytes))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            let key = SecretKey::generate()?;
            write_key_file(path, key.as_bytes()).map_err(|source| KeyError::Write {
                path: path.to_path_buf(),
                source,
            })?;
            info!(path = %path.display(), "generated new secret key");
            Ok(key)
        }
        Err(source) => Err(KeyError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Load or create both keys and assemble the process-wide security context.
///
/// Call once at bootstrap, before accepting connections. The caller is
/// expected to abort on error.
pub fn initialize_security_keys(paths: &KeyPaths) -> Result<SecurityContext, KeyError> {
    if paths.author == paths.ticket {
        return Err(KeyError::SharedPath(paths.author.clone()));
    }

    let author = load_or_create_key(&paths.author)?;

    // The author file exists now; a ticket path resolving to it is the same file.
    let author_file = fs::canonicalize(&paths.author).map_err(|source| KeyError::Read {
        path: paths.author.clone(),
        source,
    })?;
    if fs::canonicalize(&paths.ticket).is_ok_and(|ticket_file| ticket_file == author_file) {
        return Err(KeyError::SharedPath(author_file));
    }

    let ticket = load_or_create_key(&paths.ticket)?;

    Ok(SecurityContext::new(author, ticket))
}

fn write_key_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
