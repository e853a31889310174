//! Golden test vectors for deterministic verification.
//!
//! These vectors pin the exact byte layout of author digests and tickets.
//! Digests already shown on a running board stay valid only as long as every
//! vector here keeps producing the same output.

use serde::Serialize;

use murmur_core::{derive_author_digest, derive_ticket, PostId, SecretKey, SECRET_KEY_LEN};

/// What a golden vector derives.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VectorInput {
    /// `derive_author_digest(key, address, thread)`.
    AuthorDigest {
        address: &'static str,
        thread: i64,
    },
    /// `derive_ticket(key, address, user_agent)`.
    Ticket {
        address: &'static str,
        user_agent: &'static str,
    },
}

/// A golden test vector.
#[derive(Debug, Clone, Serialize)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Every byte of the 256-byte key is set to this value.
    pub key_byte: u8,
    /// Inputs besides the key.
    pub input: VectorInput,
    /// Expected SHA-256 output (hex).
    pub expected: &'static str,
}

impl GoldenVector {
    /// The secret key this vector uses.
    pub fn key(&self) -> SecretKey {
        SecretKey::from_bytes(vec![self.key_byte; SECRET_KEY_LEN])
    }

    /// Compute the vector's output (hex).
    pub fn compute(&self) -> String {
        let key = self.key();
        match &self.input {
            VectorInput::AuthorDigest { address, thread } => {
                derive_author_digest(&key, address, PostId::new(*thread)).to_hex()
            }
            VectorInput::Ticket {
                address,
                user_agent,
            } => hex::encode(derive_ticket(&key, address, user_agent).as_bytes()),
        }
    }
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "author digest, zero key, loopback, thread 1",
            key_byte: 0x00,
            input: VectorInput::AuthorDigest {
                address: "127.0.0.1",
                thread: 1,
            },
            expected: "be1c49ad5348b09e406efa20a9921b218b4f7619002d5281dcf1659511724bea",
        },
        GoldenVector {
            name: "author digest, zero key, loopback, thread 2",
            key_byte: 0x00,
            input: VectorInput::AuthorDigest {
                address: "127.0.0.1",
                thread: 2,
            },
            expected: "bc2a781721ee6b082e395b39a0cfbee5432befe76f2ac20326c6223f479d275c",
        },
        GoldenVector {
            name: "author digest, 0x42 key, documentation address, thread 42",
            key_byte: 0x42,
            input: VectorInput::AuthorDigest {
                address: "203.0.113.7",
                thread: 42,
            },
            expected: "34b38f03c0603f0d962f10ac6827eca3318499ac0c7f66ddb4d73f468423af80",
        },
        GoldenVector {
            name: "author digest, zero key, empty address, thread 0",
            key_byte: 0x00,
            input: VectorInput::AuthorDigest {
                address: "",
                thread: 0,
            },
            expected: "44b8aa4d28701168922acf61435ea4bb442f97b0b14ad7a2510ed68874ee2a72",
        },
        GoldenVector {
            name: "author digest, zero key, loopback, thread -1",
            key_byte: 0x00,
            input: VectorInput::AuthorDigest {
                address: "127.0.0.1",
                thread: -1,
            },
            expected: "f4d7430f91a7ea04dc2e4e4aa67b8766021b6c8b6cd9afdc93c81c4e3a00336b",
        },
        GoldenVector {
            name: "ticket, zero key, loopback, browser",
            key_byte: 0x00,
            input: VectorInput::Ticket {
                address: "127.0.0.1",
                user_agent: "Mozilla/5.0",
            },
            expected: "1a6887faa70d5d9dc881b775900a7a5ec2b5d436cba40c0f6c0af96a6abbb353",
        },
        GoldenVector {
            name: "ticket, 0x42 key, documentation address, curl",
            key_byte: 0x42,
            input: VectorInput::Ticket {
                address: "203.0.113.7",
                user_agent: "curl/8.5.0",
            },
            expected: "cd4e6ff02fc3201c5e04f6a5cd029a48da3a05ee48ce975f95c1e433a1587b3e",
        },
        GoldenVector {
            name: "ticket, zero key, empty address and user agent",
            key_byte: 0x00,
            input: VectorInput::Ticket {
                address: "",
                user_agent: "",
            },
            expected: "5341e6b2646979a70e57653007a1f310169421ec9bdd9f1a5648f75ade005af1",
        },
    ]
}

/// Verify all golden vectors.
///
/// Returns `(name, matches, computed_hex)` for each vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let hex = v.compute();
            (v.name.to_string(), hex == v.expected, hex)
        })
        .collect()
}

/// All vectors as pretty-printed JSON, for checking other implementations.
pub fn vectors_json() -> serde_json::Result<String> {
    serde_json::to_string_pretty(&all_vectors())
}
