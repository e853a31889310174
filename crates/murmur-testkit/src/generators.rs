//! Proptest generators for property-based testing.

use proptest::prelude::*;

use murmur_core::{PostId, RequestContext, SecretKey, SECRET_KEY_LEN};

/// Generate a random full-length secret key.
pub fn secret_key() -> impl Strategy<Value = SecretKey> {
    prop::collection::vec(any::<u8>(), SECRET_KEY_LEN).prop_map(SecretKey::from_bytes)
}

/// Generate a PostId as a store would hand it out.
pub fn post_id() -> impl Strategy<Value = PostId> {
    (1i64..=i64::MAX).prop_map(PostId::new)
}

/// Generate any PostId, including zero and negatives.
pub fn any_post_id() -> impl Strategy<Value = PostId> {
    any::<i64>().prop_map(PostId::new)
}

/// Generate an IPv4 address in dotted form.
fn ipv4() -> impl Strategy<Value = String> {
    any::<[u8; 4]>().prop_map(|[a, b, c, d]| format!("{}.{}.{}.{}", a, b, c, d))
}

/// Generate an IPv6 address in full, uncompressed form.
fn ipv6() -> impl Strategy<Value = String> {
    any::<[u16; 8]>().prop_map(|groups| {
        groups
            .iter()
            .map(|g| format!("{:x}", g))
            .collect::<Vec<_>>()
            .join(":")
    })
}

/// Generate an `X-Forwarded-For` value: empty, one address, or a proxy chain.
pub fn source_address() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        ipv4(),
        ipv6(),
        prop::collection::vec(ipv4(), 2..4).prop_map(|hops| hops.join(", ")),
    ]
}

/// Generate a user agent string.
pub fn user_agent() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("Mozilla/5.0".to_string()),
        "[a-zA-Z]{1,12}/[0-9]{1,2}\\.[0-9]{1,2}",
    ]
}

/// Generate a request context.
pub fn request_context() -> impl Strategy<Value = RequestContext> {
    (source_address(), user_agent()).prop_map(|(addr, ua)| RequestContext::new(addr, ua))
}

/// Generate a comment with at least one non-whitespace character.
pub fn comment() -> impl Strategy<Value = String> {
    "\\s{0,3}[^\\s]{1,40}\\s{0,3}"
}
