//! Authenticated codec trait.

use crate::error::Result;
use std::sync::Arc;

/// Tamper-evident encoding of byte payloads into cookie-safe strings.
///
/// Implementations bind every encoded value to the `name` it was produced
/// for, so a value issued for one cookie cannot be replayed under another.
///
/// # Examples
///
/// ```
/// use armature_securecookie::{AuthenticatedCodec, SecureCookie};
///
/// let codec = SecureCookie::new(b"an-example-hash-key-of-32-bytes!".to_vec()).unwrap();
///
/// let encoded = codec.encode("session", b"payload").unwrap();
/// let decoded = codec.decode("session", &encoded, 7).unwrap();
/// assert_eq!(decoded, b"payload");
///
/// assert!(codec.decode("other", &encoded, 7).is_err());
/// ```
pub trait AuthenticatedCodec: Send + Sync {
    /// Encode `payload` for the cookie called `name`.
    fn encode(&self, name: &str, payload: &[u8]) -> Result<String>;

    /// Decode a value previously produced by [`encode`](Self::encode) for
    /// `name`, requiring exactly `expected_len` payload bytes.
    fn decode(&self, name: &str, value: &str, expected_len: usize) -> Result<Vec<u8>>;
}

impl<C: AuthenticatedCodec + ?Sized> AuthenticatedCodec for Arc<C> {
    fn encode(&self, name: &str, payload: &[u8]) -> Result<String> {
        (**self).encode(name, payload)
    }

    fn decode(&self, name: &str, value: &str, expected_len: usize) -> Result<Vec<u8>> {
        (**self).decode(name, value, expected_len)
    }
}

impl<C: AuthenticatedCodec + ?Sized> AuthenticatedCodec for Box<C> {
    fn encode(&self, name: &str, payload: &[u8]) -> Result<String> {
        (**self).encode(name, payload)
    }

    fn decode(&self, name: &str, value: &str, expected_len: usize) -> Result<Vec<u8>> {
        (**self).decode(name, value, expected_len)
    }
}
