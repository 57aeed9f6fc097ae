//! # Armature Secure Cookie
//!
//! Authenticated encoding of cookie values.
//!
//! ## Features
//!
//! - **Signed values** - HMAC-SHA256 over name, timestamp and payload
//! - **Optional encryption** - ChaCha20-Poly1305 when a block key is set
//! - **Name binding** - values only decode under the cookie name they were issued for
//! - **Expiry** - optional maximum age enforced from the embedded timestamp
//!
//! ## Quick Start
//!
//! ```rust
//! use armature_securecookie::{AuthenticatedCodec, CodecError, SecureCookie};
//!
//! let codec = SecureCookie::new(b"test_secret_key_32_bytes_long!!!".to_vec())
//!     .unwrap()
//!     .with_max_age(3600);
//!
//! let value = codec.encode("csrf_token", &[1u8; 32]).unwrap();
//! assert_eq!(codec.decode("csrf_token", &value, 32).unwrap(), vec![1u8; 32]);
//!
//! // Wrong length is an error, never a truncated payload
//! assert!(matches!(
//!     codec.decode("csrf_token", &value, 16),
//!     Err(CodecError::Length { .. })
//! ));
//! ```

pub mod codec;
pub mod error;
pub mod secure_cookie;

pub use codec::AuthenticatedCodec;
pub use error::{CodecError, Result};
pub use secure_cookie::{
    BLOCK_KEY_LENGTH, DEFAULT_MAX_LENGTH, MAX_CLOCK_SKEW, MIN_HASH_KEY_LENGTH, SecureCookie,
};
