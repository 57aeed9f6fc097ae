//! # Armature CSRF Token Storage
//!
//! Pluggable storage for the per-session CSRF secret.
//!
//! ## Features
//!
//! - ✅ **Pluggable Stores** - [`TokenStore`] trait with `get`/`save`
//! - ✅ **Signed Cookies** - [`CookieStore`] keeps the token in a client-held cookie
//! - ✅ **Optional Encryption** - ChaCha20-Poly1305 via a block key
//! - ✅ **Configurable** - Cookie name, lifetime, path, domain and flags
//! - ✅ **Opaque Failures** - tampered, expired and corrupt cookies all report `InvalidToken`
//!
//! ## Quick Start
//!
//! ```rust
//! use armature_csrf::{CookieStore, CsrfError, StoreConfig, Token, TokenStore};
//! use http::HeaderMap;
//!
//! let config = StoreConfig::default()
//!     .with_cookie_name("_csrf")
//!     .with_max_age(3600);
//!
//! let store = CookieStore::from_keys(config, b"test_secret_key_32_bytes_long!!!".to_vec(), None)
//!     .unwrap();
//!
//! // No cookie yet: the caller issues a fresh token
//! let request = HeaderMap::new();
//! assert_eq!(store.get(&request), Err(CsrfError::NotFound));
//!
//! let mut response = HeaderMap::new();
//! store.save(&Token::from([0x5a; 32]), &mut response).unwrap();
//! assert!(response.contains_key(http::header::SET_COOKIE));
//! ```
//!
//! ## Usage in a Handler
//!
//! ```ignore
//! use armature_csrf::{CsrfError, Token, TokenStore};
//!
//! fn handle(store: &dyn TokenStore, request: &HeaderMap, response: &mut HeaderMap) -> Result<(), Error> {
//!     let token = match store.get(request) {
//!         Ok(token) => token,
//!         Err(CsrfError::NotFound | CsrfError::InvalidToken) => {
//!             let token = Token::from(generate_random_bytes());
//!             store.save(&token, response)?;
//!             token
//!         }
//!         Err(e) => return Err(e.into()),
//!     };
//!
//!     // Compare `token` with the value submitted in the form or header
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod cookie;
pub mod error;
pub mod store;
pub mod token;

pub use config::{DEFAULT_COOKIE_NAME, DEFAULT_MAX_AGE, SameSite, StoreConfig};
pub use crate::cookie::Cookie;
pub use error::{CsrfError, Result};
pub use store::{CookieStore, TokenStore};
pub use token::{TOKEN_LENGTH, Token};

pub use armature_securecookie::{AuthenticatedCodec, CodecError, SecureCookie};
