//! Token store trait and the signed cookie backend.

use crate::config::StoreConfig;
use crate::cookie::{Cookie, find_cookie};
use crate::error::{CsrfError, Result};
use crate::token::{TOKEN_LENGTH, Token};
use armature_securecookie::{AuthenticatedCodec, SecureCookie};
use chrono::{DateTime, Duration, Utc};
use http::header::{HeaderMap, SET_COOKIE};
use std::sync::Arc;
use tracing::trace;

/// Storage for the per-session CSRF token.
///
/// `get` locates the caller's token from the inbound request headers and
/// `save` persists a token by writing to the outbound response headers.
/// Implementations hold no per-request state and are shared between
/// concurrent requests.
pub trait TokenStore: Send + Sync {
    /// Return the stored token.
    ///
    /// Fails with [`CsrfError::NotFound`] when the request carries no token
    /// and [`CsrfError::InvalidToken`] when one is present but cannot be
    /// recovered.
    fn get(&self, request: &HeaderMap) -> Result<Token>;

    /// Persist `token`, writing whatever the client must send back.
    fn save(&self, token: &Token, response: &mut HeaderMap) -> Result<()>;
}

impl<S: TokenStore + ?Sized> TokenStore for Arc<S> {
    fn get(&self, request: &HeaderMap) -> Result<Token> {
        (**self).get(request)
    }

    fn save(&self, token: &Token, response: &mut HeaderMap) -> Result<()> {
        (**self).save(token, response)
    }
}

impl<S: TokenStore + ?Sized> TokenStore for Box<S> {
    fn get(&self, request: &HeaderMap) -> Result<Token> {
        (**self).get(request)
    }

    fn save(&self, token: &Token, response: &mut HeaderMap) -> Result<()> {
        (**self).save(token, response)
    }
}

impl<S: TokenStore + ?Sized> TokenStore for &S {
    fn get(&self, request: &HeaderMap) -> Result<Token> {
        (**self).get(request)
    }

    fn save(&self, token: &Token, response: &mut HeaderMap) -> Result<()> {
        (**self).save(token, response)
    }
}

/// Signed cookie token store.
///
/// The token lives entirely in a client-held cookie whose value is produced
/// by an [`AuthenticatedCodec`] keyed by the cookie name.
///
/// # Examples
///
/// ```
/// use armature_csrf::{CookieStore, StoreConfig, Token, TokenStore};
/// use http::header::{COOKIE, HeaderMap, SET_COOKIE};
///
/// let store = CookieStore::from_keys(
///     StoreConfig::default(),
///     b"test_secret_key_32_bytes_long!!!".to_vec(),
///     None,
/// )
/// .unwrap();
///
/// let token = Token::from([9u8; 32]);
/// let mut response = HeaderMap::new();
/// store.save(&token, &mut response).unwrap();
///
/// // Echo the cookie back the way a browser would
/// let set_cookie = response[SET_COOKIE].to_str().unwrap();
/// let pair = set_cookie.split(';').next().unwrap();
/// let mut request = HeaderMap::new();
/// request.insert(COOKIE, pair.parse().unwrap());
///
/// assert_eq!(store.get(&request).unwrap(), token);
/// ```
#[derive(Debug, Clone)]
pub struct CookieStore<C = SecureCookie> {
    config: Arc<StoreConfig>,
    codec: C,
}

impl<C: AuthenticatedCodec> CookieStore<C> {
    /// Create a store from a configuration and a codec.
    pub fn new(config: StoreConfig, codec: C) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config: Arc::new(config),
            codec,
        })
    }

    /// Store configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Encode `token` and build the cookie that [`save`](TokenStore::save)
    /// would write.
    pub fn build_cookie(&self, token: &Token) -> Result<Cookie> {
        self.build_cookie_at(token, Utc::now())
    }

    fn build_cookie_at(&self, token: &Token, now: DateTime<Utc>) -> Result<Cookie> {
        let config = &self.config;

        let value = self
            .codec
            .encode(&config.cookie_name, token.as_bytes())
            .map_err(|e| CsrfError::EncodingFailure(e.to_string()))?;

        Ok(Cookie {
            name: config.cookie_name.clone(),
            value,
            max_age: config.max_age,
            expires: expires_at(now, config.max_age)?,
            path: config.cookie_path.clone(),
            domain: config.cookie_domain.clone(),
            secure: config.cookie_secure,
            http_only: config.cookie_http_only,
            same_site: config.cookie_same_site,
        })
    }
}

impl CookieStore<SecureCookie> {
    /// Create a store backed by [`SecureCookie`].
    ///
    /// The codec's own age check follows `config.max_age`, so a value older
    /// than the cookie lifetime is rejected even if the client keeps it.
    pub fn from_keys(
        config: StoreConfig,
        hash_key: impl Into<Vec<u8>>,
        block_key: Option<&[u8]>,
    ) -> Result<Self> {
        let mut codec = SecureCookie::new(hash_key)
            .map_err(|e| CsrfError::Config(e.to_string()))?
            .with_max_age(config.max_age);

        if let Some(block_key) = block_key {
            codec = codec
                .with_block_key(block_key)
                .map_err(|e| CsrfError::Config(e.to_string()))?;
        }

        Self::new(config, codec)
    }
}

impl<C: AuthenticatedCodec> TokenStore for CookieStore<C> {
    fn get(&self, request: &HeaderMap) -> Result<Token> {
        let name = &self.config.cookie_name;

        let value = match find_cookie(request, name) {
            Ok(Some(value)) => value,
            Ok(None) => {
                trace!(cookie = %name, "CSRF cookie not present");
                return Err(CsrfError::NotFound);
            }
            Err(e) => {
                trace!(cookie = %name, "CSRF cookie rejected");
                return Err(e);
            }
        };

        // Decode failures are folded into a single error on purpose.
        let token = self
            .codec
            .decode(name, &value, TOKEN_LENGTH)
            .ok()
            .and_then(|bytes| Token::from_bytes(&bytes));

        match token {
            Some(token) => Ok(token),
            None => {
                trace!(cookie = %name, "CSRF cookie rejected");
                Err(CsrfError::InvalidToken)
            }
        }
    }

    fn save(&self, token: &Token, response: &mut HeaderMap) -> Result<()> {
        let cookie = self.build_cookie(token)?;
        response.append(SET_COOKIE, cookie.to_header()?);

        trace!(
            cookie = %cookie.name,
            max_age = cookie.max_age,
            "CSRF cookie written"
        );

        Ok(())
    }
}

/// Explicit `Expires` for a cookie with the given lifetime.
///
/// Zero or negative lifetimes get a fixed instant in the past.
fn expires_at(now: DateTime<Utc>, max_age: i64) -> Result<DateTime<Utc>> {
    if max_age <= 0 {
        return Ok(DateTime::from_timestamp(1, 0).unwrap_or_default());
    }

    Duration::try_seconds(max_age)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or_else(|| CsrfError::EncodingFailure(format!("max-age {} out of range", max_age)))
}
