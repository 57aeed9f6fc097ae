use crate::codec::AuthenticatedCodec;
use crate::error::{CodecError, Result};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chacha20poly1305::{
    ChaCha20Poly1305, Nonce,
    aead::{Aead, KeyInit, Payload},
};
use chrono::Utc;
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

/// Minimum accepted length of the HMAC key.
pub const MIN_HASH_KEY_LENGTH: usize = 32;

/// Required length of the encryption key.
pub const BLOCK_KEY_LENGTH: usize = 32;

/// Default upper bound for an encoded value (browsers cap cookies near 4 KiB).
pub const DEFAULT_MAX_LENGTH: usize = 4096;

/// Seconds a timestamp may lie in the future before it is rejected.
pub const MAX_CLOCK_SKEW: i64 = 60;

const NONCE_LENGTH: usize = 12;

/// HMAC-SHA256 signed, optionally ChaCha20-Poly1305 encrypted cookie values.
///
/// An encoded value is the URL-safe base64 form of `timestamp|payload|mac`,
/// where the MAC covers the cookie name, the timestamp and the (possibly
/// encrypted) payload.
///
/// # Examples
///
/// ```
/// use armature_securecookie::{AuthenticatedCodec, SecureCookie};
///
/// let codec = SecureCookie::new(b"an-example-hash-key-of-32-bytes!".to_vec())
///     .unwrap()
///     .with_block_key(b"an-example-block-key-of-32-byte!")
///     .unwrap()
///     .with_max_age(3600);
///
/// let encoded = codec.encode("csrf_token", &[7u8; 32]).unwrap();
/// assert_eq!(codec.decode("csrf_token", &encoded, 32).unwrap(), vec![7u8; 32]);
/// ```
#[derive(Clone)]
pub struct SecureCookie {
    hash_key: Vec<u8>,
    block_key: Option<Vec<u8>>,
    max_age: i64,
    max_length: usize,
}

impl SecureCookie {
    /// Create a signing-only codec.
    ///
    /// The hash key must be at least [`MIN_HASH_KEY_LENGTH`] bytes.
    pub fn new(hash_key: impl Into<Vec<u8>>) -> Result<Self> {
        let hash_key = hash_key.into();
        if hash_key.len() < MIN_HASH_KEY_LENGTH {
            return Err(CodecError::InvalidKey(format!(
                "hash key must be at least {} bytes",
                MIN_HASH_KEY_LENGTH
            )));
        }

        Ok(Self {
            hash_key,
            block_key: None,
            max_age: 0,
            max_length: DEFAULT_MAX_LENGTH,
        })
    }

    /// Enable encryption with a [`BLOCK_KEY_LENGTH`]-byte key.
    pub fn with_block_key(mut self, block_key: &[u8]) -> Result<Self> {
        if block_key.len() != BLOCK_KEY_LENGTH {
            return Err(CodecError::InvalidKey(format!(
                "block key must be exactly {} bytes",
                BLOCK_KEY_LENGTH
            )));
        }
        self.block_key = Some(block_key.to_vec());
        Ok(self)
    }

    /// Reject values older than `seconds`. Zero or negative disables the check.
    pub fn with_max_age(mut self, seconds: i64) -> Self {
        self.max_age = seconds.max(0);
        self
    }

    /// Cap the encoded length. Zero disables the check.
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    /// Maximum accepted age in seconds (0 when disabled)
    pub fn max_age(&self) -> i64 {
        self.max_age
    }

    /// Whether payloads are encrypted
    pub fn is_encrypted(&self) -> bool {
        self.block_key.is_some()
    }

    pub(crate) fn encode_at(&self, name: &str, payload: &[u8], now: i64) -> Result<String> {
        let body = match self.block_key.as_deref() {
            Some(key) => encrypt(key, name, payload)?,
            None => payload.to_vec(),
        };

        let body = URL_SAFE_NO_PAD.encode(body);
        let timestamp = now.to_string();
        let mac = self.sign(name, timestamp.as_bytes(), body.as_bytes())?;

        let mut raw = Vec::with_capacity(timestamp.len() + body.len() + mac.len() + 2);
        raw.extend_from_slice(timestamp.as_bytes());
        raw.push(b'|');
        raw.extend_from_slice(body.as_bytes());
        raw.push(b'|');
        raw.extend_from_slice(&mac);

        let encoded = URL_SAFE_NO_PAD.encode(raw);
        self.check_length(encoded.len())?;
        Ok(encoded)
    }

    pub(crate) fn decode_at(
        &self,
        name: &str,
        value: &str,
        expected_len: usize,
        now: i64,
    ) -> Result<Vec<u8>> {
        self.check_length(value.len())?;

        let raw = URL_SAFE_NO_PAD
            .decode(value)
            .map_err(|e| CodecError::Decoding(e.to_string()))?;

        // The MAC is raw bytes and may itself contain '|', so split at most twice.
        let mut parts = raw.splitn(3, |&b| b == b'|');
        let (timestamp, body, mac) = match (parts.next(), parts.next(), parts.next()) {
            (Some(t), Some(b), Some(m)) => (t, b, m),
            _ => return Err(CodecError::Decoding("malformed value".to_string())),
        };

        self.verify(name, timestamp, body, mac)?;

        let timestamp = std::str::from_utf8(timestamp)
            .ok()
            .and_then(|t| t.parse::<i64>().ok())
            .ok_or_else(|| CodecError::Decoding("invalid timestamp".to_string()))?;

        if timestamp > now.saturating_add(MAX_CLOCK_SKEW) {
            return Err(CodecError::Expired);
        }
        if self.max_age > 0 && timestamp < now.saturating_sub(self.max_age) {
            return Err(CodecError::Expired);
        }

        let body = URL_SAFE_NO_PAD
            .decode(body)
            .map_err(|e| CodecError::Decoding(e.to_string()))?;

        let payload = match self.block_key.as_deref() {
            Some(key) => decrypt(key, name, &body)?,
            None => body,
        };

        if payload.len() != expected_len {
            return Err(CodecError::Length {
                expected: expected_len,
                actual: payload.len(),
            });
        }

        Ok(payload)
    }

    fn check_length(&self, len: usize) -> Result<()> {
        if self.max_length != 0 && len > self.max_length {
            return Err(CodecError::ValueTooLong {
                len,
                max: self.max_length,
            });
        }
        Ok(())
    }

    fn mac(&self, name: &str, timestamp: &[u8], body: &[u8]) -> Result<HmacSha256> {
        let mut mac = <HmacSha256 as Mac>::new_from_slice(&self.hash_key)
            .map_err(|e| CodecError::InvalidKey(e.to_string()))?;
        mac.update(name.as_bytes());
        mac.update(b"|");
        mac.update(timestamp);
        mac.update(b"|");
        mac.update(body);
        Ok(mac)
    }

    fn sign(&self, name: &str, timestamp: &[u8], body: &[u8]) -> Result<Vec<u8>> {
        Ok(self
            .mac(name, timestamp, body)?
            .finalize()
            .into_bytes()
            .to_vec())
    }

    fn verify(&self, name: &str, timestamp: &[u8], body: &[u8], tag: &[u8]) -> Result<()> {
        self.mac(name, timestamp, body)?
            .verify_slice(tag)
            .map_err(|_| CodecError::MacInvalid)
    }
}

impl AuthenticatedCodec for SecureCookie {
    fn encode(&self, name: &str, payload: &[u8]) -> Result<String> {
        self.encode_at(name, payload, Utc::now().timestamp())
    }

    fn decode(&self, name: &str, value: &str, expected_len: usize) -> Result<Vec<u8>> {
        self.decode_at(name, value, expected_len, Utc::now().timestamp())
    }
}

impl fmt::Debug for SecureCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecureCookie")
            .field("hash_key", &"<redacted>")
            .field("encrypted", &self.block_key.is_some())
            .field("max_age", &self.max_age)
            .field("max_length", &self.max_length)
            .finish()
    }
}

fn encrypt(key: &[u8], name: &str, plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = ChaCha20Poly1305::new_from_slice(key).map_err(|_| CodecError::Encryption)?;

    let mut nonce = [0u8; NONCE_LENGTH];
    rand::thread_rng().fill_bytes(&mut nonce);

    let ciphertext = cipher
        .encrypt(
            Nonce::from_slice(&nonce),
            Payload {
                msg: plaintext,
                aad: name.as_bytes(),
            },
        )
        .map_err(|_| CodecError::Encryption)?;

    let mut out = Vec::with_capacity(NONCE_LENGTH + ciphertext.len());
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

fn decrypt(key: &[u8], name: &str, data: &[u8]) -> Result<Vec<u8>> {
    if data.len() < NONCE_LENGTH {
        return Err(CodecError::Decryption);
    }
    let (nonce, ciphertext) = data.split_at(NONCE_LENGTH);

    let cipher = ChaCha20Poly1305::new_from_slice(key).map_err(|_| CodecError::Decryption)?;
    cipher
        .decrypt(
            Nonce::from_slice(nonce),
            Payload {
                msg: ciphertext,
                aad: name.as_bytes(),
            },
        )
        .map_err(|_| CodecError::Decryption)
}
