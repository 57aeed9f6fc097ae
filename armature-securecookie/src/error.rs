//! Error types for cookie value encoding.

use thiserror::Error;

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Codec-specific errors.
///
/// The variants are deliberately fine grained so that codec users can tell
/// failures apart while debugging. Callers that face untrusted clients should
/// fold them into a single error before answering a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// A hash or block key has an unusable length
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// The encoded value exceeds the configured maximum length
    #[error("Encoded value too long: {len} bytes (max {max})")]
    ValueTooLong { len: usize, max: usize },

    /// Base64 or structural decoding failed
    #[error("Decoding error: {0}")]
    Decoding(String),

    /// The HMAC did not verify
    #[error("MAC verification failed")]
    MacInvalid,

    /// The timestamp is outside the accepted window
    #[error("Value expired")]
    Expired,

    /// Encryption of the payload failed
    #[error("Encryption failed")]
    Encryption,

    /// Decryption of the payload failed
    #[error("Decryption failed")]
    Decryption,

    /// The decoded payload does not have the expected length
    #[error("Unexpected payload length: expected {expected}, got {actual}")]
    Length { expected: usize, actual: usize },
}
