use thiserror::Error;

/// Errors returned by token stores.
///
/// Every failure to recover a stored token from a present cookie is reported
/// as [`CsrfError::InvalidToken`]. Tampering, expiry and corruption are not
/// distinguished so that responses cannot be used as a decoding oracle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CsrfError {
    #[error("CSRF cookie not found")]
    NotFound,

    #[error("Invalid CSRF token")]
    InvalidToken,

    #[error("Failed to encode CSRF cookie: {0}")]
    EncodingFailure(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CsrfError>;
