use std::fmt;

/// Length of a CSRF token in bytes (256 bits).
pub const TOKEN_LENGTH: usize = 32;

/// The per-session CSRF secret.
///
/// Tokens are produced by the caller (typically from a CSPRNG) and only
/// transported by a [`TokenStore`](crate::TokenStore). The fixed-size
/// representation makes a wrong-length token unrepresentable.
#[derive(Clone, PartialEq, Eq)]
pub struct Token([u8; TOKEN_LENGTH]);

impl Token {
    /// Create a token from exactly [`TOKEN_LENGTH`] bytes.
    ///
    /// Returns `None` for any other length.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        <[u8; TOKEN_LENGTH]>::try_from(bytes).ok().map(Self)
    }

    /// Token bytes
    pub fn as_bytes(&self) -> &[u8; TOKEN_LENGTH] {
        &self.0
    }

    /// Consume the token and return its bytes
    pub fn into_bytes(self) -> [u8; TOKEN_LENGTH] {
        self.0
    }
}

impl From<[u8; TOKEN_LENGTH]> for Token {
    fn from(bytes: [u8; TOKEN_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Token {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(<redacted>)")
    }
}
