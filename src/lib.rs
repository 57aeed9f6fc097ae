// Armature Token Store - CSRF token persistence for Armature applications
//
// Re-exports the token store and the authenticated cookie codec it is built on.

pub use armature_csrf::*;

pub use armature_csrf;
pub use armature_securecookie;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        AuthenticatedCodec, CookieStore, CsrfError, SameSite, SecureCookie, StoreConfig,
        TOKEN_LENGTH, Token, TokenStore,
    };
    pub use http::HeaderMap;
}
