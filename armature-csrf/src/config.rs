use crate::error::{CsrfError, Result};
use serde::{Deserialize, Serialize};

/// Default cookie name
pub const DEFAULT_COOKIE_NAME: &str = "csrf_token";

/// Default cookie lifetime: one year
pub const DEFAULT_MAX_AGE: i64 = 365 * 24 * 60 * 60;

/// Token store configuration
///
/// Set once at startup and shared read-only between requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Cookie name for the CSRF token
    pub cookie_name: String,

    /// Cookie lifetime in seconds (zero or negative for a session cookie)
    pub max_age: i64,

    /// Cookie path
    pub cookie_path: String,

    /// Cookie domain
    pub cookie_domain: Option<String>,

    /// Cookie secure flag (HTTPS only)
    pub cookie_secure: bool,

    /// Cookie HttpOnly flag
    pub cookie_http_only: bool,

    /// Cookie SameSite policy
    pub cookie_same_site: SameSite,
}

/// Cookie SameSite attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

impl StoreConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set cookie name
    pub fn with_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.cookie_name = name.into();
        self
    }

    /// Set cookie lifetime in seconds
    pub fn with_max_age(mut self, seconds: i64) -> Self {
        self.max_age = seconds;
        self
    }

    /// Set cookie domain
    pub fn with_cookie_domain(mut self, domain: impl Into<String>) -> Self {
        self.cookie_domain = Some(domain.into());
        self
    }

    /// Set cookie path
    pub fn with_cookie_path(mut self, path: impl Into<String>) -> Self {
        self.cookie_path = path.into();
        self
    }

    /// Set cookie secure flag
    pub fn with_cookie_secure(mut self, secure: bool) -> Self {
        self.cookie_secure = secure;
        self
    }

    /// Set cookie HttpOnly flag
    pub fn with_cookie_http_only(mut self, http_only: bool) -> Self {
        self.cookie_http_only = http_only;
        self
    }

    /// Set cookie SameSite policy
    pub fn with_cookie_same_site(mut self, same_site: SameSite) -> Self {
        self.cookie_same_site = same_site;
        self
    }

    /// Check that every attribute can be rendered into a `Set-Cookie` header.
    pub fn validate(&self) -> Result<()> {
        if self.cookie_name.is_empty() || !self.cookie_name.bytes().all(is_token_char) {
            return Err(CsrfError::Config(format!(
                "invalid cookie name: {:?}",
                self.cookie_name
            )));
        }

        if self.cookie_path.is_empty() || !is_attribute_value(&self.cookie_path) {
            return Err(CsrfError::Config(format!(
                "invalid cookie path: {:?}",
                self.cookie_path
            )));
        }

        if let Some(ref domain) = self.cookie_domain
            && (domain.is_empty() || !is_attribute_value(domain))
        {
            return Err(CsrfError::Config(format!(
                "invalid cookie domain: {:?}",
                domain
            )));
        }

        // Browsers drop SameSite=None cookies that are not Secure
        if self.cookie_same_site == SameSite::None && !self.cookie_secure {
            return Err(CsrfError::Config(
                "SameSite=None requires the secure flag".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            max_age: DEFAULT_MAX_AGE,
            cookie_domain: None,
            cookie_path: "/".to_string(),
            cookie_secure: true,
            cookie_http_only: true,
            cookie_same_site: SameSite::Strict,
        }
    }
}

/// RFC 6265 cookie-name characters (an RFC 2616 token)
fn is_token_char(b: u8) -> bool {
    b.is_ascii_graphic() && !b"()<>@,;:\\\"/[]?={}".contains(&b)
}

fn is_attribute_value(value: &str) -> bool {
    value.bytes().all(|b| (b.is_ascii_graphic() || b == b' ') && b != b';')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.cookie_name, "csrf_token");
        assert_eq!(config.max_age, 31_536_000);
        assert_eq!(config.cookie_path, "/");
        assert!(config.cookie_secure);
        assert!(config.cookie_http_only);
        assert_eq!(config.cookie_same_site, SameSite::Strict);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = StoreConfig::new()
            .with_max_age(7200)
            .with_cookie_name("_csrf")
            .with_cookie_domain("example.com")
            .with_cookie_same_site(SameSite::Lax)
            .with_cookie_secure(false);

        assert_eq!(config.max_age, 7200);
        assert_eq!(config.cookie_name, "_csrf");
        assert_eq!(config.cookie_domain.as_deref(), Some("example.com"));
        assert_eq!(config.cookie_same_site, SameSite::Lax);
        assert!(!config.cookie_secure);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_cookie_names() {
        for name in ["", "csrf token", "csrf;token", "csrf=token", "tök"] {
            let config = StoreConfig::new().with_cookie_name(name);
            assert!(
                matches!(config.validate(), Err(CsrfError::Config(_))),
                "{:?} should be rejected",
                name
            );
        }
    }

    #[test]
    fn test_invalid_attributes() {
        assert!(StoreConfig::new().with_cookie_path("").validate().is_err());
        assert!(
            StoreConfig::new()
                .with_cookie_path("/; Secure")
                .validate()
                .is_err()
        );
        assert!(
            StoreConfig::new()
                .with_cookie_domain("example.com\r\n")
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_domain_validation() {
        assert!(StoreConfig::new().with_cookie_domain("").validate().is_err());
        assert!(
            StoreConfig::new()
                .with_cookie_domain("example.com")
                .validate()
                .is_ok()
        );
        assert!(StoreConfig::new().validate().is_ok());
    }

    #[test]
    fn test_same_site_none_requires_secure() {
        let config = StoreConfig::new()
            .with_cookie_same_site(SameSite::None)
            .with_cookie_secure(false);
        assert!(config.validate().is_err());

        let config = config.with_cookie_secure(true);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_same_site_enum() {
        assert_eq!(SameSite::Strict.as_str(), "Strict");
        assert_eq!(SameSite::Lax.as_str(), "Lax");
        assert_eq!(SameSite::None.as_str(), "None");
    }
}
