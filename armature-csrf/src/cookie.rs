//! Cookie wire representation.

use crate::config::SameSite;
use crate::error::{CsrfError, Result};
use chrono::{DateTime, Utc};
use http::header::{COOKIE, HeaderMap, HeaderValue};

/// `Expires` layout for the IMF-fixdate form of an HTTP date.
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// A cookie as written into a `Set-Cookie` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    /// Max-Age in seconds: positive renders as-is, negative as `0`, zero is omitted
    pub max_age: i64,
    pub expires: DateTime<Utc>,
    pub path: String,
    pub domain: Option<String>,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
}

impl Cookie {
    /// Render the `Set-Cookie` header value
    pub fn to_header_value(&self) -> String {
        let mut cookie = format!("{}={}; Path={}", self.name, self.value, self.path);

        if let Some(ref domain) = self.domain {
            cookie.push_str(&format!("; Domain={}", domain));
        }

        cookie.push_str(&format!(
            "; Expires={}",
            self.expires.format(HTTP_DATE_FORMAT)
        ));

        if self.max_age > 0 {
            cookie.push_str(&format!("; Max-Age={}", self.max_age));
        } else if self.max_age < 0 {
            cookie.push_str("; Max-Age=0");
        }

        if self.http_only {
            cookie.push_str("; HttpOnly");
        }

        if self.secure {
            cookie.push_str("; Secure");
        }

        cookie.push_str(&format!("; SameSite={}", self.same_site.as_str()));

        cookie
    }

    /// Render as a validated header value
    pub fn to_header(&self) -> Result<HeaderValue> {
        HeaderValue::from_str(&self.to_header_value())
            .map_err(|e| CsrfError::EncodingFailure(e.to_string()))
    }
}

/// Find the value of the cookie called `name` in the request's `Cookie` headers.
///
/// Pairs are split on the raw header bytes, so an unrelated cookie holding
/// non-ASCII bytes does not hide the one asked for. A pair with the right
/// name that is not valid UTF-8 yields [`CsrfError::InvalidToken`].
/// Surrounding double quotes are stripped from the value.
pub fn find_cookie(headers: &HeaderMap, name: &str) -> Result<Option<String>> {
    let pairs = headers
        .get_all(COOKIE)
        .iter()
        .flat_map(|line| line.as_bytes().split(|&b| b == b';'));

    for pair in pairs {
        let pair = pair.trim_ascii();
        let Some(eq) = pair.iter().position(|&b| b == b'=') else {
            continue;
        };
        if pair[..eq].trim_ascii() != name.as_bytes() {
            continue;
        }

        let cookie = std::str::from_utf8(pair)
            .ok()
            .and_then(|pair| ::cookie::Cookie::parse(pair).ok())
            .ok_or(CsrfError::InvalidToken)?;

        return Ok(Some(cookie.value_trimmed().to_string()));
    }

    Ok(None)
}
