//! Canonicalization of raw user input into an absolute `http`/`https` URL.

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use url::{ParseError, Url};

/// Scheme prepended to inputs that carry none.
const DEFAULT_SCHEME: &str = "https://";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizationError {
    #[error("URL cannot be empty")]
    Empty,
    #[error("invalid URL structure: {0}")]
    Malformed(String),
}

/// An absolute URL in the canonical form produced by the URL parser.
///
/// Only [`normalize`] can build one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NormalizedUrl(String);

impl NormalizedUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalize raw input into a [`NormalizedUrl`].
///
/// Inputs without an `http://` or `https://` prefix get `https://` prepended
/// before parsing. No network access is performed.
pub fn normalize(raw: &str) -> Result<NormalizedUrl, NormalizationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(NormalizationError::Empty);
    }

    let candidate = if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("{}{}", DEFAULT_SCHEME, trimmed)
    };

    let parsed = Url::parse(&candidate)
        .map_err(|e| NormalizationError::Malformed(describe_parse_error(e)))?;

    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(NormalizationError::Malformed("domain missing".to_string()));
    }

    Ok(NormalizedUrl(parsed.to_string()))
}

fn has_http_scheme(s: &str) -> bool {
    let head = |n: usize| s.get(..n).unwrap_or("");
    head(7).eq_ignore_ascii_case("http://") || head(8).eq_ignore_ascii_case("https://")
}

fn describe_parse_error(err: ParseError) -> String {
    match err {
        ParseError::EmptyHost => "domain missing".to_string(),
        ParseError::InvalidDomainCharacter => "invalid characters in domain".to_string(),
        ParseError::IdnaError => "invalid internationalized domain name".to_string(),
        ParseError::InvalidPort => "invalid port number".to_string(),
        ParseError::InvalidIpv4Address | ParseError::InvalidIpv6Address => {
            "invalid IP address".to_string()
        }
        ParseError::RelativeUrlWithoutBase => "relative URL without a base".to_string(),
        other => other.to_string(),
    }
}
