//! Feature checks inspected by the scoring rules.
//!
//! Each function looks at one syntactic property of a URL and has no
//! knowledge of scores or findings.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Path length above which the length rule triggers.
pub const MAX_PATH_LEN: usize = 100;
/// Total URL length above which the length rule triggers.
pub const MAX_URL_LEN: usize = 150;
/// Hostnames with more labels than this trigger the subdomain rule.
pub const MAX_HOST_LABELS: usize = 4;

/// Four dot-separated groups of 1-3 digits. Groups are not range-checked,
/// so `999.999.999.999` also matches.
static IP_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[0-9]{1,3}\.){3}[0-9]{1,3}$").expect("IP literal pattern compiles")
});

/// Structural parts extracted from a URL.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlParts {
    pub scheme: String,
    pub host: String,
    pub path: String,
}

/// Secondary structural parse. `None` when the URL cannot be parsed or has
/// no hostname.
pub fn parse_parts(url: &str) -> Option<UrlParts> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str().filter(|h| !h.is_empty())?.to_string();
    Some(UrlParts {
        scheme: parsed.scheme().to_string(),
        host,
        path: parsed.path().to_string(),
    })
}

/// `keywords` must already be lowercase.
pub fn contains_keyword(url: &str, keywords: &[String]) -> bool {
    let lower = url.to_lowercase();
    keywords.iter().any(|kw| lower.contains(kw.as_str()))
}

pub fn exceeds_length(path: &str, url: &str) -> bool {
    path.chars().count() > MAX_PATH_LEN || url.chars().count() > MAX_URL_LEN
}

pub fn is_ip_literal(host: &str) -> bool {
    IP_LITERAL.is_match(host)
}

pub fn label_count(host: &str) -> usize {
    host.split('.').count()
}

/// First suffix in `suffixes` that `host` ends with.
pub fn matched_suffix<'a>(host: &str, suffixes: &'a [String]) -> Option<&'a str> {
    suffixes
        .iter()
        .map(String::as_str)
        .find(|suffix| host.ends_with(suffix))
}

pub fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}
