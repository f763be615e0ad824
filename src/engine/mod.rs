//! Deterministic URL risk scoring.
//!
//! - [`rules`] — feature checks (length, IP literal, subdomains, TLD, lists).
//! - [`report`] — renders findings into the human-readable report.
//!
//! Rules run in a fixed order. Each triggered rule appends one finding and
//! raises the score to `max(score, candidate)`, so the worst single signal
//! wins and signals never add up. The block/safe lists run last and force
//! the score outright.

pub mod report;
pub mod rules;

use tracing::debug;

use crate::config::ListConfig;
use crate::models::ScanResult;
use crate::normalizer::NormalizedUrl;

const BASE_SCORE: f64 = 0.05;
const KEYWORD_SCORE: f64 = 0.85;
const PARSE_FAILURE_SCORE: f64 = 0.50;
const LENGTH_SCORE: f64 = 0.30;
const IP_LITERAL_SCORE: f64 = 0.75;
const SUBDOMAIN_SCORE: f64 = 0.40;
const RISKY_TLD_SCORE: f64 = 0.55;
const NO_HTTPS_SCORE: f64 = 0.15;

/// Scores above this are malicious even if no rule set the flag.
pub const MALICIOUS_THRESHOLD: f64 = 0.7;

/// Rule engine over an immutable set of lists.
///
/// Holds no mutable state; one instance can serve any number of concurrent
/// calls.
#[derive(Debug, Clone)]
pub struct RiskEngine {
    keywords: Vec<String>,
    lists: ListConfig,
}

impl RiskEngine {
    pub fn new(lists: ListConfig) -> Self {
        let keywords = lists.keywords.iter().map(|k| k.to_lowercase()).collect();
        Self { keywords, lists }
    }

    pub fn score(&self, url: &NormalizedUrl) -> ScanResult {
        self.score_str(url.as_str())
    }

    /// Score an absolute URL string. Never fails: URLs whose structure
    /// cannot be extracted get a degraded result instead.
    pub(crate) fn score_str(&self, url: &str) -> ScanResult {
        let mut eval = Evaluation::new();

        if rules::contains_keyword(url, &self.keywords) {
            eval.raise("High likelihood of phishing based on suspicious keywords.", KEYWORD_SCORE);
            eval.malicious = true;
        }

        match rules::parse_parts(url) {
            Some(parts) => {
                self.apply_features(url, &parts, &mut eval);
                self.apply_lists(&parts.host, &mut eval);
            }
            None => {
                eval.raise(
                    "Failed to parse the URL structure (potential risk).",
                    PARSE_FAILURE_SCORE,
                );
            }
        }

        let result = eval.finish();
        debug!(url, score = result.score, malicious = result.malicious, "scored url");
        result
    }

    fn apply_features(&self, url: &str, parts: &rules::UrlParts, eval: &mut Evaluation) {
        if rules::exceeds_length(&parts.path, url) {
            eval.raise(
                "URL length or path structure matches risky patterns.",
                LENGTH_SCORE,
            );
        }

        if rules::is_ip_literal(&parts.host) {
            eval.raise(
                "IP address used instead of a domain name (high risk).",
                IP_LITERAL_SCORE,
            );
            eval.malicious = true;
        }

        if rules::label_count(&parts.host) > rules::MAX_HOST_LABELS {
            eval.raise(
                "Excessive subdomains detected, a potential sign of compromise.",
                SUBDOMAIN_SCORE,
            );
        }

        if let Some(tld) = rules::matched_suffix(&parts.host, &self.lists.risky_tlds) {
            eval.raise(
                format!("Risky top-level domain ({}) identified.", tld),
                RISKY_TLD_SCORE,
            );
        }

        if parts.scheme != "https" {
            eval.raise("URL does not use HTTPS.", NO_HTTPS_SCORE);
        }
    }

    fn apply_lists(&self, host: &str, eval: &mut Evaluation) {
        let host = rules::strip_www(host);

        if rules::matched_suffix(host, &self.lists.blocklist).is_some() {
            eval.force("Domain found on the threat intelligence blocklist.", 1.0, true);
        } else if rules::matched_suffix(host, &self.lists.safelist).is_some() {
            // Clears any earlier malicious flag, including keyword and IP hits.
            eval.force("Domain confirmed safe by the safelist.", 0.0, false);
        }
    }
}

/// Running state of one scoring pass.
#[derive(Debug)]
struct Evaluation {
    score: f64,
    malicious: bool,
    findings: Vec<String>,
}

impl Evaluation {
    fn new() -> Self {
        Self {
            score: BASE_SCORE,
            malicious: false,
            findings: Vec::new(),
        }
    }

    fn raise(&mut self, finding: impl Into<String>, candidate: f64) {
        let finding = finding.into();
        debug!(finding = %finding, candidate, "rule triggered");
        self.findings.push(finding);
        self.score = self.score.max(candidate);
    }

    fn force(&mut self, finding: impl Into<String>, score: f64, malicious: bool) {
        let finding = finding.into();
        debug!(finding = %finding, score, "list override");
        self.findings.push(finding);
        self.score = score;
        self.malicious = malicious;
    }

    fn finish(self) -> ScanResult {
        let malicious = self.malicious || self.score > MALICIOUS_THRESHOLD;
        ScanResult {
            malicious,
            score: (self.score * 100.0).round() / 100.0,
            report: report::render(&self.findings, self.score),
        }
    }
}
