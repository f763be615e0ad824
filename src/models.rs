use serde::{Deserialize, Serialize};

/// Outcome of a single scoring call.
///
/// `score` is always within `[0, 1]` and rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    pub malicious: bool,
    pub score: f64,
    pub report: String,
}

/// Validated classifier output, paired with the URL it was produced for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutput {
    pub is_malicious: bool,
    pub maliciousness_score: f64,
    pub report: String,
    pub original_url: String,
}

/// Result of checking one user-supplied input end to end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckOutcome {
    /// The input was normalized and classified.
    Success { url: String, analysis: AnalysisOutput },
    /// The input was rejected before reaching the classifier.
    Invalid { input: String, message: String },
    /// Classification itself failed; `message` is safe to show to users.
    Failed { url: String, message: String },
}

impl CheckOutcome {
    /// Display URL: the normalized form when available, the raw input otherwise.
    pub fn url(&self) -> &str {
        match self {
            CheckOutcome::Success { url, .. } => url,
            CheckOutcome::Invalid { input, .. } => input,
            CheckOutcome::Failed { url, .. } => url,
        }
    }

    pub fn is_malicious(&self) -> bool {
        matches!(self, CheckOutcome::Success { analysis, .. } if analysis.is_malicious)
    }
}
