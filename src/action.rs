//! Request handling: validate, normalize, classify.
//!
//! Validation problems come back as [`CheckOutcome::Invalid`] without the
//! classifier ever being called. Anything that goes wrong afterwards is
//! logged in full and reported to the user with a generic message.

use std::time::Duration;

use futures::stream::{self, StreamExt};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::backend::Classifier;
use crate::models::{AnalysisOutput, CheckOutcome, ScanResult};
use crate::normalizer::{normalize, NormalizationError, NormalizedUrl};

/// Shown to users for any failure past validation.
pub const GENERIC_FAILURE: &str = "An unexpected error occurred while analyzing the URL.";

const EMPTY_INPUT: &str = "URL cannot be empty.";

/// Upper bound on classifications in flight during [`check_many`].
pub const BATCH_SIZE: usize = 75;

/// Prefix identifying which analysis produced a report.
const REPORT_PREFIX: &str = "Risk engine analysis:\n";

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("classification timed out after {0:?}")]
    Timeout(Duration),
    #[error("classifier output failed validation: {0}")]
    InvalidOutput(String),
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Classify a normalized URL and validate what the classifier returned.
pub async fn analyze(
    classifier: &dyn Classifier,
    url: &NormalizedUrl,
    timeout: Duration,
) -> Result<AnalysisOutput, AnalysisError> {
    let result = tokio::time::timeout(timeout, classifier.classify(url))
        .await
        .map_err(|_| AnalysisError::Timeout(timeout))??;

    validate(&result)?;

    Ok(AnalysisOutput {
        is_malicious: result.malicious,
        maliciousness_score: result.score,
        report: format!("{}{}", REPORT_PREFIX, result.report),
        original_url: url.to_string(),
    })
}

fn validate(result: &ScanResult) -> Result<(), AnalysisError> {
    if !result.score.is_finite() || !(0.0..=1.0).contains(&result.score) {
        return Err(AnalysisError::InvalidOutput(format!(
            "score {} is outside [0, 1]",
            result.score
        )));
    }
    if result.report.trim().is_empty() {
        return Err(AnalysisError::InvalidOutput("report is empty".to_string()));
    }
    Ok(())
}

/// Check one raw user input end to end.
pub async fn check_url_safety(
    classifier: &dyn Classifier,
    raw: &str,
    timeout: Duration,
) -> CheckOutcome {
    let url = match normalize(raw) {
        Ok(url) => url,
        Err(err) => {
            warn!(input = raw, error = %err, "input rejected");
            return CheckOutcome::Invalid {
                input: raw.to_string(),
                message: validation_message(&err),
            };
        }
    };

    match analyze(classifier, &url, timeout).await {
        Ok(analysis) => {
            info!(
                url = %url,
                backend = classifier.name(),
                malicious = analysis.is_malicious,
                score = analysis.maliciousness_score,
                "scan complete"
            );
            CheckOutcome::Success {
                url: url.to_string(),
                analysis,
            }
        }
        Err(err) => {
            error!(url = %url, backend = classifier.name(), error = ?err, "analysis failed");
            CheckOutcome::Failed {
                url: url.to_string(),
                message: GENERIC_FAILURE.to_string(),
            }
        }
    }
}

/// Check several inputs concurrently, at most [`BATCH_SIZE`] at a time.
/// Outcomes keep the input order; `on_done` fires as each one completes.
pub async fn check_many<S, F>(
    classifier: &dyn Classifier,
    inputs: &[S],
    timeout: Duration,
    on_done: F,
) -> Vec<CheckOutcome>
where
    S: AsRef<str>,
    F: Fn(&CheckOutcome),
{
    let on_done = &on_done;
    stream::iter(inputs)
        .map(move |raw| async move {
            let outcome = check_url_safety(classifier, raw.as_ref(), timeout).await;
            on_done(&outcome);
            outcome
        })
        .buffered(BATCH_SIZE)
        .collect()
        .await
}

fn validation_message(err: &NormalizationError) -> String {
    match err {
        NormalizationError::Empty => EMPTY_INPUT.to_string(),
        NormalizationError::Malformed(detail) => format!(
            "Invalid URL structure: {}. Enter a valid domain or a full URL \
             (e.g. example.com or https://example.com).",
            detail
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use anyhow::anyhow;
    use async_trait::async_trait;

    use crate::backend::LocalBackend;
    use crate::config::ListConfig;

    /// Stub that counts calls and returns a canned answer.
    struct Canned {
        calls: AtomicUsize,
        answer: fn() -> anyhow::Result<ScanResult>,
    }

    impl Canned {
        fn new(answer: fn() -> anyhow::Result<ScanResult>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                answer,
            }
        }
    }

    #[async_trait]
    impl Classifier for Canned {
        fn name(&self) -> &str {
            "canned"
        }

        async fn classify(&self, _url: &NormalizedUrl) -> anyhow::Result<ScanResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.answer)()
        }
    }

    struct Stalled;

    #[async_trait]
    impl Classifier for Stalled {
        fn name(&self) -> &str {
            "stalled"
        }

        async fn classify(&self, _url: &NormalizedUrl) -> anyhow::Result<ScanResult> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Err(anyhow!("unreachable"))
        }
    }

    /// Records the peak number of concurrent `classify` calls.
    #[derive(Default)]
    struct InFlight {
        current: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl Classifier for InFlight {
        fn name(&self) -> &str {
            "in-flight"
        }

        async fn classify(&self, _url: &NormalizedUrl) -> anyhow::Result<ScanResult> {
            let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.current.fetch_sub(1, Ordering::SeqCst);
            safe_answer()
        }
    }

    fn safe_answer() -> anyhow::Result<ScanResult> {
        Ok(ScanResult {
            malicious: false,
            score: 0.05,
            report: "ok".to_string(),
        })
    }

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn test_empty_input_never_reaches_classifier() {
        let stub = Canned::new(safe_answer);
        for raw in ["", "   "] {
            let outcome = check_url_safety(&stub, raw, TIMEOUT).await;
            assert_eq!(
                outcome,
                CheckOutcome::Invalid {
                    input: raw.to_string(),
                    message: EMPTY_INPUT.to_string(),
                }
            );
        }
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_malformed_input_message() {
        let stub = Canned::new(safe_answer);
        let outcome = check_url_safety(&stub, "exa mple.com", TIMEOUT).await;
        match outcome {
            CheckOutcome::Invalid { message, .. } => {
                assert!(message.starts_with("Invalid URL structure: invalid characters in domain."));
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_success_wraps_normalized_url() {
        let backend = LocalBackend::new(ListConfig::default());
        let outcome = check_url_safety(&backend, "example.com", TIMEOUT).await;
        match outcome {
            CheckOutcome::Success { url, analysis } => {
                assert_eq!(url, "https://example.com/");
                assert_eq!(analysis.original_url, "https://example.com/");
                assert_eq!(analysis.maliciousness_score, 0.0);
                assert!(!analysis.is_malicious);
                assert!(analysis.report.starts_with(REPORT_PREFIX));
            }
            other => panic!("expected Success, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_backend_error_is_generic() {
        let stub = Canned::new(|| Err(anyhow!("connection reset by 10.1.2.3")));
        let outcome = check_url_safety(&stub, "docs.rs", TIMEOUT).await;
        assert_eq!(
            outcome,
            CheckOutcome::Failed {
                url: "https://docs.rs/".to_string(),
                message: GENERIC_FAILURE.to_string(),
            }
        );
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_out_of_range_score_rejected() {
        let stub = Canned::new(|| {
            Ok(ScanResult {
                malicious: true,
                score: 1.7,
                report: "bad".to_string(),
            })
        });
        let url = normalize("docs.rs").unwrap();
        let err = analyze(&stub, &url, TIMEOUT).await.unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidOutput(_)));
    }

    #[tokio::test]
    async fn test_nan_score_rejected() {
        let stub = Canned::new(|| {
            Ok(ScanResult {
                malicious: false,
                score: f64::NAN,
                report: "nan".to_string(),
            })
        });
        let url = normalize("docs.rs").unwrap();
        assert!(matches!(
            analyze(&stub, &url, TIMEOUT).await,
            Err(AnalysisError::InvalidOutput(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_at_call_site() {
        let url = normalize("docs.rs").unwrap();
        let err = analyze(&Stalled, &url, Duration::from_secs(1)).await.unwrap_err();
        assert!(matches!(err, AnalysisError::Timeout(d) if d == Duration::from_secs(1)));

        let outcome = check_url_safety(&Stalled, "docs.rs", Duration::from_secs(1)).await;
        assert!(matches!(outcome, CheckOutcome::Failed { .. }));
    }

    #[tokio::test]
    async fn test_check_many_preserves_order() {
        let backend = LocalBackend::new(ListConfig::default());
        let inputs = ["192.168.1.1", "", "example.com", "http://evil-site.com/"];
        let done = AtomicUsize::new(0);
        let outcomes = check_many(&backend, &inputs[..], TIMEOUT, |_| {
            done.fetch_add(1, Ordering::SeqCst);
        })
        .await;

        assert_eq!(outcomes.len(), 4);
        assert_eq!(done.load(Ordering::SeqCst), 4);
        assert_eq!(outcomes[0].url(), "https://192.168.1.1/");
        assert!(outcomes[0].is_malicious());
        assert!(matches!(outcomes[1], CheckOutcome::Invalid { .. }));
        assert_eq!(outcomes[2].url(), "https://example.com/");
        assert!(!outcomes[2].is_malicious());
        assert!(outcomes[3].is_malicious());
    }

    #[tokio::test(start_paused = true)]
    async fn test_check_many_bounds_concurrency() {
        let stub = InFlight::default();
        let inputs: Vec<String> = (0..500).map(|i| format!("host{}.docs.rs", i)).collect();
        let outcomes = check_many(&stub, inputs.as_slice(), TIMEOUT, |_| {}).await;

        assert_eq!(outcomes.len(), 500);
        assert_eq!(outcomes[499].url(), "https://host499.docs.rs/");
        assert!(outcomes.iter().all(|o| matches!(o, CheckOutcome::Success { .. })));
        let peak = stub.peak.load(Ordering::SeqCst);
        assert!(peak <= BATCH_SIZE, "peak in-flight {}", peak);
        assert!(peak > 1, "calls ran one at a time");
    }
}
