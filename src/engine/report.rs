/// Confidence shown when no rule triggered, independent of the computed score.
const SAFE_CONFIDENCE_PERCENT: u32 = 5;

/// Render the textual report for a scan.
///
/// `score` is the unrounded final score; it only feeds the confidence line
/// when at least one finding exists.
pub fn render(findings: &[String], score: f64) -> String {
    if findings.is_empty() {
        return format!(
            "URL classified as likely safe based on the evaluated features. \
             Confidence score: {}% malicious",
            SAFE_CONFIDENCE_PERCENT
        );
    }

    let bullets: Vec<String> = findings.iter().map(|f| format!("- {}", f)).collect();
    format!(
        "Model findings:\n{}\nConfidence score: {}% malicious",
        bullets.join("\n"),
        (score * 100.0).round() as i64
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_findings_fixed_sentence() {
        let report = render(&[], 0.42);
        assert!(report.contains("likely safe"));
        assert!(report.ends_with("Confidence score: 5% malicious"));
        assert!(!report.contains('\n'));
    }

    #[test]
    fn test_bullets_in_order() {
        let findings = vec!["first".to_string(), "second".to_string()];
        let report = render(&findings, 0.55);
        assert_eq!(
            report,
            "Model findings:\n- first\n- second\nConfidence score: 55% malicious"
        );
    }

    #[test]
    fn test_percent_rounding() {
        let findings = vec!["x".to_string()];
        assert!(render(&findings, 1.0).ends_with("100% malicious"));
        assert!(render(&findings, 0.0).ends_with(" 0% malicious"));
        assert!(render(&findings, 0.15).ends_with(" 15% malicious"));
    }
}
