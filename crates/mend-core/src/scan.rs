//! Scan outcomes and normalized vulnerability findings.

use serde::{Deserialize, Serialize};

/// A single vulnerability reported by the scanner, normalized from the
/// tool's heterogeneous field naming into one fixed shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VulnerabilityFinding {
    pub rule_id: i64,
    pub language: String,
    pub rule: String,
    pub severity: String,
    pub file: String,
    pub line: i64,
    pub content: String,
    pub remediation_advice: String,
    pub description: String,
}

impl Default for VulnerabilityFinding {
    fn default() -> Self {
        Self {
            rule_id: 0,
            language: "unknown".to_string(),
            rule: "Unknown Rule".to_string(),
            severity: "medium".to_string(),
            file: "unknown".to_string(),
            line: 1,
            content: String::new(),
            remediation_advice: String::new(),
            description: String::new(),
        }
    }
}

/// Result of one scanner invocation.
///
/// `succeeded` means the scan *executed*, not that the code is clean; a
/// clean scan is a successful run with zero findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanOutcome {
    pub request_id: String,
    pub succeeded: bool,
    pub message: String,
    pub findings: Vec<VulnerabilityFinding>,
    pub error: Option<String>,
}

impl ScanOutcome {
    /// Successful run with zero findings.
    pub fn clean(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            succeeded: true,
            message: "Scan completed successfully".to_string(),
            findings: Vec::new(),
            error: None,
        }
    }

    /// Successful run that reported findings.
    pub fn with_findings(
        request_id: impl Into<String>,
        findings: Vec<VulnerabilityFinding>,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            succeeded: true,
            message: "Scan completed successfully".to_string(),
            findings,
            error: None,
        }
    }

    /// The scan itself could not run or its result could not be read.
    pub fn failed(
        request_id: impl Into<String>,
        message: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        let error = error.into();
        Self {
            request_id: request_id.into(),
            succeeded: false,
            message: message.into(),
            findings: Vec::new(),
            error: Some(error),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.succeeded && self.findings.is_empty()
    }

    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }

    /// Human-readable one-line summary fed back to the model and surfaced
    /// in exhaustion errors.
    pub fn summary(&self) -> String {
        if self.findings.is_empty() {
            return "No vulnerabilities found".to_string();
        }

        self.findings
            .iter()
            .map(|finding| {
                format!(
                    "{} (line {}: {}) description: {}",
                    finding.rule, finding.line, finding.content, finding.description
                )
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(rule: &str, line: i64, content: &str, description: &str) -> VulnerabilityFinding {
        VulnerabilityFinding {
            rule: rule.to_string(),
            line,
            content: content.to_string(),
            description: description.to_string(),
            ..VulnerabilityFinding::default()
        }
    }

    #[test]
    fn clean_outcome_has_no_findings_and_succeeded() {
        let outcome = ScanOutcome::clean("req-1");
        assert!(outcome.is_clean());
        assert!(!outcome.has_findings());
        assert_eq!(outcome.summary(), "No vulnerabilities found");
    }

    #[test]
    fn failed_outcome_is_not_clean_even_without_findings() {
        let outcome = ScanOutcome::failed("req-1", "Scan failed: boom", "boom");
        assert!(!outcome.is_clean());
        assert_eq!(outcome.error.as_deref(), Some("boom"));
    }

    #[test]
    fn summary_joins_findings_with_semicolons() {
        let outcome = ScanOutcome::with_findings(
            "req-1",
            vec![
                finding("SQL Injection", 3, "db.Query(q)", "string concatenation"),
                finding("Weak Hash", 10, "md5.New()", "md5 is broken"),
            ],
        );
        assert_eq!(
            outcome.summary(),
            "SQL Injection (line 3: db.Query(q)) description: string concatenation; \
             Weak Hash (line 10: md5.New()) description: md5 is broken"
        );
    }

    #[test]
    fn default_finding_carries_defensive_defaults() {
        let finding = VulnerabilityFinding::default();
        assert_eq!(finding.rule_id, 0);
        assert_eq!(finding.language, "unknown");
        assert_eq!(finding.rule, "Unknown Rule");
        assert_eq!(finding.severity, "medium");
        assert_eq!(finding.file, "unknown");
        assert_eq!(finding.line, 1);
    }
}
