//! Remediation request and result types.

use serde::{Deserialize, Serialize};

/// A detected vulnerability the caller wants fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemediationRequest {
    /// Programming language of the vulnerable code.
    pub language: String,
    /// Name of the security rule that was violated.
    pub rule_name: String,
    /// Description of the vulnerability.
    pub description: String,
    /// Advice on how to fix it.
    pub remediation_advice: String,
}

/// A verified-clean remediation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remediation {
    /// The generated snippet that passed the scan.
    pub code: String,
    /// How many generate-then-scan cycles it took (1-indexed).
    pub attempts: usize,
}
