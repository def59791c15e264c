//! Closed error taxonomy for the remediation pipeline.
//!
//! Callers pattern-match on these variants instead of catching a generic
//! error type; the HTTP layer maps each variant to a status code.

use thiserror::Error;

/// Failures from the code generator client.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("timed out while communicating with the model service after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("network error while communicating with the model service: {0}")]
    Network(String),

    #[error("model service request failed with status {status}: {body}")]
    Http { status: u16, body: String },

    #[error("invalid response from the model service: {0}")]
    InvalidResponse(String),
}

/// Failures that prevented the scanner process from producing an outcome
/// at all. A scan that ran and exited non-zero is reported through
/// [`crate::ScanOutcome`] instead.
#[derive(Debug, Error)]
pub enum ScannerError {
    #[error("scanner timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("failed to run scanner '{path}': {message}")]
    Spawn { path: String, message: String },

    #[error("scanner I/O error: {0}")]
    Io(String),
}

/// Terminal outcome of a remediation request that did not produce code.
#[derive(Debug, Error)]
pub enum RemediationError {
    /// Input validation; fails fast, no attempt consumed.
    #[error("Unsupported language: {language}. Supported languages: {supported}")]
    UnsupportedLanguage { language: String, supported: String },

    /// The generator was unavailable on the final attempt (earlier
    /// failures are folded into conversation context and retried).
    #[error("Failed to generate remediation after {attempts} attempts: {source}")]
    GenerationFailed {
        attempts: usize,
        #[source]
        source: GeneratorError,
    },

    /// The model produced nothing usable; fatal, not retried.
    #[error("Empty response from AI model")]
    EmptyGeneration,

    /// The verification tooling itself broke; never retried, since
    /// continuing would burn the budget without signal.
    #[error("Security scan failed: {message}")]
    ScanFailed { message: String },

    /// Every attempt produced findings.
    #[error("Unable to generate secure code after {attempts} attempts. Last vulnerabilities: {summary}")]
    Exhausted { attempts: usize, summary: String },

    /// Defensive; the retry loop should always return before this.
    #[error("Unexpected error in remediation process: {message}")]
    Internal { message: String },
}
