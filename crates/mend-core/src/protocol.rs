//! Contracts between the orchestrator and its collaborators.
//!
//! The orchestrator only ever sees these traits; the real clients live in
//! the engine crate and tests substitute scripted stubs.

use crate::conversation::ConversationTurn;
use crate::error::{GeneratorError, ScannerError};
use crate::scan::ScanOutcome;
use std::future::Future;
use std::pin::Pin;

/// Produces a code snippet from a system instruction, a user instruction,
/// and prior turn history. Stateless per call.
pub trait Generator: Send + Sync {
    fn generate<'a>(
        &'a self,
        system: &'a str,
        user: &'a str,
        history: &'a [ConversationTurn],
    ) -> Pin<Box<dyn Future<Output = Result<String, GeneratorError>> + Send + 'a>>;

    /// Liveness probe; must never panic or propagate transport errors.
    fn health_check<'a>(&'a self) -> Pin<Box<dyn Future<Output = bool> + Send + 'a>>;
}

/// Runs a security scan over a code snippet.
///
/// `Err` means the scan could not be attempted at all (spawn failure,
/// timeout, I/O); a scan that ran and failed is an unsuccessful
/// [`ScanOutcome`].
pub trait Scanner: Send + Sync {
    fn scan<'a>(
        &'a self,
        code: &'a str,
        language: &'a str,
        filename: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<ScanOutcome, ScannerError>> + Send + 'a>>;

    /// Liveness probe; must never panic or propagate transport errors.
    fn health_check<'a>(&'a self) -> Pin<Box<dyn Future<Output = bool> + Send + 'a>>;
}
