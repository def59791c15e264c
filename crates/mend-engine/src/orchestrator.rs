//! The feedback-driven remediation loop.
//!
//! One remediation request runs a strictly sequential chain of
//! generate-then-scan attempts. Scanner findings are folded back into the
//! conversation so the next attempt can react to them; the loop ends on
//! the first clean scan, on a non-retryable failure, or when the retry
//! budget is exhausted.

use crate::generator::prompts;
use mend_adapters::config::RemediationConfig;
use mend_core::protocol::{Generator, Scanner};
use mend_core::{language, ConversationTurn, Remediation, RemediationError, RemediationRequest, Role};
use tracing::{debug, error, info, warn};

pub struct Orchestrator<'a, G, S> {
    generator: &'a G,
    scanner: &'a S,
    config: &'a RemediationConfig,
}

impl<'a, G, S> Orchestrator<'a, G, S>
where
    G: Generator,
    S: Scanner,
{
    pub fn new(generator: &'a G, scanner: &'a S, config: &'a RemediationConfig) -> Self {
        Self {
            generator,
            scanner,
            config,
        }
    }

    /// Drive the retry loop for one request.
    ///
    /// History bookkeeping: each failed attempt appends exactly two turns
    /// (the assistant's candidate and the scanner's feedback); a generator
    /// error appends a single error note instead.
    pub async fn remediate(
        &self,
        request: &RemediationRequest,
    ) -> Result<Remediation, RemediationError> {
        if !language::is_allowed(&request.language, &self.config.allowed_languages) {
            return Err(RemediationError::UnsupportedLanguage {
                language: request.language.clone(),
                supported: self.config.supported_languages(),
            });
        }

        info!(
            language = %request.language,
            rule = %request.rule_name,
            "processing remediation request"
        );

        let max_retries = self.config.max_retries.max(1);
        let filename = language::scan_filename(&request.language);
        let mut history: Vec<ConversationTurn> = Vec::new();

        for attempt in 0..max_retries {
            debug!("remediation attempt {}/{}", attempt + 1, max_retries);

            let instruction = if attempt == 0 {
                prompts::initial_instruction(request)
            } else {
                prompts::RETRY_INSTRUCTION.to_string()
            };

            let code = match self
                .generator
                .generate(prompts::REMEDIATION_SYSTEM, &instruction, &history)
                .await
            {
                Ok(code) => code,
                Err(err) => {
                    error!("generation failed on attempt {}: {}", attempt + 1, err);
                    if attempt + 1 == max_retries {
                        return Err(RemediationError::GenerationFailed {
                            attempts: attempt + 1,
                            source: err,
                        });
                    }
                    history.push(ConversationTurn::new(
                        Role::ErrorNote,
                        format!("Error occurred in previous attempt: {err}"),
                    ));
                    continue;
                }
            };

            if code.trim().is_empty() {
                return Err(RemediationError::EmptyGeneration);
            }

            let outcome = self
                .scanner
                .scan(&code, &request.language, &filename)
                .await
                .map_err(|err| RemediationError::ScanFailed {
                    message: err.to_string(),
                })?;

            // A scan that ran but failed means the verification path is
            // broken; retrying would burn budget without signal.
            if !outcome.succeeded {
                let message = outcome
                    .error
                    .unwrap_or_else(|| outcome.message.clone());
                return Err(RemediationError::ScanFailed { message });
            }

            if !outcome.has_findings() {
                info!("generated secure code after {} attempts", attempt + 1);
                return Ok(Remediation {
                    code,
                    attempts: attempt + 1,
                });
            }

            let summary = outcome.summary();
            warn!("attempt {} had vulnerabilities: {}", attempt + 1, summary);

            history.push(ConversationTurn::new(Role::Assistant, code));
            history.push(ConversationTurn::new(
                Role::ScanFeedback,
                format!(
                    "The security scanner found these vulnerabilities in your code: {summary}\n\nPlease fix these specific security issues and provide a corrected version."
                ),
            ));

            if attempt + 1 == max_retries {
                return Err(RemediationError::Exhausted {
                    attempts: max_retries,
                    summary,
                });
            }
        }

        Err(RemediationError::Internal {
            message: "remediation loop ended without a terminal outcome".to_string(),
        })
    }
}
