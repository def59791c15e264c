//! Ollama-backed code generator client.

pub mod clean;
pub mod prompts;

use mend_adapters::config::GeneratorConfig;
use mend_core::protocol::Generator;
use mend_core::{ConversationTurn, GeneratorError};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Health probes use their own short deadline instead of the full
/// generation timeout.
const HEALTH_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for a local/network Ollama-compatible chat endpoint.
pub struct OllamaGenerator {
    client: reqwest::Client,
    base_url: String,
    model: String,
    timeout_secs: u64,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
    options: SamplingOptions,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Deterministic, bounded sampling for code output.
#[derive(Serialize)]
struct SamplingOptions {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    num_predict: u32,
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self {
            temperature: 0.1,
            top_p: 0.9,
            top_k: 40,
            num_predict: 1000,
        }
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    message: Option<AssistantMessage>,
}

#[derive(Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    role: String,
    #[serde(default)]
    content: String,
}

impl OllamaGenerator {
    pub fn new(config: &GeneratorConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            client,
            base_url: config.base_url(),
            model: config.model.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    #[cfg(test)]
    fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(5))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            base_url: base_url.into(),
            model: "test-model".to_string(),
            timeout_secs: 5,
        }
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url.trim_end_matches('/'))
    }

    fn classify(&self, err: reqwest::Error) -> GeneratorError {
        if err.is_timeout() {
            GeneratorError::Timeout {
                seconds: self.timeout_secs,
            }
        } else if err.is_connect() {
            GeneratorError::Network(format!("connection failed: {err}"))
        } else {
            GeneratorError::Network(err.to_string())
        }
    }
}

impl Generator for OllamaGenerator {
    fn generate<'a>(
        &'a self,
        system: &'a str,
        user: &'a str,
        history: &'a [ConversationTurn],
    ) -> Pin<Box<dyn Future<Output = Result<String, GeneratorError>> + Send + 'a>> {
        Box::pin(async move {
            let mut messages = Vec::with_capacity(history.len() + 2);
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
            for turn in history {
                messages.push(ChatMessage {
                    role: turn.role.as_wire_role(),
                    content: &turn.content,
                });
            }
            messages.push(ChatMessage {
                role: "user",
                content: user,
            });

            let url = self.chat_url();
            debug!(
                "sending chat request to {} with {} messages",
                url,
                messages.len()
            );

            let request = ChatRequest {
                model: &self.model,
                messages,
                stream: false,
                options: SamplingOptions::default(),
            };

            let response = self
                .client
                .post(&url)
                .json(&request)
                .send()
                .await
                .map_err(|err| self.classify(err))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(GeneratorError::Http {
                    status: status.as_u16(),
                    body,
                });
            }

            let parsed: ChatResponse = response
                .json()
                .await
                .map_err(|err| GeneratorError::InvalidResponse(err.to_string()))?;

            let message = parsed.message.ok_or_else(|| {
                GeneratorError::InvalidResponse("response is missing the assistant message".into())
            })?;
            if message.role != "assistant" {
                return Err(GeneratorError::InvalidResponse(format!(
                    "expected assistant role, got {:?}",
                    message.role
                )));
            }

            let cleaned = clean::clean_code_response(message.content.trim());
            info!("generated {} characters of remediated code", cleaned.len());
            Ok(cleaned)
        })
    }

    fn health_check<'a>(&'a self) -> Pin<Box<dyn Future<Output = bool> + Send + 'a>> {
        Box::pin(async move {
            let request = ChatRequest {
                model: &self.model,
                messages: vec![ChatMessage {
                    role: "user",
                    content: "test",
                }],
                stream: false,
                options: SamplingOptions::default(),
            };

            match self
                .client
                .post(self.chat_url())
                .json(&request)
                .timeout(HEALTH_TIMEOUT)
                .send()
                .await
            {
                Ok(response) => {
                    let healthy = response.status().is_success();
                    debug!(healthy, "model service health check");
                    healthy
                }
                Err(err) => {
                    warn!("model service health check failed: {err}");
                    false
                }
            }
        })
    }
}
