//! External-executable vulnerability scanner client.

pub mod parse;

use mend_adapters::config::ScannerConfig;
use mend_core::protocol::Scanner;
use mend_core::{language, ScanOutcome, ScannerError};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info, warn};
use uuid::Uuid;

const RESULT_FILE_NAME: &str = "scan_results.json";
const HEALTH_TIMEOUT: Duration = Duration::from_secs(10);

/// Drives the external analysis executable: writes the snippet to a
/// transient source file, invokes `<exe> -s <source> -r <result>`, and
/// reads back the JSON artifact. All temporary state is owned by RAII
/// guards, so it is removed on every exit path.
pub struct CliScanner {
    path: PathBuf,
    timeout: Duration,
    healthy_exit_code: i32,
}

impl CliScanner {
    pub fn new(config: &ScannerConfig) -> Self {
        Self {
            path: config.path.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            healthy_exit_code: config.healthy_exit_code,
        }
    }

    async fn run_scan(
        &self,
        code: &str,
        language: &str,
        filename: &str,
    ) -> Result<ScanOutcome, ScannerError> {
        let request_id = Uuid::new_v4().to_string();
        debug!(request_id = %request_id, language, "starting scan");

        let suffix = format!(".{}", extension_for(filename, language));
        let source = tempfile::Builder::new()
            .prefix("mend-scan-")
            .suffix(&suffix)
            .tempfile()
            .map_err(|err| ScannerError::Io(format!("failed to create scan source file: {err}")))?;
        std::fs::write(source.path(), code)
            .map_err(|err| ScannerError::Io(format!("failed to write scan source file: {err}")))?;

        let results_dir = tempfile::tempdir().map_err(|err| {
            ScannerError::Io(format!("failed to create scan results directory: {err}"))
        })?;
        let result_path = results_dir.path().join(RESULT_FILE_NAME);

        let mut command = Command::new(&self.path);
        command
            .arg("-s")
            .arg(source.path())
            .arg("-r")
            .arg(&result_path)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(err)) => {
                return Err(ScannerError::Spawn {
                    path: self.path.display().to_string(),
                    message: err.to_string(),
                })
            }
            // kill_on_drop reaps the child once the output future is dropped.
            Err(_) => {
                return Err(ScannerError::Timeout {
                    seconds: self.timeout.as_secs(),
                })
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let error = if stderr.is_empty() {
                "Unknown error".to_string()
            } else {
                stderr
            };
            warn!(
                request_id = %request_id,
                exit = ?output.status.code(),
                "scan failed: {error}"
            );
            return Ok(ScanOutcome::failed(
                request_id,
                format!("Scan failed: {error}"),
                error,
            ));
        }

        // No result artifact (or an empty one) after a clean run means the
        // tool had nothing to report.
        let content = match std::fs::read_to_string(&result_path) {
            Ok(content) if !content.trim().is_empty() => content,
            _ => {
                info!(request_id = %request_id, findings = 0, "scan completed");
                return Ok(ScanOutcome::clean(request_id));
            }
        };

        match serde_json::from_str::<serde_json::Value>(&content) {
            Ok(value) => {
                let findings = parse::parse_results(&value);
                info!(request_id = %request_id, findings = findings.len(), "scan completed");
                if findings.is_empty() {
                    Ok(ScanOutcome::clean(request_id))
                } else {
                    Ok(ScanOutcome::with_findings(request_id, findings))
                }
            }
            Err(err) => {
                warn!(request_id = %request_id, "failed to parse scan results: {err}");
                Ok(ScanOutcome::failed(
                    request_id,
                    format!("Failed to parse scan results: {err}"),
                    err.to_string(),
                ))
            }
        }
    }
}

/// Prefer the synthesized filename's extension; fall back to the
/// language's canonical one.
fn extension_for(filename: &str, lang: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| language::file_extension(lang).to_string())
}

impl Scanner for CliScanner {
    fn scan<'a>(
        &'a self,
        code: &'a str,
        language: &'a str,
        filename: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<ScanOutcome, ScannerError>> + Send + 'a>> {
        Box::pin(self.run_scan(code, language, filename))
    }

    fn health_check<'a>(&'a self) -> Pin<Box<dyn Future<Output = bool> + Send + 'a>> {
        Box::pin(async move {
            let mut command = Command::new(&self.path);
            command
                .arg("-v")
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true);

            match tokio::time::timeout(HEALTH_TIMEOUT, command.output()).await {
                Ok(Ok(output)) => {
                    // The tool signals a healthy install from its version
                    // query with exit code 1, not 0. Match it exactly.
                    let healthy = output.status.code() == Some(self.healthy_exit_code);
                    debug!(exit = ?output.status.code(), healthy, "scanner health check");
                    healthy
                }
                Ok(Err(err)) => {
                    warn!("scanner health check failed: {err}");
                    false
                }
                Err(_) => {
                    warn!("scanner health check timed out");
                    false
                }
            }
        })
    }
}
