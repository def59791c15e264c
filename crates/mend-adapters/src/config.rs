//! Configuration for the mend service.
//!
//! Built once at process start from `MEND_*` environment variables and
//! passed by reference into the engine and HTTP layer; there is no global
//! settings singleton. Malformed values degrade to defaults with a warning
//! rather than failing startup.

use std::path::PathBuf;
use std::str::FromStr;
use tracing::warn;

const DEFAULT_ALLOWED_LANGUAGES: &[&str] = &["python", "javascript", "java", "go", "csharp", "c#"];

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub generator: GeneratorConfig,
    pub scanner: ScannerConfig,
    pub remediation: RemediationConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub host: String,
    pub port: u16,
    pub model: String,
    pub timeout_secs: u64,
}

impl GeneratorConfig {
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// Path to the external analysis executable.
    pub path: PathBuf,
    pub timeout_secs: u64,
    /// Exit code the executable's version query returns when healthy.
    /// The tool reports 1, not 0; see `CliScanner::health_check`.
    pub healthy_exit_code: i32,
}

#[derive(Debug, Clone)]
pub struct RemediationConfig {
    pub max_retries: usize,
    pub allowed_languages: Vec<String>,
}

impl RemediationConfig {
    pub fn supported_languages(&self) -> String {
        self.allowed_languages.join(", ")
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source. Exposed so
    /// tests can drive parsing without mutating the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            server: ServerConfig {
                host: string_var(&lookup, "MEND_HOST", "0.0.0.0"),
                port: parsed_var(&lookup, "MEND_PORT", 8000),
            },
            generator: GeneratorConfig {
                host: string_var(&lookup, "MEND_OLLAMA_HOST", "127.0.0.1"),
                port: parsed_var(&lookup, "MEND_OLLAMA_PORT", 11434),
                model: string_var(&lookup, "MEND_OLLAMA_MODEL", "llama3.2"),
                timeout_secs: parsed_var(&lookup, "MEND_OLLAMA_TIMEOUT_SECS", 60),
            },
            scanner: ScannerConfig {
                path: PathBuf::from(string_var(
                    &lookup,
                    "MEND_SCANNER_PATH",
                    "resources/scanner-cli",
                )),
                timeout_secs: parsed_var(&lookup, "MEND_SCANNER_TIMEOUT_SECS", 120),
                healthy_exit_code: parsed_var(&lookup, "MEND_SCANNER_HEALTHY_EXIT_CODE", 1),
            },
            remediation: RemediationConfig {
                max_retries: parsed_var(&lookup, "MEND_MAX_RETRIES", 5),
                allowed_languages: language_list_var(&lookup, "MEND_ALLOWED_LANGUAGES"),
            },
        }
    }
}

fn string_var(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: &str) -> String {
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => default.to_string(),
    }
}

fn parsed_var<T: FromStr + Copy>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> T {
    match lookup(name) {
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!("ignoring malformed {name}={raw:?}, using default");
                default
            }
        },
        None => default,
    }
}

fn language_list_var(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Vec<String> {
    let configured = lookup(name).map(|raw| {
        raw.split(',')
            .map(|entry| entry.trim().to_lowercase())
            .filter(|entry| !entry.is_empty())
            .collect::<Vec<_>>()
    });

    match configured {
        Some(languages) if !languages.is_empty() => languages,
        _ => DEFAULT_ALLOWED_LANGUAGES
            .iter()
            .map(|s| s.to_string())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.generator.base_url(), "http://127.0.0.1:11434");
        assert_eq!(config.generator.model, "llama3.2");
        assert_eq!(config.scanner.healthy_exit_code, 1);
        assert_eq!(config.remediation.max_retries, 5);
        assert_eq!(
            config.remediation.allowed_languages,
            vec!["python", "javascript", "java", "go", "csharp", "c#"]
        );
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("MEND_PORT", "9000"),
            ("MEND_OLLAMA_HOST", "ollama.internal"),
            ("MEND_OLLAMA_MODEL", "codellama"),
            ("MEND_MAX_RETRIES", "3"),
            ("MEND_SCANNER_PATH", "/opt/scanner/cli"),
        ]));
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.generator.base_url(), "http://ollama.internal:11434");
        assert_eq!(config.generator.model, "codellama");
        assert_eq!(config.remediation.max_retries, 3);
        assert_eq!(config.scanner.path, PathBuf::from("/opt/scanner/cli"));
    }

    #[test]
    fn malformed_numbers_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("MEND_PORT", "not-a-port"),
            ("MEND_MAX_RETRIES", ""),
        ]));
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.remediation.max_retries, 5);
    }

    #[test]
    fn language_list_parses_comma_separated_and_lowercases() {
        let config = Config::from_lookup(lookup_from(&[(
            "MEND_ALLOWED_LANGUAGES",
            "Go, Python , rust,,",
        )]));
        assert_eq!(
            config.remediation.allowed_languages,
            vec!["go", "python", "rust"]
        );
    }

    #[test]
    fn empty_language_list_keeps_defaults() {
        let config = Config::from_lookup(lookup_from(&[("MEND_ALLOWED_LANGUAGES", " , ")]));
        assert_eq!(config.remediation.allowed_languages.len(), 6);
    }

    #[test]
    fn supported_languages_renders_joined_list() {
        let config = Config::from_lookup(lookup_from(&[("MEND_ALLOWED_LANGUAGES", "go,python")]));
        assert_eq!(config.remediation.supported_languages(), "go, python");
    }
}
