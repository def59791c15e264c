//! Language allow-list checks and canonical file extensions.

/// Canonical source-file extension for a supported language.
///
/// The scanner keys its language detection off the filename, so the
/// extension must match what the analysis tool expects. Unknown languages
/// fall back to `txt`.
pub fn file_extension(language: &str) -> &'static str {
    match language.to_lowercase().as_str() {
        "python" => "py",
        "javascript" => "js",
        "java" => "java",
        "go" => "go",
        "csharp" | "c#" => "cs",
        _ => "txt",
    }
}

/// Synthesized filename handed to the scanner for a generated snippet.
pub fn scan_filename(language: &str) -> String {
    format!("remediation.{}", file_extension(language))
}

/// Case-insensitive membership check against the configured allow-list.
pub fn is_allowed(language: &str, allowed: &[String]) -> bool {
    allowed
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(language))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allow_list() -> Vec<String> {
        ["python", "javascript", "java", "go", "csharp", "c#"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn extensions_cover_supported_languages() {
        assert_eq!(file_extension("python"), "py");
        assert_eq!(file_extension("JavaScript"), "js");
        assert_eq!(file_extension("java"), "java");
        assert_eq!(file_extension("go"), "go");
        assert_eq!(file_extension("csharp"), "cs");
        assert_eq!(file_extension("C#"), "cs");
        assert_eq!(file_extension("cobol"), "txt");
    }

    #[test]
    fn scan_filename_uses_canonical_extension() {
        assert_eq!(scan_filename("go"), "remediation.go");
        assert_eq!(scan_filename("Python"), "remediation.py");
    }

    #[test]
    fn allow_list_check_is_case_insensitive() {
        let allowed = allow_list();
        assert!(is_allowed("go", &allowed));
        assert!(is_allowed("GO", &allowed));
        assert!(is_allowed("Python", &allowed));
        assert!(!is_allowed("cobol", &allowed));
        assert!(!is_allowed("", &allowed));
    }
}
