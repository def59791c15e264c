//! Tolerant parsing of scanner result artifacts.
//!
//! The analysis tool has shipped several field-naming variants over time.
//! Each finding field is resolved through an ordered candidate-key table
//! with a typed default, so records are normalized instead of rejected.

use mend_core::VulnerabilityFinding;
use serde_json::{Map, Value};

const RULE_ID_KEYS: &[&str] = &["rule_id", "ruleId"];
const LANGUAGE_KEYS: &[&str] = &["language"];
const RULE_KEYS: &[&str] = &["rule_name", "ruleName", "rule"];
const SEVERITY_KEYS: &[&str] = &["severity"];
const FILE_KEYS: &[&str] = &["file", "fileName", "filename"];
const LINE_KEYS: &[&str] = &["line", "lineNumber", "line_number"];
const CONTENT_KEYS: &[&str] = &["content", "problematic_line", "code"];
// Both misspellings are what the tool actually emits.
const ADVICE_KEYS: &[&str] = &["remediationAdvise", "remediationAadvice", "advice"];
const DESCRIPTION_KEYS: &[&str] = &["description", "desc"];

/// Extract findings from a parsed result document.
///
/// Accepted shapes: `{"results": [...]}`, `{"vulnerabilities": [...]}`,
/// a bare array, or a single record object. Anything else yields no
/// findings - scanner silence is read as "nothing to report".
pub fn parse_results(value: &Value) -> Vec<VulnerabilityFinding> {
    let records: Vec<&Value> = match value {
        Value::Object(map) => {
            if map.contains_key("results") {
                array_records(map.get("results"))
            } else if map.contains_key("vulnerabilities") {
                array_records(map.get("vulnerabilities"))
            } else {
                vec![value]
            }
        }
        Value::Array(items) => items.iter().collect(),
        _ => Vec::new(),
    };

    records.into_iter().map(parse_record).collect()
}

fn array_records(value: Option<&Value>) -> Vec<&Value> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().collect())
        .unwrap_or_default()
}

fn parse_record(record: &Value) -> VulnerabilityFinding {
    let Some(map) = record.as_object() else {
        // Keep the scan result alive with a synthetic marker instead of
        // aborting the whole scan over one bad record.
        return parse_error_finding(format!("Failed to parse scan result record: {record}"));
    };

    let defaults = VulnerabilityFinding::default();
    VulnerabilityFinding {
        rule_id: int_field(map, RULE_ID_KEYS, defaults.rule_id),
        language: string_field(map, LANGUAGE_KEYS, &defaults.language),
        rule: string_field(map, RULE_KEYS, &defaults.rule),
        severity: string_field(map, SEVERITY_KEYS, &defaults.severity),
        file: string_field(map, FILE_KEYS, &defaults.file),
        line: int_field(map, LINE_KEYS, defaults.line),
        content: string_field(map, CONTENT_KEYS, ""),
        remediation_advice: string_field(map, ADVICE_KEYS, ""),
        description: string_field(map, DESCRIPTION_KEYS, ""),
    }
}

fn parse_error_finding(message: String) -> VulnerabilityFinding {
    VulnerabilityFinding {
        rule: "Parse Error".to_string(),
        severity: "low".to_string(),
        description: message,
        ..VulnerabilityFinding::default()
    }
}

fn string_field(map: &Map<String, Value>, keys: &[&str], default: &str) -> String {
    keys.iter()
        .find_map(|key| map.get(*key).and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| default.to_string())
}

fn int_field(map: &Map<String, Value>, keys: &[&str], default: i64) -> i64 {
    keys.iter()
        .find_map(|key| map.get(*key).and_then(Value::as_i64))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn key_variants_normalize_to_the_same_finding() {
        let snake = json!([{
            "rule_id": 42,
            "rule_name": "SQL Injection",
            "file": "main.go",
            "line": 7,
            "problematic_line": "db.Query(q)",
            "remediationAdvise": "use parameters",
            "description": "concatenated query"
        }]);
        let camel = json!([{
            "ruleId": 42,
            "ruleName": "SQL Injection",
            "fileName": "main.go",
            "lineNumber": 7,
            "content": "db.Query(q)",
            "remediationAadvice": "use parameters",
            "desc": "concatenated query"
        }]);

        let a = parse_results(&snake);
        let b = parse_results(&camel);
        assert_eq!(a, b);
        assert_eq!(a[0].rule_id, 42);
        assert_eq!(a[0].rule, "SQL Injection");
        assert_eq!(a[0].file, "main.go");
        assert_eq!(a[0].line, 7);
        assert_eq!(a[0].content, "db.Query(q)");
        assert_eq!(a[0].remediation_advice, "use parameters");
        assert_eq!(a[0].description, "concatenated query");
    }

    #[test]
    fn missing_fields_get_defensive_defaults() {
        let findings = parse_results(&json!([{ "rule": "Weak Hash" }]));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, "Weak Hash");
        assert_eq!(findings[0].rule_id, 0);
        assert_eq!(findings[0].severity, "medium");
        assert_eq!(findings[0].file, "unknown");
        assert_eq!(findings[0].line, 1);
        assert_eq!(findings[0].language, "unknown");
    }

    #[test]
    fn results_and_vulnerabilities_wrappers_are_equivalent() {
        let record = json!({ "rule": "XSS", "line": 3 });
        let a = parse_results(&json!({ "results": [record.clone()] }));
        let b = parse_results(&json!({ "vulnerabilities": [record.clone()] }));
        let c = parse_results(&json!([record]));
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn single_record_object_parses_as_one_finding() {
        let findings = parse_results(&json!({ "rule": "Path Traversal" }));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, "Path Traversal");
    }

    #[test]
    fn null_results_key_yields_no_findings() {
        assert!(parse_results(&json!({ "results": null })).is_empty());
        assert!(parse_results(&json!({ "results": [] })).is_empty());
    }

    #[test]
    fn scalar_document_yields_no_findings() {
        assert!(parse_results(&json!("nothing")).is_empty());
        assert!(parse_results(&json!(17)).is_empty());
    }

    #[test]
    fn non_object_record_degrades_to_parse_error_finding() {
        let findings = parse_results(&json!(["not a record"]));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, "Parse Error");
        assert_eq!(findings[0].severity, "low");
        assert!(findings[0].description.contains("not a record"));
    }
}
