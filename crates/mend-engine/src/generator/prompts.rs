use mend_core::RemediationRequest;

/// System instruction fixing the remediation-expert persona and the
/// code-only output contract.
pub const REMEDIATION_SYSTEM: &str = r#"You are a security remediation expert. Your task is to provide ONLY secure code snippets that fix the specified vulnerability.

Rules:
1. Respond with ONLY the code snippet - no explanations, no markdown formatting
2. The code must be syntactically correct and secure
3. Use the exact programming language specified in the request
4. Focus specifically on fixing the vulnerability described

The code should demonstrate the secure way to implement the functionality."#;

/// Follow-up instruction for retry attempts. Deliberately short: the
/// conversation history already carries the prior candidate and the
/// scanner's feedback.
pub const RETRY_INSTRUCTION: &str = "Based on the previous security analysis feedback, please provide an improved and more secure version.";

/// First-attempt instruction embedding the vulnerability details.
pub fn initial_instruction(request: &RemediationRequest) -> String {
    format!(
        "Language: {}\nRule: {}\nDescription: {}\nRemediation Advice: {}\n\nProvide a secure code snippet that fixes this vulnerability.",
        request.language, request.rule_name, request.description, request.remediation_advice
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_instruction_embeds_every_request_field() {
        let request = RemediationRequest {
            language: "go".to_string(),
            rule_name: "Unsafe SQL Query Construction".to_string(),
            description: "String concatenation in queries".to_string(),
            remediation_advice: "Use parameterized queries".to_string(),
        };
        let prompt = initial_instruction(&request);
        assert!(prompt.contains("Language: go"));
        assert!(prompt.contains("Rule: Unsafe SQL Query Construction"));
        assert!(prompt.contains("Description: String concatenation in queries"));
        assert!(prompt.contains("Remediation Advice: Use parameterized queries"));
        assert!(prompt.ends_with("Provide a secure code snippet that fixes this vulnerability."));
    }
}
