//! Best-effort extraction of code from a conversational model response.

/// Leading tokens that mark a line as explanation rather than code.
const PROSE_PREFIXES: &[&str] = &["Here", "This", "The", "Note:", "Remember:", "Example:"];

/// Strip conversational wrapping (code fences, explanatory sentences)
/// from a model response.
///
/// This is a line-based heuristic, not a parser: fence lines toggle state
/// and are dropped, and outside a fence any line opening with a known
/// prose token is dropped. Lines inside a fence are always kept, so code
/// that happens to start with "The" survives. If cleaning would erase
/// everything, the raw trimmed text is returned instead - losing content
/// is worse than returning prose.
pub fn clean_code_response(response: &str) -> String {
    let mut kept = Vec::new();
    let mut in_code_block = false;

    for line in response.lines() {
        if line.trim().starts_with("```") {
            in_code_block = !in_code_block;
            continue;
        }
        if in_code_block || !is_prose_line(line) {
            kept.push(line);
        }
    }

    let cleaned = kept.join("\n").trim().to_string();
    if cleaned.is_empty() {
        response.trim().to_string()
    } else {
        cleaned
    }
}

fn is_prose_line(line: &str) -> bool {
    let trimmed = line.trim();
    PROSE_PREFIXES
        .iter()
        .any(|prefix| trimmed.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_fences_and_surrounding_prose() {
        let response = "Here is the fixed code:\n```go\nquery := \"SELECT * FROM users WHERE id = ?\"\n```\nThis version uses parameterized queries.";
        assert_eq!(
            clean_code_response(response),
            "query := \"SELECT * FROM users WHERE id = ?\""
        );
    }

    #[test]
    fn keeps_prose_looking_lines_inside_a_fence() {
        let response = "```python\nThe_answer = compute()\nprint(The_answer)\n```";
        assert_eq!(
            clean_code_response(response),
            "The_answer = compute()\nprint(The_answer)"
        );
    }

    #[test]
    fn plain_code_passes_through_unchanged() {
        let response = "import hashlib\nhashlib.sha256(data).hexdigest()";
        assert_eq!(clean_code_response(response), response);
    }

    #[test]
    fn drops_note_lines_outside_fences() {
        let response = "x = sanitize(y)\nNote: always sanitize input";
        assert_eq!(clean_code_response(response), "x = sanitize(y)");
    }

    #[test]
    fn prose_only_response_falls_back_to_raw_text() {
        let response = "  Here is what I would do instead.  ";
        assert_eq!(
            clean_code_response(response),
            "Here is what I would do instead."
        );
    }

    #[test]
    fn empty_response_stays_empty() {
        assert_eq!(clean_code_response(""), "");
    }
}
