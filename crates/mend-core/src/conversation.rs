//! Conversation state accumulated across remediation attempts.
//!
//! History is request-local and append-only: each failed attempt adds the
//! assistant's candidate plus the scanner's feedback, and a generator error
//! adds a single error note. Nothing is persisted beyond the request.

use serde::{Deserialize, Serialize};

/// Who produced a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    System,
    User,
    Assistant,
    ScanFeedback,
    ErrorNote,
}

impl Role {
    /// Map to the role vocabulary chat providers actually understand.
    ///
    /// Scan feedback is delivered as a user turn so the model treats it as
    /// instructions to act on; error notes ride along as system context.
    pub fn as_wire_role(&self) -> &'static str {
        match self {
            Role::System | Role::ErrorNote => "system",
            Role::User | Role::ScanFeedback => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A single turn in the remediation conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_roles_collapse_to_provider_vocabulary() {
        assert_eq!(Role::System.as_wire_role(), "system");
        assert_eq!(Role::ErrorNote.as_wire_role(), "system");
        assert_eq!(Role::User.as_wire_role(), "user");
        assert_eq!(Role::ScanFeedback.as_wire_role(), "user");
        assert_eq!(Role::Assistant.as_wire_role(), "assistant");
    }

    #[test]
    fn turn_construction_accepts_str_and_string() {
        let a = ConversationTurn::new(Role::Assistant, "code");
        let b = ConversationTurn::new(Role::Assistant, String::from("code"));
        assert_eq!(a, b);
    }
}
