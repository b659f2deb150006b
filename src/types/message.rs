//! Conversation turns.

use chrono::{DateTime, Utc};
use strum::Display;

/// One role-tagged entry in the conversation.
///
/// Turns are immutable once created: the fields are private and only
/// exposed through accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    role: Role,
    content: String,
    timestamp: DateTime<Utc>,
}

impl Turn {
    /// Create a turn with an explicit role.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a system turn.
    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Role::System, text)
    }

    /// Create a user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    /// Create an assistant turn.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Conversation role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Wire name used by chat-completions APIs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_wire_name() {
        for role in [Role::System, Role::User, Role::Assistant] {
            assert_eq!(role.to_string(), role.as_str());
        }
    }

    #[test]
    fn constructors_set_role() {
        let turn = Turn::assistant("hi");
        assert_eq!(turn.role(), Role::Assistant);
        assert_eq!(turn.content(), "hi");
    }
}
