//! Append-only conversation history.

use crate::types::{Role, Turn};

/// Ordered log of turns for one session.
///
/// The first entry is always the system turn given at construction. There is
/// no edit or delete operation; the log only grows.
#[derive(Debug, Clone)]
pub struct TranscriptStore {
    turns: Vec<Turn>,
}

impl TranscriptStore {
    /// Start a transcript containing exactly one system turn.
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            turns: vec![Turn::system(system_prompt)],
        }
    }

    /// Append a turn at the end and return a copy of it.
    ///
    /// Content is stored as given, including the empty string. Dialogue shape
    /// is the caller's concern.
    pub fn append(&mut self, role: Role, content: impl Into<String>) -> Turn {
        let turn = Turn::new(role, content);
        self.turns.push(turn.clone());
        turn
    }

    /// Owned copy of the full history, in order.
    pub fn snapshot(&self) -> Vec<Turn> {
        self.turns.clone()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Always false; the system turn is present from construction.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn system_prompt(&self) -> &str {
        self.turns[0].content()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Number of turns with the given role.
    pub fn count(&self, role: Role) -> usize {
        self.turns.iter().filter(|t| t.role() == role).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn shape(store: &TranscriptStore) -> Vec<(Role, String)> {
        store
            .turns()
            .iter()
            .map(|t| (t.role(), t.content().to_string()))
            .collect()
    }

    #[test]
    fn starts_with_single_system_turn() {
        let store = TranscriptStore::new("be brief");
        assert_eq!(shape(&store), vec![(Role::System, "be brief".to_string())]);
        assert_eq!(store.system_prompt(), "be brief");
        assert!(!store.is_empty());
    }

    #[test]
    fn append_preserves_order_and_returns_turn() {
        let mut store = TranscriptStore::new("sys");
        let user = store.append(Role::User, "Hi");
        let reply = store.append(Role::Assistant, "Hello!");

        assert_eq!(user.role(), Role::User);
        assert_eq!(reply.content(), "Hello!");
        assert_eq!(
            shape(&store),
            vec![
                (Role::System, "sys".to_string()),
                (Role::User, "Hi".to_string()),
                (Role::Assistant, "Hello!".to_string()),
            ]
        );
    }

    #[test]
    fn append_accepts_empty_content_and_any_order() {
        let mut store = TranscriptStore::new("sys");
        store.append(Role::Assistant, "");
        store.append(Role::Assistant, "twice");

        assert_eq!(store.len(), 3);
        assert_eq!(store.count(Role::Assistant), 2);
        assert_eq!(store.turns()[1].content(), "");
    }

    #[test]
    fn snapshot_is_detached_from_later_appends() {
        let mut store = TranscriptStore::new("sys");
        store.append(Role::User, "one");
        let snapshot = store.snapshot();
        store.append(Role::Assistant, "two");

        assert_eq!(snapshot.len(), 2);
        assert_eq!(store.len(), 3);
        assert_eq!(snapshot[..], store.turns()[..2]);
    }
}
