use tracing::debug;

use crate::model::message::{Message, Role};

/// Opening model turn every conversation starts from.
pub const GREETING: &str = "Do you have any question?";

/// Append-only, ordered list of turns sent verbatim as context on each call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversationHistory {
    messages: Vec<Message>,
}

impl ConversationHistory {
    /// Start a conversation seeded with the greeting.
    pub fn new() -> Self {
        Self {
            messages: vec![Message::model(GREETING)],
        }
    }

    pub fn append(&mut self, role: Role, text: impl Into<String>) {
        self.messages.push(Message::new(role, text));
        debug!(
            role = role.as_str(),
            turns = self.messages.len(),
            "conversation turn appended"
        );
    }

    /// Copy of every turn in conversation order.
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.clone()
    }

    /// Reinitialize to the seeded greeting, discarding every other turn.
    pub fn reset(&mut self) {
        self.messages = vec![Message::model(GREETING)];
        debug!("conversation reset");
    }
}

impl Default for ConversationHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{ConversationHistory, GREETING};
    use crate::model::message::{Message, Role};

    #[test]
    fn starts_with_greeting() {
        let history = ConversationHistory::new();
        assert_eq!(history.snapshot(), vec![Message::model(GREETING)]);
    }

    #[test]
    fn appends_keep_order() {
        let mut history = ConversationHistory::new();
        history.append(Role::User, "Hello");
        history.append(Role::Model, "Hi there");

        assert_eq!(
            history.snapshot(),
            vec![
                Message::model(GREETING),
                Message::user("Hello"),
                Message::model("Hi there"),
            ]
        );
        assert_eq!(history.snapshot().len(), 3);
    }

    #[test]
    fn reset_restores_single_greeting() {
        let mut history = ConversationHistory::new();
        history.append(Role::User, "one");
        history.append(Role::User, "two");
        history.reset();

        assert_eq!(history.snapshot().len(), 1);
        assert_eq!(history, ConversationHistory::new());
    }

    #[test]
    fn snapshot_is_detached() {
        let mut history = ConversationHistory::new();
        let before = history.snapshot();
        history.append(Role::User, "later");
        assert_eq!(before.len(), 1);
    }
}
