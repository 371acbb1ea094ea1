//! Conversation store - the append-only message log of a session

use portal_core::{Message, MessageId, Sender};

use crate::error::SubmitRejected;

#[derive(Debug, Clone)]
pub struct ConversationStore {
    messages: Vec<Message>,
    started: bool,
    pending_query: bool,
    input: String,
    next_id: MessageId,
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationStore {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            started: false,
            pending_query: false,
            input: String::new(),
            next_id: MessageId::new(1),
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Whether the first query has been submitted.
    pub fn started(&self) -> bool {
        self.started
    }

    pub fn pending_query(&self) -> bool {
        self.pending_query
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Append the trimmed query as a user message and mark it pending.
    ///
    /// Rejected submissions leave the store untouched.
    pub fn submit_user_query(&mut self, text: &str) -> Result<MessageId, SubmitRejected> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SubmitRejected::EmptyQuery);
        }
        if self.pending_query {
            return Err(SubmitRejected::RequestAlreadyPending);
        }

        let id = self.push(text, Sender::User);
        self.started = true;
        self.input.clear();
        self.pending_query = true;
        Ok(id)
    }

    /// Append a bot message. This ends the pending query.
    pub fn append_bot_message(&mut self, text: impl Into<String>) -> MessageId {
        let id = self.push(text.into(), Sender::Bot);
        self.pending_query = false;
        id
    }

    fn push(&mut self, text: impl Into<String>, sender: Sender) -> MessageId {
        let id = self.next_id;
        self.next_id = id.next();
        self.messages.push(Message::new(id, text, sender));
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_appends_trimmed_user_message() {
        let mut store = ConversationStore::new();
        store.set_input("  solar rooftop subsidy  ");

        let id = store.submit_user_query("  solar rooftop subsidy  ").unwrap();

        assert_eq!(store.messages().len(), 1);
        assert_eq!(store.messages()[0].id(), id);
        assert_eq!(store.messages()[0].text(), "solar rooftop subsidy");
        assert_eq!(store.messages()[0].sender(), Sender::User);
        assert!(store.started());
        assert!(store.pending_query());
        assert!(store.input().is_empty());
    }

    #[test]
    fn whitespace_query_changes_nothing() {
        let mut store = ConversationStore::new();
        store.set_input(" \t\n");

        assert_eq!(
            store.submit_user_query(" \t\n"),
            Err(SubmitRejected::EmptyQuery)
        );
        assert!(store.messages().is_empty());
        assert!(!store.pending_query());
        assert!(!store.started());
        assert_eq!(store.input(), " \t\n");
    }

    #[test]
    fn submit_while_pending_changes_nothing() {
        let mut store = ConversationStore::new();
        store.submit_user_query("first").unwrap();
        store.set_input("second");

        assert_eq!(
            store.submit_user_query("second"),
            Err(SubmitRejected::RequestAlreadyPending)
        );
        assert_eq!(store.messages().len(), 1);
        assert_eq!(store.input(), "second");
    }

    #[test]
    fn bot_message_clears_pending_and_keeps_order() {
        let mut store = ConversationStore::new();
        let user = store.submit_user_query("first").unwrap();
        let bot = store.append_bot_message("MNRE. Retrieving relevant docs...");

        assert!(bot > user);
        assert!(!store.pending_query());
        assert_eq!(store.messages()[1].sender(), Sender::Bot);

        let again = store.submit_user_query("second").unwrap();
        assert!(again > bot);
        assert_eq!(store.messages().len(), 3);
    }
}
