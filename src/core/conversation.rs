use std::cell::RefCell;
use std::rc::Rc;

use crate::core::constants::GREETING_TEXT;
use crate::core::message::{ConversationMessage, MessageId};

/// Append-only conversation log, oldest message first.
///
/// Like the store, this is a shared handle: the orchestrator appends while
/// the renderer reads, both on the event-loop thread.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Rc<RefCell<Vec<ConversationMessage>>>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// A conversation opened by the assistant greeting.
    pub fn with_greeting() -> Self {
        let conversation = Self::new();
        conversation.append(ConversationMessage::assistant(GREETING_TEXT));
        conversation
    }

    /// Drop every message and start over from the greeting.
    pub fn restart(&self) {
        let mut messages = self.messages.borrow_mut();
        messages.clear();
        messages.push(ConversationMessage::assistant(GREETING_TEXT));
    }

    pub fn append(&self, message: ConversationMessage) -> MessageId {
        let id = message.id.clone();
        self.messages.borrow_mut().push(message);
        id
    }

    pub fn len(&self) -> usize {
        self.messages.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.borrow().is_empty()
    }

    pub fn last(&self) -> Option<ConversationMessage> {
        self.messages.borrow().last().cloned()
    }

    /// Messages appended at or after `index`.
    pub fn since(&self, index: usize) -> Vec<ConversationMessage> {
        self.messages
            .borrow()
            .get(index..)
            .map(<[ConversationMessage]>::to_vec)
            .unwrap_or_default()
    }

    pub fn snapshot(&self) -> Vec<ConversationMessage> {
        self.since(0)
    }

    /// Borrow the log without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&[ConversationMessage]) -> R) -> R {
        f(&self.messages.borrow())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Author;

    #[test]
    fn restart_leaves_only_the_greeting() {
        let conversation = Conversation::with_greeting();
        conversation.append(ConversationMessage::user("oi"));
        conversation.restart();
        assert_eq!(conversation.len(), 1);
        let first = conversation.last().expect("greeting");
        assert_eq!(first.author, Author::Assistant);
        assert_eq!(first.text, GREETING_TEXT);
    }

    #[test]
    fn appends_preserve_order() {
        let conversation = Conversation::new();
        conversation.append(ConversationMessage::user("um"));
        conversation.append(ConversationMessage::assistant("dois"));
        conversation.append(ConversationMessage::user("três"));

        let texts: Vec<_> = conversation
            .snapshot()
            .into_iter()
            .map(|message| message.text)
            .collect();
        assert_eq!(texts, vec!["um", "dois", "três"]);
    }

    #[test]
    fn greeting_opens_the_conversation() {
        let conversation = Conversation::with_greeting();
        let last = conversation.last().expect("greeting");
        assert_eq!(last.author, Author::Assistant);
        assert_eq!(last.text, GREETING_TEXT);
    }

    #[test]
    fn since_returns_only_newer_messages() {
        let conversation = Conversation::with_greeting();
        let mark = conversation.len();
        conversation.append(ConversationMessage::user("novo"));

        let newer = conversation.since(mark);
        assert_eq!(newer.len(), 1);
        assert_eq!(newer[0].text, "novo");
        assert!(conversation.since(10).is_empty());
    }

    #[test]
    fn clones_share_the_same_log() {
        let conversation = Conversation::new();
        let reader = conversation.clone();
        conversation.append(ConversationMessage::user("oi"));
        assert_eq!(reader.len(), 1);
    }
}
