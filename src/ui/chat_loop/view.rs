//! Per-session TUI state that lives outside the shared store: the input
//! buffer, scroll position, notices and the staged attachment.

use std::time::Instant;

use tracing::warn;
use tui_textarea::TextArea;

use crate::core::conversation::Conversation;
use crate::core::generation::ImageAttachment;
use crate::utils::logging::LoggingState;

pub struct ChatView {
    pub textarea: TextArea<'static>,
    pub scroll_offset: u16,
    pub auto_scroll: bool,
    /// Height of the transcript viewport at the last draw.
    pub viewport_height: u16,
    max_scroll: u16,
    /// One-line feedback shown in the input border until the next submit.
    pub notice: Option<String>,
    pub staged_image: Option<ImageAttachment>,
    pub logging: LoggingState,
    logged_upto: usize,
    pub pulse_start: Instant,
}

impl ChatView {
    pub fn new(logging: LoggingState) -> Self {
        Self {
            textarea: TextArea::default(),
            scroll_offset: 0,
            auto_scroll: true,
            viewport_height: 0,
            max_scroll: 0,
            notice: None,
            staged_image: None,
            logging,
            logged_upto: 0,
            pulse_start: Instant::now(),
        }
    }

    /// Take the typed text and clear the input.
    pub fn take_input(&mut self) -> String {
        let text = self.textarea.lines().join("\n");
        self.textarea = TextArea::default();
        text
    }

    pub fn staged_image_name(&self) -> Option<&str> {
        self.staged_image
            .as_ref()
            .map(|image| image.file_name.as_deref().unwrap_or("imagem"))
    }

    /// Record the viewport and return the offset to draw with.
    pub fn clamp_scroll(&mut self, total_lines: u16, viewport_height: u16) -> u16 {
        self.viewport_height = viewport_height;
        self.max_scroll = total_lines.saturating_sub(viewport_height);
        if self.auto_scroll || self.scroll_offset > self.max_scroll {
            self.scroll_offset = self.max_scroll;
        }
        self.scroll_offset
    }

    pub fn scroll_up(&mut self, rows: u16) {
        self.auto_scroll = false;
        self.scroll_offset = self.scroll_offset.saturating_sub(rows);
    }

    pub fn scroll_down(&mut self, rows: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(rows).min(self.max_scroll);
        if self.scroll_offset >= self.max_scroll {
            self.auto_scroll = true;
        }
    }

    pub fn page_rows(&self) -> u16 {
        self.viewport_height.saturating_sub(1).max(1)
    }

    /// Append every message not yet written to the transcript log.
    pub fn log_new_messages(&mut self, conversation: &Conversation) {
        for message in conversation.since(self.logged_upto) {
            if let Err(err) = self.logging.log_message(&message) {
                warn!(error = %err, "transcript write failed");
                self.notice = Some(format!("Erro de log: {err}"));
            }
        }
        self.logged_upto = conversation.len();
    }

    /// Forget what was logged after the conversation is restarted.
    pub fn reset_log_cursor(&mut self) {
        self.logged_upto = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::ConversationMessage;
    use tempfile::TempDir;

    #[test]
    fn auto_scroll_follows_the_bottom() {
        let mut view = ChatView::new(LoggingState::default());
        assert_eq!(view.clamp_scroll(50, 10), 40);
        assert_eq!(view.clamp_scroll(60, 10), 50);
    }

    #[test]
    fn manual_scroll_sticks_until_bottom_reached() {
        let mut view = ChatView::new(LoggingState::default());
        view.clamp_scroll(50, 10);

        view.scroll_up(5);
        assert!(!view.auto_scroll);
        assert_eq!(view.clamp_scroll(60, 10), 35);

        view.scroll_down(100);
        assert!(view.auto_scroll);
        assert_eq!(view.scroll_offset, 50);
    }

    #[test]
    fn take_input_joins_lines_and_clears() {
        let mut view = ChatView::new(LoggingState::default());
        view.textarea.insert_str("olá");
        assert_eq!(view.take_input(), "olá");
        assert_eq!(view.take_input(), "");
    }

    #[test]
    fn logs_each_message_once() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("t.log").to_string_lossy().into_owned();
        let mut view = ChatView::new(LoggingState::new(Some(path.clone())).expect("log"));
        let conversation = Conversation::new();

        conversation.append(ConversationMessage::user("um"));
        view.log_new_messages(&conversation);
        conversation.append(ConversationMessage::assistant("dois"));
        view.log_new_messages(&conversation);

        let contents = std::fs::read_to_string(path).expect("read");
        assert_eq!(contents, "Você: um\n\ndois\n\n");
    }
}
