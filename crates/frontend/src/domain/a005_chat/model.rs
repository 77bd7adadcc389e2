//! Conversation state of the floating chat widget.

use crate::shared::error::AppError;
use contracts::domain::a005_chat::ChatHistoryEntry;

pub const GREETING: &str = "Xin chào! Bạn muốn hỏi gì về tài chính hôm nay?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: u64,
    pub sender: Sender,
    pub text: String,
    pub is_error: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryState {
    NotLoaded,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatState {
    open: bool,
    history: HistoryState,
    messages: Vec<ChatMessage>,
    in_flight: bool,
    next_id: u64,
}

impl Default for ChatState {
    fn default() -> Self {
        Self {
            open: false,
            history: HistoryState::NotLoaded,
            messages: Vec::new(),
            in_flight: false,
            next_id: 0,
        }
    }
}

impl ChatState {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn history(&self) -> HistoryState {
        self.history
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Opens or closes the panel. Returns `true` when the history should be
    /// fetched now: on the first open, or after a failed attempt.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        if self.open && matches!(self.history, HistoryState::NotLoaded | HistoryState::Failed) {
            self.history = HistoryState::Loading;
            return true;
        }
        false
    }

    fn message(&mut self, sender: Sender, text: impl Into<String>, is_error: bool) -> ChatMessage {
        self.next_id += 1;
        ChatMessage {
            id: self.next_id,
            sender,
            text: text.into(),
            is_error,
        }
    }

    /// Puts stored history ahead of anything typed while it was loading.
    pub fn history_loaded(&mut self, entries: Vec<ChatHistoryEntry>) {
        let mut earlier = Vec::new();
        for entry in entries {
            if let Some(text) = entry.message.filter(|t| !t.is_empty()) {
                earlier.push(self.message(Sender::User, text, false));
            }
            if let Some(text) = entry.reply.filter(|t| !t.is_empty()) {
                earlier.push(self.message(Sender::Bot, text, false));
            }
        }
        if earlier.is_empty() && self.messages.is_empty() {
            earlier.push(self.message(Sender::Bot, GREETING, false));
        }
        self.messages.splice(0..0, earlier);
        self.history = HistoryState::Loaded;
    }

    pub fn history_failed(&mut self) {
        self.history = HistoryState::Failed;
    }

    /// Appends the user's message and returns the text to send, or `None`
    /// for blank input or while a reply is pending.
    pub fn begin_send(&mut self, input: &str) -> Option<String> {
        let text = input.trim();
        if text.is_empty() || self.in_flight {
            return None;
        }
        let msg = self.message(Sender::User, text, false);
        self.messages.push(msg);
        self.in_flight = true;
        Some(text.to_string())
    }

    pub fn finish_send(&mut self, result: Result<String, AppError>) {
        let msg = match result {
            Ok(reply) => self.message(Sender::Bot, reply, false),
            Err(err) => self.message(Sender::Bot, format!("Lỗi: {}", err.detail()), true),
        };
        self.messages.push(msg);
        self.in_flight = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(message: Option<&str>, reply: Option<&str>) -> ChatHistoryEntry {
        ChatHistoryEntry {
            message: message.map(str::to_string),
            reply: reply.map(str::to_string),
        }
    }

    fn texts(state: &ChatState) -> Vec<(Sender, &str)> {
        state
            .messages()
            .iter()
            .map(|m| (m.sender, m.text.as_str()))
            .collect()
    }

    #[test]
    fn history_is_loaded_on_first_open_only() {
        let mut state = ChatState::default();
        assert!(state.toggle());
        state.history_loaded(vec![entry(Some("Lãi suất?"), Some("6,5%")), entry(None, Some("Chào"))]);
        assert_eq!(
            texts(&state),
            vec![(Sender::User, "Lãi suất?"), (Sender::Bot, "6,5%"), (Sender::Bot, "Chào")]
        );

        assert!(!state.toggle());
        assert!(!state.is_open());
        assert!(!state.toggle());
        assert_eq!(state.messages().len(), 3);
    }

    #[test]
    fn empty_history_greets_and_failure_retries() {
        let mut state = ChatState::default();
        assert!(state.toggle());
        state.history_failed();
        state.toggle();
        assert!(state.toggle());
        assert_eq!(state.history(), HistoryState::Loading);
        state.history_loaded(Vec::new());
        assert_eq!(texts(&state), vec![(Sender::Bot, GREETING)]);
    }

    #[test]
    fn sending_blocks_until_settled() {
        let mut state = ChatState::default();
        assert_eq!(state.begin_send("   "), None);
        assert_eq!(state.begin_send("  Chi tiêu tháng này? ").as_deref(), Some("Chi tiêu tháng này?"));
        assert!(state.in_flight());
        assert_eq!(state.begin_send("nữa"), None);

        state.finish_send(Err(AppError::Request {
            status: 500,
            message: "quá tải".into(),
        }));
        assert!(!state.in_flight());
        let last = state.messages().last().unwrap();
        assert_eq!(last.text, "Lỗi: quá tải");
        assert!(last.is_error);

        assert!(state.begin_send("thử lại").is_some());
        state.finish_send(Ok("Được".into()));
        assert_eq!(state.messages().len(), 4);
    }

    #[test]
    fn history_goes_before_early_messages() {
        let mut state = ChatState::default();
        state.toggle();
        state.begin_send("xin chào");
        state.history_loaded(vec![entry(Some("cũ"), Some("đáp cũ"))]);
        assert_eq!(
            texts(&state),
            vec![(Sender::User, "cũ"), (Sender::Bot, "đáp cũ"), (Sender::User, "xin chào")]
        );
        let ids: Vec<u64> = state.messages().iter().map(|m| m.id).collect();
        let mut unique = ids.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), ids.len());
    }
}
