use serde::{Deserialize, Serialize};

/// Body of `POST /api/chatbot`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// `false` keeps one-off prompts out of the visible history.
    #[serde(rename = "saveHistory", default, skip_serializing_if = "Option::is_none")]
    pub save_history: Option<bool>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            save_history: None,
        }
    }

    pub fn without_history(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            save_history: Some(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub reply: String,
}

/// Entry of `GET /api/chatbot/history`, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatHistoryEntry {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub reply: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_history_is_only_sent_when_set() {
        let plain = serde_json::to_value(ChatRequest::new("xin chào")).unwrap();
        assert!(plain.get("saveHistory").is_none());

        let quiet = serde_json::to_value(ChatRequest::without_history("mô tả")).unwrap();
        assert_eq!(quiet["saveHistory"], false);
    }
}
