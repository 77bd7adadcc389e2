use serde::{Deserialize, Serialize};

/// Error body returned by the backend on non-2xx responses.
///
/// Handlers are inconsistent about the key, so both are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// The server-provided message, preferring `error` over `message`.
    pub fn into_message(self) -> Option<String> {
        self.error
            .filter(|e| !e.trim().is_empty())
            .or(self.message.filter(|m| !m.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_error_field() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"error":"Không tìm thấy mục","message":"x"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Không tìm thấy mục"));
    }

    #[test]
    fn falls_back_to_message_and_ignores_blank() {
        let body: ApiErrorBody = serde_json::from_str(r#"{"error":"  ","message":"boom"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("boom"));

        let empty: ApiErrorBody = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.into_message(), None);
    }
}
