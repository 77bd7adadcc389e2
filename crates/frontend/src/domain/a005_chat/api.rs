use crate::shared::api::ApiClient;
use crate::shared::error::AppError;
use contracts::domain::a005_chat::{ChatHistoryEntry, ChatReply, ChatRequest};

pub async fn fetch_history(api: &ApiClient) -> Result<Vec<ChatHistoryEntry>, AppError> {
    api.get("/api/chatbot/history").await
}

pub async fn send_message(api: &ApiClient, message: &str) -> Result<String, AppError> {
    let reply: ChatReply = api
        .post("/api/chatbot", &ChatRequest::new(message), None)
        .await?
        .into_value()?;
    Ok(reply.reply)
}
