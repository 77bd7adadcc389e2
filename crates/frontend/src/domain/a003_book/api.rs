use crate::domain::a003_book::model::description_prompt;
use crate::shared::api::ApiClient;
use crate::shared::api_utils::segment;
use crate::shared::error::AppError;
use contracts::domain::a003_book::{Book, BookPayload, Genre, ShelfRow};
use contracts::domain::a005_chat::{ChatReply, ChatRequest};
use contracts::shared::actions::ActionId;
use once_cell::sync::OnceCell;
use serde_json::Value;

static GENRES: OnceCell<Vec<Genre>> = OnceCell::new();

pub async fn fetch_books(api: &ApiClient) -> Result<Vec<Book>, AppError> {
    api.get("/api/books").await
}

pub async fn fetch_book(api: &ApiClient, id: &str) -> Result<Book, AppError> {
    api.get(&format!("/api/books/{}", segment(id))).await
}

pub async fn fetch_shelves(api: &ApiClient) -> Result<Vec<ShelfRow>, AppError> {
    api.get("/api/shelves").await
}

/// Genre list, fetched once per session.
pub async fn fetch_genres(api: &ApiClient) -> Result<Vec<Genre>, AppError> {
    if let Some(genres) = GENRES.get() {
        return Ok(genres.clone());
    }
    let genres: Vec<Genre> = api.get("/api/genres/").await?;
    Ok(GENRES.get_or_init(|| genres).clone())
}

/// Returns the stored book when the server echoes it.
pub async fn create_book(api: &ApiClient, book: &BookPayload) -> Result<Option<Book>, AppError> {
    api.post("/api/books", book, Some(ActionId::CreateBook))
        .await
        .map(|p| p.into_option())
}

pub async fn update_book(
    api: &ApiClient,
    id: &str,
    book: &BookPayload,
) -> Result<Option<Book>, AppError> {
    api.put(
        &format!("/api/books/{}", segment(id)),
        book,
        Some(ActionId::UpdateBook),
    )
    .await
    .map(|p| p.into_option())
}

pub async fn delete_book(api: &ApiClient, id: &str) -> Result<(), AppError> {
    api.delete::<(), Value>(
        &format!("/api/books/{}", segment(id)),
        None,
        Some(ActionId::DeleteBook),
    )
    .await
    .map(|_| ())
}

/// Short summary written by the chatbot; kept out of the chat history.
pub async fn generate_description(
    api: &ApiClient,
    title: &str,
    author: &str,
) -> Result<String, AppError> {
    let request = ChatRequest::without_history(description_prompt(title, author));
    let reply: ChatReply = api
        .silent()
        .post("/api/chatbot", &request, None)
        .await?
        .into_value()?;
    Ok(reply.reply)
}
