use crate::shared::api::ApiClient;
use crate::shared::api_utils::{segment, with_query, PageQuery};
use crate::shared::error::AppError;
use contracts::domain::a001_collection::{Document, DocumentPage, MutationResult};
use contracts::shared::actions::ActionId;

fn base(collection: &str) -> String {
    format!("/api/collections/{}", segment(collection))
}

/// Names of all top-level collections.
pub async fn fetch_collection_names(api: &ApiClient) -> Result<Vec<String>, AppError> {
    api.get("/api/collections").await
}

pub async fn fetch_page(
    api: &ApiClient,
    collection: &str,
    query: &PageQuery,
) -> Result<DocumentPage, AppError> {
    let path = with_query(&format!("{}/documents", base(collection)), query);
    api.get(&path).await
}

pub async fn create_document(
    api: &ApiClient,
    collection: &str,
    doc: &Document,
) -> Result<Option<MutationResult>, AppError> {
    let path = format!("{}/documents", base(collection));
    api.post(&path, doc, Some(ActionId::AddCollectionDocument))
        .await
        .map(|p| p.into_option())
}

pub async fn update_document(
    api: &ApiClient,
    collection: &str,
    id: &str,
    doc: &Document,
) -> Result<Option<MutationResult>, AppError> {
    let path = format!("{}/{}", base(collection), segment(id));
    api.put(&path, doc, Some(ActionId::UpdateCollectionDocument))
        .await
        .map(|p| p.into_option())
}

pub async fn delete_document(api: &ApiClient, collection: &str, id: &str) -> Result<(), AppError> {
    let path = format!("{}/{}", base(collection), segment(id));
    api.delete::<(), MutationResult>(&path, None, Some(ActionId::DeleteCollectionDocument))
        .await
        .map(|_| ())
}
