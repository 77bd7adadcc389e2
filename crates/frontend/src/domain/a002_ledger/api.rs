use crate::shared::api::ApiClient;
use crate::shared::api_utils::segment;
use crate::shared::error::AppError;
use contracts::domain::a002_ledger::{
    CategoryItem, DeleteRecordRequest, ExpenseItemName, ManagementTree, NewItemRequest,
    UpdateRecordRequest,
};
use contracts::shared::actions::ActionId;
use once_cell::sync::OnceCell;
use serde_json::Value;

/// Item names change rarely; fetched once per session.
static ITEM_NAMES: OnceCell<Vec<String>> = OnceCell::new();

pub async fn fetch_tree(api: &ApiClient) -> Result<ManagementTree, AppError> {
    api.get("/api/management/tree").await
}

pub async fn fetch_month_items(
    api: &ApiClient,
    year: &str,
    month: &str,
) -> Result<Vec<CategoryItem>, AppError> {
    api.get(&format!(
        "/api/management/items/{}/{}",
        segment(year),
        segment(month)
    ))
    .await
}

pub async fn fetch_item_names(api: &ApiClient) -> Result<Vec<String>, AppError> {
    if let Some(names) = ITEM_NAMES.get() {
        return Ok(names.clone());
    }
    let items: Vec<ExpenseItemName> = api.get("/api/items").await?;
    let names: Vec<String> = items.into_iter().map(|i| i.name).collect();
    log::debug!("cached {} ledger item names", names.len());
    Ok(ITEM_NAMES.get_or_init(|| names).clone())
}

pub async fn create_item(api: &ApiClient, item: &NewItemRequest) -> Result<(), AppError> {
    api.post::<_, Value>("/api/management/items", item, Some(ActionId::AddManagementItem))
        .await
        .map(|_| ())
}

pub async fn update_record(api: &ApiClient, req: &UpdateRecordRequest) -> Result<(), AppError> {
    api.put::<_, Value>(
        "/api/management/record",
        req,
        Some(ActionId::UpdateManagementRecord),
    )
    .await
    .map(|_| ())
}

pub async fn delete_record(api: &ApiClient, req: &DeleteRecordRequest) -> Result<(), AppError> {
    api.delete::<_, Value>(
        "/api/management/record",
        Some(req),
        Some(ActionId::DeleteManagementRecord),
    )
    .await
    .map(|_| ())
}
