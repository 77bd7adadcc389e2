use crate::shared::api::ApiClient;
use crate::shared::api_utils::{segment, with_query, PageQuery};
use crate::shared::error::AppError;
use contracts::dashboards::d100_home::{CategorySlice, MonthSummary, RecentTransaction, SavingDeposit};
use contracts::domain::a003_book::Book;
use contracts::domain::a004_loan::{LoanListResponse, LoanPage, LoanPayment};
use contracts::shared::period::PeriodKey;
use serde::Serialize;

/// Rows in the recent expenses panel.
pub const RECENT_LIMIT: usize = 5;

#[derive(Serialize)]
struct RecentQuery {
    limit: usize,
}

/// Years with data, newest first.
pub async fn fetch_years(api: &ApiClient) -> Result<Vec<i32>, AppError> {
    let keys: Vec<PeriodKey> = api.get("/api/dashboard/years").await?;
    let mut years: Vec<i32> = keys.iter().filter_map(PeriodKey::number).collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    Ok(years)
}

pub async fn fetch_summary(api: &ApiClient, year: i32, month: u32) -> Result<MonthSummary, AppError> {
    api.get(&format!("/api/dashboard/summary/{}/{}", year, month))
        .await
}

pub async fn fetch_category_slices(
    api: &ApiClient,
    year: i32,
    month: u32,
) -> Result<Vec<CategorySlice>, AppError> {
    api.get(&format!("/api/dashboard/pie/{}/{}", year, month))
        .await
}

pub async fn fetch_savings(api: &ApiClient) -> Result<Vec<SavingDeposit>, AppError> {
    api.get("/api/dashboard/save").await
}

pub async fn fetch_loan_page(api: &ApiClient, query: &PageQuery) -> Result<LoanPage, AppError> {
    let response: LoanListResponse = api.get(&with_query("/api/dashboard/loan", query)).await?;
    Ok(response.into_page())
}

pub async fn fetch_loan_payments(api: &ApiClient, loan_id: &str) -> Result<Vec<LoanPayment>, AppError> {
    api.get(&format!("/api/dashboard/loan/{}/payments", segment(loan_id)))
        .await
}

pub async fn fetch_book_count(api: &ApiClient) -> Result<usize, AppError> {
    let books: Vec<Book> = api.get("/api/books").await?;
    Ok(books.len())
}

/// Most recent expenses of a month, newest first.
pub fn recent_expenses_path(year: i32, month: u32, limit: usize) -> String {
    with_query(
        &format!("/api/collections/Year/{}/Months/{}/Types/Chi/recent", year, month),
        &RecentQuery { limit },
    )
}

pub async fn fetch_recent_expenses(
    api: &ApiClient,
    year: i32,
    month: u32,
) -> Result<Vec<RecentTransaction>, AppError> {
    api.get(&recent_expenses_path(year, month, RECENT_LIMIT)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recent_expenses_path_names_the_month() {
        assert_eq!(
            recent_expenses_path(2024, 5, RECENT_LIMIT),
            "/api/collections/Year/2024/Months/5/Types/Chi/recent?limit=5"
        );
        assert_eq!(
            recent_expenses_path(2023, 12, 10),
            "/api/collections/Year/2023/Months/12/Types/Chi/recent?limit=10"
        );
    }
}
