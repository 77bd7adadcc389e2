use crate::shared::api::ApiClient;
use crate::shared::error::AppError;
use contracts::domain::a004_loan::{Loan, LoanListResponse, LoanPaymentRequest};
use contracts::shared::actions::ActionId;
use serde_json::Value;

/// Every loan, unpaginated.
pub async fn fetch_loans(api: &ApiClient) -> Result<Vec<Loan>, AppError> {
    let response: LoanListResponse = api.get("/api/dashboard/loan").await?;
    Ok(response.into_page().data)
}

pub async fn record_payment(api: &ApiClient, payment: &LoanPaymentRequest) -> Result<(), AppError> {
    api.post::<_, Value>("/api/loans/payments", payment, Some(ActionId::AddLoanPayment))
        .await
        .map(|_| ())
}
