use crate::shared::de::{number_or_string, string_or_number};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "borrowerName", default)]
    pub borrower_name: String,
    #[serde(rename = "principalAmount", default, deserialize_with = "number_or_string")]
    pub principal_amount: f64,
    /// Free text as entered ("12 tháng").
    #[serde(default, deserialize_with = "string_or_number")]
    pub term: String,
    #[serde(rename = "startDate", default)]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "number_or_string")]
    pub outstanding: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanPage {
    #[serde(default)]
    pub data: Vec<Loan>,
    #[serde(default)]
    pub last_doc_id: Option<String>,
    #[serde(default)]
    pub total_pages: Option<u32>,
}

/// `GET /api/dashboard/loan` returns a page when `pageSize` is given and a
/// bare list otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LoanListResponse {
    Page(LoanPage),
    List(Vec<Loan>),
}

impl LoanListResponse {
    pub fn into_page(self) -> LoanPage {
        match self {
            LoanListResponse::Page(page) => page,
            LoanListResponse::List(data) => LoanPage {
                data,
                last_doc_id: None,
                total_pages: Some(1),
            },
        }
    }
}

/// Entry of `GET /api/dashboard/loan/{id}/payments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanPayment {
    #[serde(rename = "paidDate", default)]
    pub paid_date: Option<String>,
    #[serde(rename = "principalPaid", default, deserialize_with = "number_or_string")]
    pub principal_paid: f64,
    #[serde(rename = "interestPaid", default, deserialize_with = "number_or_string")]
    pub interest_paid: f64,
    #[serde(rename = "totalPaid", default, deserialize_with = "number_or_string")]
    pub total_paid: f64,
}

/// Body of `POST /api/loans/payments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanPaymentRequest {
    pub loan_id: String,
    pub payment_date: String,
    pub principal_paid: f64,
    pub interest_paid: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loan_list_accepts_both_shapes() {
        let page: LoanListResponse = serde_json::from_str(
            r#"{"data":[{"id":"l1","borrowerName":"An","principalAmount":5000000,"term":12}],"last_doc_id":"l1"}"#,
        )
        .unwrap();
        let page = page.into_page();
        assert_eq!(page.data[0].term, "12");
        assert_eq!(page.last_doc_id.as_deref(), Some("l1"));

        let list: LoanListResponse =
            serde_json::from_str(r#"[{"id":"l2","borrowerName":"Bình"}]"#).unwrap();
        let page = list.into_page();
        assert_eq!(page.data[0].borrower_name, "Bình");
        assert_eq!(page.last_doc_id, None);
    }
}
