use crate::shared::de::{number_or_string, opt_number_or_string, string_or_number};
use crate::shared::period::PeriodKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `GET /api/management/tree`: year -> months that have data.
pub type ManagementTree = BTreeMap<String, Vec<PeriodKey>>;

/// Category id under which savings deposits are stored.
pub const SAVINGS_CATEGORY_ID: &str = "Tiết kiệm";

/// Transaction type chosen in the add-item form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    #[serde(rename = "Thu")]
    Income,
    #[serde(rename = "Chi")]
    Expense,
    #[serde(rename = "Tiết kiệm")]
    Savings,
}

impl TransactionType {
    pub const ALL: [TransactionType; 3] = [
        TransactionType::Income,
        TransactionType::Expense,
        TransactionType::Savings,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Income => "Thu",
            TransactionType::Expense => "Chi",
            TransactionType::Savings => "Tiết kiệm",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }

    pub fn is_savings(&self) -> bool {
        matches!(self, TransactionType::Savings)
    }
}

/// A category of one month with its nested records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryItem {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "Tên", default)]
    pub display_name: Option<String>,
    /// "thu" / "chi" as stored; used only for tab styling.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub records: Vec<LedgerRecord>,
}

impl CategoryItem {
    pub fn title(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.id)
    }

    pub fn is_savings(&self) -> bool {
        self.id == SAVINGS_CATEGORY_ID
    }

    pub fn is_income(&self) -> bool {
        self.kind.as_deref() == Some("thu")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "number_or_string")]
    pub amount: f64,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "opt_number_or_string")]
    pub rate: Option<f64>,
    #[serde(default, deserialize_with = "opt_number_or_string")]
    pub term: Option<f64>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Entry of `GET /api/items`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseItemName {
    pub name: String,
}

/// Body of `POST /api/management/items`.
///
/// Savings-only fields are omitted from the JSON unless set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItemRequest {
    #[serde(rename = "Loại")]
    pub kind: TransactionType,
    #[serde(rename = "Tên")]
    pub name: String,
    #[serde(rename = "Số tiền")]
    pub amount: f64,
    pub date: String,
    pub year: String,
    pub month: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordData {
    pub name: String,
    pub amount: f64,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Body of `PUT /api/management/record`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecordRequest {
    pub year: String,
    pub month: String,
    pub type_id: String,
    pub record_id: String,
    pub record_data: RecordData,
}

/// Body of `DELETE /api/management/record`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRecordRequest {
    pub year: String,
    pub month: String,
    pub type_id: String,
    pub record_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_items_parse_with_vietnamese_keys() {
        let json = r#"[{"id":"Tiết kiệm","Tên":"Tiết kiệm","type":"chi","records":[
            {"id":"r1","name":"Gửi VCB","amount":"100000000","date":"2024-01-05","rate":6.5,"term":"12"}
        ]},{"id":"Lương","type":"thu"}]"#;
        let items: Vec<CategoryItem> = serde_json::from_str(json).unwrap();
        assert!(items[0].is_savings());
        assert_eq!(items[0].records[0].amount, 100_000_000.0);
        assert_eq!(items[0].records[0].term, Some(12.0));
        assert_eq!(items[1].title(), "Lương");
        assert!(items[1].is_income());
        assert!(items[1].records.is_empty());
    }

    #[test]
    fn new_item_omits_unset_savings_fields() {
        let req = NewItemRequest {
            kind: TransactionType::Expense,
            name: "Ăn uống".into(),
            amount: 250_000.0,
            date: "2024-07-01".into(),
            year: "2024".into(),
            month: "7".into(),
            rate: None,
            term: None,
            note: None,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["Loại"], "Chi");
        assert_eq!(value["Số tiền"], 250_000.0);
        assert!(value.get("rate").is_none());
        assert!(value.get("note").is_none());
    }

    #[test]
    fn update_request_uses_camel_case() {
        let req = DeleteRecordRequest {
            year: "2024".into(),
            month: "7".into(),
            type_id: "Chi".into(),
            record_id: "r9".into(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["typeId"], "Chi");
        assert_eq!(value["recordId"], "r9");
    }
}
