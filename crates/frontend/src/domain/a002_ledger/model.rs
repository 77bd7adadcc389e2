//! Form drafts and tree ordering for the ledger page.

use crate::dashboards::d100_home::savings::prorated_yield;
use crate::shared::error::AppError;
use crate::shared::format::{parse_date, parse_number, to_ymd};
use chrono::NaiveDate;
use contracts::domain::a002_ledger::{
    CategoryItem, LedgerRecord, ManagementTree, NewItemRequest, RecordData, TransactionType,
    UpdateRecordRequest,
};
use contracts::shared::period::PeriodKey;

pub const NEW_ITEM_TAB: &str = "new-item-tab";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearNode {
    pub year: String,
    pub months: Vec<String>,
}

/// Years newest first; months keep the server order.
pub fn year_nodes(tree: ManagementTree) -> Vec<YearNode> {
    let mut nodes: Vec<YearNode> = tree
        .into_iter()
        .map(|(year, months)| YearNode {
            year,
            months: months.into_iter().map(|m| m.0).collect(),
        })
        .collect();
    nodes.sort_by(|a, b| {
        let a_key = PeriodKey(a.year.clone());
        let b_key = PeriodKey(b.year.clone());
        match (a_key.number(), b_key.number()) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => b.year.cmp(&a.year),
        }
    });
    nodes
}

pub fn tab_id(item: &CategoryItem) -> String {
    format!("tab-{}", item.id)
}

/// Interest accrued on a savings record from its date until `today`.
pub fn record_yield(record: &LedgerRecord, today: NaiveDate) -> f64 {
    let days = record
        .date
        .as_deref()
        .and_then(parse_date)
        .map_or(0, |start| (today - start).num_days());
    prorated_yield(record.amount, record.rate.unwrap_or(0.0), days)
}

fn invalid(message: &str) -> AppError {
    AppError::Validation(message.to_string())
}

fn optional_number(raw: &str, message: &str) -> Result<Option<f64>, AppError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_number(raw).map(Some).ok_or_else(|| invalid(message))
}

fn optional_months(raw: &str) -> Result<Option<u32>, AppError> {
    match optional_number(raw, "Kỳ hạn phải là số tháng.")? {
        Some(t) if t < 0.0 || t.fract() != 0.0 => Err(invalid("Kỳ hạn phải là số tháng.")),
        Some(t) => Ok(Some(t as u32)),
        None => Ok(None),
    }
}

fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Input texts of the add-item form.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDraft {
    pub kind: TransactionType,
    pub name: String,
    pub amount: String,
    pub date: String,
    pub rate: String,
    pub term: String,
    pub note: String,
}

impl ItemDraft {
    pub fn new(today: &str) -> Self {
        Self {
            kind: TransactionType::Income,
            name: String::new(),
            amount: String::new(),
            date: today.to_string(),
            rate: String::new(),
            term: String::new(),
            note: String::new(),
        }
    }

    /// Request body for the selected month. Savings fields are dropped for
    /// other transaction types.
    pub fn to_request(&self, year: &str, month: &str) -> Result<NewItemRequest, AppError> {
        let name = non_blank(&self.name).ok_or_else(|| invalid("Vui lòng chọn tên khoản."))?;
        let amount = parse_number(&self.amount)
            .filter(|a| *a > 0.0)
            .ok_or_else(|| invalid("Số tiền phải là số dương."))?;
        let date = to_ymd(&self.date).ok_or_else(|| invalid("Ngày không hợp lệ."))?;

        let (rate, term, note) = if self.kind.is_savings() {
            (
                optional_number(&self.rate, "Lãi suất phải là số.")?,
                optional_months(&self.term)?,
                non_blank(&self.note),
            )
        } else {
            (None, None, None)
        };

        Ok(NewItemRequest {
            kind: self.kind,
            name,
            amount,
            date,
            year: year.to_string(),
            month: month.to_string(),
            rate,
            term,
            note,
        })
    }
}

/// Input texts of the edit-record modal.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDraft {
    pub amount: String,
    pub rate: String,
    pub term: String,
    pub note: String,
}

impl RecordDraft {
    pub fn from_record(record: &LedgerRecord) -> Self {
        let number = |v: Option<f64>| v.map(|n| n.to_string()).unwrap_or_default();
        Self {
            amount: record.amount.to_string(),
            rate: number(record.rate),
            term: number(record.term),
            note: record.note.clone().unwrap_or_default(),
        }
    }

    /// Only the amount changes for regular records; savings records also
    /// carry rate, term and note, and rate and term are required.
    pub fn to_request(
        &self,
        year: &str,
        month: &str,
        category_id: &str,
        savings: bool,
        record: &LedgerRecord,
    ) -> Result<UpdateRecordRequest, AppError> {
        let amount = parse_number(&self.amount)
            .filter(|a| *a > 0.0)
            .ok_or_else(|| invalid("Số tiền phải là số dương."))?;

        let (rate, term, note) = if savings {
            let rate = optional_number(&self.rate, "Lãi suất phải là số.")?
                .ok_or_else(|| invalid("Vui lòng nhập lãi suất."))?;
            let term = optional_months(&self.term)?
                .ok_or_else(|| invalid("Vui lòng nhập kỳ hạn."))?;
            (Some(rate), Some(term), Some(self.note.trim().to_string()))
        } else {
            (None, None, None)
        };

        Ok(UpdateRecordRequest {
            year: year.to_string(),
            month: month.to_string(),
            type_id: category_id.to_string(),
            record_id: record.id.clone(),
            record_data: RecordData {
                name: record.name.clone().unwrap_or_default(),
                amount,
                date: record.date.clone().unwrap_or_default(),
                rate,
                term,
                note,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn record(json: &str) -> LedgerRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn years_sort_newest_first() {
        let mut tree = BTreeMap::new();
        tree.insert("2023".to_string(), vec![PeriodKey::from("12")]);
        tree.insert("2025".to_string(), vec![PeriodKey::from("1"), PeriodKey::from("2")]);
        tree.insert("2024".to_string(), vec![]);
        let years: Vec<_> = year_nodes(tree).into_iter().map(|n| n.year).collect();
        assert_eq!(years, vec!["2025", "2024", "2023"]);
    }

    #[test]
    fn savings_fields_only_for_savings() {
        let mut draft = ItemDraft::new("2024-07-01");
        draft.name = "Ăn uống".into();
        draft.amount = "250000".into();
        draft.rate = "6.5".into();
        draft.term = "12".into();
        draft.kind = TransactionType::Expense;
        let req = draft.to_request("2024", "7").unwrap();
        assert_eq!(req.rate, None);
        assert_eq!(req.term, None);

        draft.kind = TransactionType::Savings;
        let req = draft.to_request("2024", "7").unwrap();
        assert_eq!(req.rate, Some(6.5));
        assert_eq!(req.term, Some(12));
        assert_eq!(req.month, "7");
    }

    #[test]
    fn add_form_rejects_missing_name_and_bad_amount() {
        let mut draft = ItemDraft::new("2024-07-01");
        draft.amount = "1000".into();
        assert!(matches!(draft.to_request("2024", "7"), Err(AppError::Validation(_))));

        draft.name = "Lương".into();
        draft.amount = "-5".into();
        assert!(draft.to_request("2024", "7").is_err());

        draft.amount = "1000".into();
        draft.kind = TransactionType::Savings;
        draft.term = "1.5".into();
        assert!(draft.to_request("2024", "7").is_err());
    }

    #[test]
    fn savings_edit_requires_rate_and_term() {
        let rec = record(r#"{"id":"r1","name":"Gửi VCB","amount":1000000,"date":"2024-01-05","rate":6,"term":6}"#);
        let mut draft = RecordDraft::from_record(&rec);
        assert_eq!(draft.term, "6");

        draft.amount = "2000000".into();
        let req = draft.to_request("2024", "1", "Tiết kiệm", true, &rec).unwrap();
        assert_eq!(req.record_data.amount, 2_000_000.0);
        assert_eq!(req.record_data.name, "Gửi VCB");
        assert_eq!(req.record_data.date, "2024-01-05");
        assert_eq!(req.record_data.term, Some(6));

        draft.rate.clear();
        assert!(draft.to_request("2024", "1", "Tiết kiệm", true, &rec).is_err());

        let plain = draft.to_request("2024", "1", "Chi", false, &rec).unwrap();
        assert_eq!(plain.record_data.rate, None);
        assert_eq!(plain.type_id, "Chi");
    }

    #[test]
    fn yield_accrues_from_record_date() {
        let rec = record(r#"{"id":"r1","amount":100000000,"date":"2024-01-01","rate":6.5}"#);
        let today = NaiveDate::from_ymd_opt(2024, 4, 10).unwrap();
        // 100 days
        assert_eq!(record_yield(&rec, today), 1_780_822.0);

        let undated = record(r#"{"id":"r2","amount":5000,"rate":6.5}"#);
        assert_eq!(record_yield(&undated, today), 0.0);
    }
}
