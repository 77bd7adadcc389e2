use crate::shared::de::{number_or_string, string_or_number, u32_or_string};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Either a month total or per-day amounts keyed by day of month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amounts {
    Total(f64),
    ByDay(BTreeMap<String, f64>),
}

impl Default for Amounts {
    fn default() -> Self {
        Amounts::Total(0.0)
    }
}

impl Amounts {
    pub fn total(&self) -> f64 {
        match self {
            Amounts::Total(v) => *v,
            Amounts::ByDay(days) => days.values().sum(),
        }
    }

    /// Per-day values ordered by numeric day, if the server sent them.
    pub fn by_day(&self) -> Option<Vec<(u32, f64)>> {
        match self {
            Amounts::Total(_) => None,
            Amounts::ByDay(days) => {
                let mut out: Vec<(u32, f64)> = days
                    .iter()
                    .filter_map(|(k, v)| k.trim().parse().ok().map(|d| (d, *v)))
                    .collect();
                out.sort_by_key(|(d, _)| *d);
                Some(out)
            }
        }
    }
}

/// `GET /api/dashboard/summary/{year}/{month}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthSummary {
    #[serde(default)]
    pub income: Amounts,
    #[serde(default)]
    pub expense: Amounts,
}

/// Entry of `GET /api/dashboard/pie/{year}/{month}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySlice {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "number_or_string")]
    pub value: f64,
}

/// Entry of `GET /api/dashboard/save`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingDeposit {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "number_or_string")]
    pub amount: f64,
    /// Percent per year.
    #[serde(default, deserialize_with = "number_or_string")]
    pub rate: f64,
    /// Months.
    #[serde(default, deserialize_with = "u32_or_string")]
    pub term: u32,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub note: Option<String>,
}

impl SavingDeposit {
    /// Start date; accepts `YYYY-MM-DD` with an optional time suffix.
    pub fn start_date(&self) -> Option<NaiveDate> {
        let head = self.date.trim().get(..10)?;
        NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
    }
}

/// Entry of `GET /api/collections/Year/{y}/Months/{m}/Types/Chi/recent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentTransaction {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "number_or_string")]
    pub amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recent_transaction_amount_may_be_text() {
        let rows: Vec<RecentTransaction> = serde_json::from_str(
            r#"[{"date":"2024-05-20","name":"Tiền điện","amount":"850000"},{"name":"Chợ","amount":120000}]"#,
        )
        .unwrap();
        assert_eq!(rows[0].amount, 850_000.0);
        assert_eq!(rows[1].date, "");
        assert_eq!(rows[1].amount, 120_000.0);
    }

    #[test]
    fn summary_accepts_totals_and_daily_maps() {
        let totals: MonthSummary =
            serde_json::from_str(r#"{"income":1500000,"expense":400000}"#).unwrap();
        assert_eq!(totals.income.total(), 1_500_000.0);
        assert!(totals.income.by_day().is_none());

        let daily: MonthSummary =
            serde_json::from_str(r#"{"income":{"10":5,"2":1},"expense":{"2":3}}"#).unwrap();
        assert_eq!(daily.income.by_day(), Some(vec![(2, 1.0), (10, 5.0)]));
        assert_eq!(daily.expense.total(), 3.0);
    }

    #[test]
    fn deposit_start_date_ignores_time() {
        let dep: SavingDeposit =
            serde_json::from_str(r#"{"amount":"1000","rate":6,"term":"6","date":"2024-03-01T00:00:00"}"#)
                .unwrap();
        assert_eq!(dep.start_date(), NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(dep.term, 6);
    }
}
