//! Savings deposit status and prorated yield.

use chrono::{Months, NaiveDate};
use contracts::dashboards::d100_home::SavingDeposit;

/// Days before maturity that count as "soon due".
pub const SOON_DUE_DAYS: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepositStatus {
    Overdue,
    SoonDue { days_left: i64 },
    NotYetDue,
}

impl DepositStatus {
    pub fn label(&self) -> String {
        match self {
            DepositStatus::Overdue => "Quá hạn tất toán".to_string(),
            DepositStatus::SoonDue { days_left } => format!("Sắp đáo hạn (còn {} ngày)", days_left),
            DepositStatus::NotYetDue => "Chưa đến hạn".to_string(),
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            DepositStatus::Overdue => "status status--overdue",
            DepositStatus::SoonDue { .. } => "status status--soon",
            DepositStatus::NotYetDue => "status status--ok",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SavingsRow {
    pub deposit: SavingDeposit,
    pub start: Option<NaiveDate>,
    pub expiry: Option<NaiveDate>,
    /// Days interest has accrued for; capped at the term once matured.
    pub days_held: i64,
    pub accrued_yield: f64,
    pub status: DepositStatus,
}

/// Start plus `term` calendar months, clamped to the end of shorter months.
pub fn expiry_date(start: NaiveDate, term_months: u32) -> Option<NaiveDate> {
    start.checked_add_months(Months::new(term_months))
}

/// `round(amount * rate% * days / 365)`.
pub fn prorated_yield(amount: f64, rate_percent: f64, days: i64) -> f64 {
    (amount * rate_percent * days.max(0) as f64 / 36_500.0).round()
}

pub fn savings_status(deposit: &SavingDeposit, today: NaiveDate) -> SavingsRow {
    let start = deposit.start_date();
    let expiry = start.and_then(|s| expiry_date(s, deposit.term));

    let (days_held, status) = match (start, expiry) {
        (Some(start), Some(expiry)) => {
            let days_left = (expiry - today).num_days();
            if days_left < 0 {
                ((expiry - start).num_days(), DepositStatus::Overdue)
            } else if days_left <= SOON_DUE_DAYS {
                ((today - start).num_days(), DepositStatus::SoonDue { days_left })
            } else {
                ((today - start).num_days(), DepositStatus::NotYetDue)
            }
        }
        (Some(start), None) => ((today - start).num_days(), DepositStatus::NotYetDue),
        _ => (0, DepositStatus::NotYetDue),
    };
    let days_held = days_held.max(0);

    SavingsRow {
        accrued_yield: prorated_yield(deposit.amount, deposit.rate, days_held),
        deposit: deposit.clone(),
        start,
        expiry,
        days_held,
        status,
    }
}

pub fn savings_rows(deposits: &[SavingDeposit], today: NaiveDate) -> Vec<SavingsRow> {
    deposits.iter().map(|d| savings_status(d, today)).collect()
}

/// Sum of principal and of accrued yield.
pub fn savings_totals(rows: &[SavingsRow]) -> (f64, f64) {
    rows.iter().fold((0.0, 0.0), |(amount, accrued), row| {
        (amount + row.deposit.amount, accrued + row.accrued_yield)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn deposit(amount: f64, rate: f64, term: u32, start: &str) -> SavingDeposit {
        SavingDeposit {
            id: "s1".into(),
            amount,
            rate,
            term,
            date: start.into(),
            note: None,
        }
    }

    #[test]
    fn yield_for_one_hundred_days() {
        let d = deposit(100_000_000.0, 6.5, 12, "2024-01-01");
        let today = date(2024, 1, 1) + chrono::Duration::days(100);
        let row = savings_status(&d, today);
        assert_eq!(row.days_held, 100);
        assert_eq!(row.accrued_yield, 1_780_822.0);
        assert_eq!(row.status, DepositStatus::NotYetDue);
    }

    #[test]
    fn soon_due_within_five_days() {
        let d = deposit(10_000_000.0, 5.0, 6, "2024-01-10");
        assert_eq!(row_status(&d, date(2024, 7, 5)), DepositStatus::SoonDue { days_left: 5 });
        assert_eq!(row_status(&d, date(2024, 7, 10)), DepositStatus::SoonDue { days_left: 0 });
        assert_eq!(row_status(&d, date(2024, 7, 4)), DepositStatus::NotYetDue);
    }

    fn row_status(d: &SavingDeposit, today: NaiveDate) -> DepositStatus {
        savings_status(d, today).status
    }

    #[test]
    fn overdue_accrues_only_for_the_term() {
        let d = deposit(36_500_000.0, 10.0, 1, "2024-03-01");
        let row = savings_status(&d, date(2024, 6, 1));
        assert_eq!(row.status, DepositStatus::Overdue);
        assert_eq!(row.expiry, Some(date(2024, 4, 1)));
        assert_eq!(row.days_held, 31);
        assert_eq!(row.accrued_yield, 310_000.0);
        assert_eq!(row.status.label(), "Quá hạn tất toán");
    }

    #[test]
    fn month_end_start_clamps_expiry() {
        assert_eq!(expiry_date(date(2024, 1, 31), 1), Some(date(2024, 2, 29)));
    }

    #[test]
    fn future_or_unparsable_start_accrues_nothing() {
        let future = deposit(1_000_000.0, 6.0, 3, "2030-01-01");
        assert_eq!(savings_status(&future, date(2024, 1, 1)).accrued_yield, 0.0);

        let broken = deposit(1_000_000.0, 6.0, 3, "không rõ");
        let row = savings_status(&broken, date(2024, 1, 1));
        assert_eq!(row.days_held, 0);
        assert_eq!(row.expiry, None);
    }

    #[test]
    fn totals_add_principal_and_yield() {
        let today = date(2024, 4, 10);
        let rows = savings_rows(
            &[
                deposit(100_000_000.0, 6.5, 12, "2024-01-01"),
                deposit(50_000_000.0, 0.0, 6, "2024-02-01"),
            ],
            today,
        );
        let (amount, accrued) = savings_totals(&rows);
        assert_eq!(amount, 150_000_000.0);
        assert_eq!(accrued, 1_780_822.0);
    }
}
