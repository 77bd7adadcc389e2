use crate::shared::error::AppError;
use crate::shared::format::{parse_number, to_ymd};
use contracts::domain::a004_loan::LoanPaymentRequest;

fn invalid(message: &str) -> AppError {
    AppError::Validation(message.to_string())
}

/// Blank counts as zero; anything else must be a non-negative number.
fn amount(raw: &str) -> Result<f64, AppError> {
    if raw.trim().is_empty() {
        return Ok(0.0);
    }
    parse_number(raw)
        .filter(|v| *v >= 0.0)
        .ok_or_else(|| invalid("Số tiền phải là số không âm."))
}

/// Live total shown under the inputs; unparsable parts count as zero.
pub fn payment_total(principal: &str, interest: &str) -> f64 {
    amount(principal).unwrap_or(0.0) + amount(interest).unwrap_or(0.0)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentDraft {
    pub loan_id: String,
    pub payment_date: String,
    pub principal: String,
    pub interest: String,
}

impl PaymentDraft {
    pub fn to_request(&self) -> Result<LoanPaymentRequest, AppError> {
        if self.loan_id.trim().is_empty() {
            return Err(invalid("Vui lòng chọn một khoản vay."));
        }
        let payment_date = to_ymd(&self.payment_date).ok_or_else(|| invalid("Vui lòng chọn ngày trả."))?;
        let principal_paid = amount(&self.principal)?;
        let interest_paid = amount(&self.interest)?;
        if principal_paid == 0.0 && interest_paid == 0.0 {
            return Err(invalid("Vui lòng nhập số tiền gốc hoặc lãi đã trả."));
        }
        Ok(LoanPaymentRequest {
            loan_id: self.loan_id.clone(),
            payment_date,
            principal_paid,
            interest_paid,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> PaymentDraft {
        PaymentDraft {
            loan_id: "l1".into(),
            payment_date: "2024-08-15".into(),
            principal: "1000000".into(),
            interest: String::new(),
        }
    }

    #[test]
    fn total_ignores_blank_and_garbage() {
        assert_eq!(payment_total("1000000", "25000,5"), 1_025_000.5);
        assert_eq!(payment_total("", "abc"), 0.0);
    }

    #[test]
    fn interest_only_payment_is_accepted() {
        let mut d = draft();
        d.principal.clear();
        d.interest = "150000".into();
        let req = d.to_request().unwrap();
        assert_eq!(req.principal_paid, 0.0);
        assert_eq!(req.interest_paid, 150_000.0);
        assert_eq!(req.payment_date, "2024-08-15");
    }

    #[test]
    fn validation_messages_follow_field_order() {
        let mut d = draft();
        d.loan_id.clear();
        assert_eq!(
            d.to_request().unwrap_err(),
            AppError::Validation("Vui lòng chọn một khoản vay.".into())
        );

        let mut d = draft();
        d.payment_date.clear();
        assert_eq!(
            d.to_request().unwrap_err(),
            AppError::Validation("Vui lòng chọn ngày trả.".into())
        );

        let mut d = draft();
        d.principal = "0".into();
        assert_eq!(
            d.to_request().unwrap_err(),
            AppError::Validation("Vui lòng nhập số tiền gốc hoặc lãi đã trả.".into())
        );

        let mut d = draft();
        d.principal = "-5".into();
        assert!(d.to_request().is_err());
    }
}
