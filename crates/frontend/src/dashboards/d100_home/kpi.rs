//! Month-over-month comparison for the KPI cards.

use crate::shared::error::AppError;

/// Year and month preceding `(year, month)`.
pub fn previous_period(year: i32, month: u32) -> (i32, u32) {
    if month <= 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trend {
    Up(f64),
    Down(f64),
    Flat,
}

impl Trend {
    /// Percent change of `current` against `previous`; a zero previous value
    /// is treated as 1.
    pub fn between(current: f64, previous: f64) -> Self {
        let base = if previous == 0.0 { 1.0 } else { previous };
        let change = (current - previous) / base * 100.0;
        if change > 0.0 {
            Trend::Up(change)
        } else if change < 0.0 {
            Trend::Down(change.abs())
        } else {
            Trend::Flat
        }
    }

    /// Trend against the previous month's income, or `None` when that month
    /// could not be fetched; no comparison is shown then.
    pub fn against(current: f64, previous: Result<f64, AppError>) -> Option<Self> {
        match previous {
            Ok(previous) => Some(Self::between(current, previous)),
            Err(err) => {
                log::warn!("previous month unavailable, hiding trend: {}", err);
                None
            }
        }
    }

    pub fn text(&self) -> String {
        match self {
            Trend::Up(p) => format!("▲ {:.1}% so với tháng trước", p),
            Trend::Down(p) => format!("▼ {:.1}% so với tháng trước", p),
            Trend::Flat => "Không đổi so với tháng trước".to_string(),
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Trend::Up(_) => "kpi__trend kpi__trend--up",
            Trend::Down(_) => "kpi__trend kpi__trend--down",
            Trend::Flat => "kpi__trend",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn january_wraps_to_december() {
        assert_eq!(previous_period(2024, 1), (2023, 12));
        assert_eq!(previous_period(2024, 7), (2024, 6));
    }

    #[test]
    fn trend_texts() {
        assert_eq!(Trend::between(12_000_000.0, 10_000_000.0).text(), "▲ 20.0% so với tháng trước");
        assert_eq!(Trend::between(7_500_000.0, 10_000_000.0).text(), "▼ 25.0% so với tháng trước");
        assert_eq!(Trend::between(5.0, 5.0), Trend::Flat);
        assert_eq!(Trend::between(0.0, 0.0).text(), "Không đổi so với tháng trước");
    }

    #[test]
    fn failed_previous_month_hides_the_trend() {
        let failed = Err(AppError::Request {
            status: 500,
            message: "lỗi máy chủ".into(),
        });
        assert_eq!(Trend::against(9_000_000.0, failed), None);
        assert_eq!(Trend::against(9_000_000.0, Ok(0.0)), Some(Trend::Up(900_000_000.0)));
    }
}
