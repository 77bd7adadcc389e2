//! Display formatting in Vietnamese conventions.
//!
//! Numbers use `.` for thousands and `,` for decimals (at most three), money
//! is rounded to whole đồng, dates are shown as `dd/mm/yyyy`.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use serde_json::Value;

pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((&fixed, ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let is_zero = int_part.chars().all(|c| c == '0') && frac_part.is_empty();
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{},{}", sign, grouped, frac_part)
    }
}

/// Parses user-typed numbers; a decimal comma is accepted.
pub fn parse_number(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().replace(',', ".").parse().ok()?;
    value.is_finite().then_some(value)
}

pub fn format_currency(value: f64) -> String {
    format!("{} ₫", format_number(value.round()))
}

/// Parses the date shapes the backend emits: `YYYY-MM-DD` (optionally with a
/// time suffix), RFC 3339 and RFC 2822 / HTTP dates.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Some(head) = raw.get(..10) {
        let rest = &raw[10..];
        if rest.is_empty() || rest.starts_with('T') || rest.starts_with(' ') {
            if let Ok(date) = NaiveDate::parse_from_str(head, "%Y-%m-%d") {
                return Some(date);
            }
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.date_naive());
    }
    None
}

/// `dd/mm/yyyy`, or the input unchanged when it is not a date.
pub fn format_date(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => date.format("%d/%m/%Y").to_string(),
        None => raw.to_string(),
    }
}

/// `YYYY-MM-DD` for `<input type="date">` values.
pub fn to_ymd(raw: &str) -> Option<String> {
    parse_date(raw).map(|d| d.format("%Y-%m-%d").to_string())
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn today_ymd() -> String {
    today().format("%Y-%m-%d").to_string()
}

/// Text for a generic table cell.
pub fn format_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "Có".to_string(),
        Value::Bool(false) => "Không".to_string(),
        Value::Number(n) => n.as_f64().map(format_number).unwrap_or_else(|| n.to_string()),
        Value::String(s) => format_date(s),
        other => other.to_string(),
    }
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Thứ Hai",
        Weekday::Tue => "Thứ Ba",
        Weekday::Wed => "Thứ Tư",
        Weekday::Thu => "Thứ Năm",
        Weekday::Fri => "Thứ Sáu",
        Weekday::Sat => "Thứ Bảy",
        Weekday::Sun => "Chủ Nhật",
    }
}

/// Footer clock line.
pub fn clock_line(now: NaiveDateTime) -> String {
    format!(
        "Hôm nay: {}, ngày {} tháng {} năm {} • Bây giờ là: {:02}:{:02}:{:02}",
        weekday_name(now.weekday()),
        now.day(),
        now.month(),
        now.year(),
        now.hour(),
        now.minute(),
        now.second()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_use_vietnamese_separators() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1000.0), "1.000");
        assert_eq!(format_number(1_780_822.0), "1.780.822");
        assert_eq!(format_number(1234.5), "1.234,5");
        assert_eq!(format_number(-2500000.0), "-2.500.000");
        assert_eq!(format_number(6.5), "6,5");
        assert_eq!(format_number(-0.0001), "0");
    }

    #[test]
    fn currency_rounds_to_whole_dong() {
        assert_eq!(format_currency(1_500_000.0), "1.500.000 ₫");
        assert_eq!(format_currency(1234.6), "1.235 ₫");
    }

    #[test]
    fn dates_from_several_shapes() {
        assert_eq!(format_date("2024-07-05"), "05/07/2024");
        assert_eq!(format_date("2024-07-05T10:00:00Z"), "05/07/2024");
        assert_eq!(format_date("Fri, 05 Jul 2024 00:00:00 GMT"), "05/07/2024");
        assert_eq!(format_date("không phải ngày"), "không phải ngày");
        assert_eq!(to_ymd("Fri, 05 Jul 2024 00:00:00 GMT").as_deref(), Some("2024-07-05"));
    }

    #[test]
    fn cells() {
        assert_eq!(format_cell(&serde_json::json!(1500000)), "1.500.000");
        assert_eq!(format_cell(&serde_json::json!("2024-01-31")), "31/01/2024");
        assert_eq!(format_cell(&serde_json::json!("Ăn sáng")), "Ăn sáng");
        assert_eq!(format_cell(&Value::Null), "");
        assert_eq!(format_cell(&serde_json::json!(true)), "Có");
    }

    #[test]
    fn clock_line_is_vietnamese() {
        let now = NaiveDate::from_ymd_opt(2024, 7, 15)
            .and_then(|d| d.and_hms_opt(8, 5, 9))
            .unwrap();
        assert_eq!(
            clock_line(now),
            "Hôm nay: Thứ Hai, ngày 15 tháng 7 năm 2024 • Bây giờ là: 08:05:09"
        );
    }
}
