//! Lenient deserializers.
//!
//! Documents are edited through free-form forms, so numeric fields sometimes
//! arrive as strings ("12", "6.5") and string ids sometimes arrive as numbers.

use serde::de::{self, Deserialize, Deserializer};
use serde_json::Value;

/// Accepts a string or a number; `null` becomes an empty string.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

/// Accepts a number or a numeric string; `null` and blank strings become 0.
pub fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    opt_number_or_string(deserializer).map(|v| v.unwrap_or(0.0))
}

/// Like [`number_or_string`] but keeps absence distinguishable.
pub fn opt_number_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => Ok(n.as_f64()),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("not a number: {:?}", s))),
        Value::Null => Ok(None),
        other => Err(de::Error::custom(format!("expected number, got {}", other))),
    }
}

/// Whole-number variant used for terms (months) and ratings.
pub fn u32_or_string<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = number_or_string(deserializer)?;
    if value < 0.0 {
        return Err(de::Error::custom(format!("negative value: {}", value)));
    }
    Ok(value.round() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "string_or_number")]
        id: String,
        #[serde(default, deserialize_with = "number_or_string")]
        amount: f64,
        #[serde(default, deserialize_with = "opt_number_or_string")]
        rate: Option<f64>,
        #[serde(default, deserialize_with = "u32_or_string")]
        term: u32,
    }

    #[test]
    fn accepts_mixed_shapes() {
        let p: Probe =
            serde_json::from_str(r#"{"id":2024,"amount":"1500000","rate":"6.5","term":"12"}"#)
                .unwrap();
        assert_eq!(p.id, "2024");
        assert_eq!(p.amount, 1_500_000.0);
        assert_eq!(p.rate, Some(6.5));
        assert_eq!(p.term, 12);
    }

    #[test]
    fn missing_and_blank_fields_default() {
        let p: Probe = serde_json::from_str(r#"{"rate":"","amount":null}"#).unwrap();
        assert_eq!(p.id, "");
        assert_eq!(p.amount, 0.0);
        assert_eq!(p.rate, None);
        assert_eq!(p.term, 0);
    }

    #[test]
    fn rejects_garbage() {
        assert!(serde_json::from_str::<Probe>(r#"{"amount":"abc"}"#).is_err());
        assert!(serde_json::from_str::<Probe>(r#"{"term":-3}"#).is_err());
    }
}
