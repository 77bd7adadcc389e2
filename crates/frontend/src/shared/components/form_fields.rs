//! Add/edit form generated from table headers.

use super::data_table::{visible_headers, HeaderSpec};
use super::ui::Input;
use crate::shared::error::AppError;
use crate::shared::format::{parse_date, parse_number, to_ymd};
use contracts::domain::a001_collection::Document;
use leptos::prelude::*;
use serde_json::{Number, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Date,
}

impl FieldKind {
    pub fn input_type(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Date => "date",
        }
    }

    /// Guesses the kind from an existing value.
    pub fn infer(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Number(_)) => FieldKind::Number,
            Some(Value::String(s)) if s.len() >= 10 && parse_date(s).is_some() => FieldKind::Date,
            _ => FieldKind::Text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: String,
    pub label: String,
    pub kind: FieldKind,
}

/// One field per header except the identifier; kinds come from `sample`.
pub fn field_specs(headers: &[HeaderSpec], sample: &[Document]) -> Vec<FieldSpec> {
    visible_headers(headers)
        .into_iter()
        .map(|h| {
            let seen = sample.iter().find_map(|d| d.get(&h.field).filter(|v| !v.is_null()));
            FieldSpec {
                kind: FieldKind::infer(seen),
                field: h.field,
                label: h.label,
            }
        })
        .collect()
}

/// Input text for a stored value.
pub fn input_text(kind: FieldKind, value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) if kind == FieldKind::Date => to_ymd(s).unwrap_or_else(|| s.clone()),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Pre-filled values in edit mode, empty ones in add mode.
pub fn initial_values(specs: &[FieldSpec], doc: Option<&Document>) -> Vec<String> {
    specs
        .iter()
        .map(|s| input_text(s.kind, doc.and_then(|d| d.get(&s.field))))
        .collect()
}

/// Builds the request body from the form inputs.
pub fn serialize_fields(specs: &[FieldSpec], values: &[String]) -> Result<Document, AppError> {
    let mut doc = Document::new();
    for (spec, raw) in specs.iter().zip(values) {
        let raw = raw.trim();
        let value = match spec.kind {
            _ if raw.is_empty() => Value::Null,
            FieldKind::Number => {
                let n = parse_number(raw).ok_or_else(|| {
                    AppError::Validation(format!("\"{}\" phải là số.", spec.label))
                })?;
                number_value(n)
            }
            FieldKind::Date => match to_ymd(raw) {
                Some(ymd) => Value::String(ymd),
                None => {
                    return Err(AppError::Validation(format!(
                        "\"{}\" không phải ngày hợp lệ.",
                        spec.label
                    )))
                }
            },
            FieldKind::Text => Value::String(raw.to_string()),
        };
        doc.insert(spec.field.clone(), value);
    }
    Ok(doc)
}

fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < 9.0e15 {
        Value::Number(Number::from(n as i64))
    } else {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Compares submitted fields to a stored record, ignoring number and date
/// formatting differences.
pub fn values_match(submitted: &Document, stored: &Document) -> bool {
    submitted.iter().all(|(field, sent)| {
        let got = stored.get(field).unwrap_or(&Value::Null);
        if sent == got {
            return true;
        }
        if let (Some(a), Some(b)) = (as_number(sent), as_number(got)) {
            return (a - b).abs() < 1e-9;
        }
        if let (Value::String(a), Value::String(b)) = (sent, got) {
            if let (Some(a), Some(b)) = (parse_date(a), parse_date(b)) {
                return a == b;
            }
        }
        false
    })
}

/// One labelled input per field spec.
#[component]
pub fn FormFields(
    #[prop(into)] specs: Signal<Vec<FieldSpec>>,
    /// Input texts, index-aligned with `specs`
    values: Vec<RwSignal<String>>,
    #[prop(optional, into)] disabled: Signal<bool>,
) -> impl IntoView {
    let specs = specs.get_untracked();
    specs
        .into_iter()
        .zip(values)
        .map(|(spec, value)| {
            let step = (spec.kind == FieldKind::Number).then(|| "any".to_string());
            view! {
                <Input
                    label=spec.label.clone()
                    name=spec.field.clone()
                    input_type=spec.kind.input_type().to_string()
                    step=step
                    value=value
                    disabled=disabled
                />
            }
        })
        .collect_view()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::components::data_table::HeaderSpec;

    fn headers() -> Vec<HeaderSpec> {
        vec![
            HeaderSpec::new("id", "ID"),
            HeaderSpec::new("name", "Tên"),
            HeaderSpec::new("amount", "Số tiền"),
            HeaderSpec::new("date", "Ngày"),
        ]
    }

    fn sample() -> Vec<Document> {
        vec![serde_json::from_str(
            r#"{"id":"a1","name":"Tiền nước","amount":120000,"date":"2024-05-02"}"#,
        )
        .unwrap()]
    }

    #[test]
    fn specs_skip_id_and_infer_kinds() {
        let specs = field_specs(&headers(), &sample());
        let kinds: Vec<_> = specs.iter().map(|s| (s.field.as_str(), s.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                ("name", FieldKind::Text),
                ("amount", FieldKind::Number),
                ("date", FieldKind::Date)
            ]
        );
    }

    #[test]
    fn edit_mode_prefills_and_add_mode_is_empty() {
        let specs = field_specs(&headers(), &sample());
        let docs = sample();
        assert_eq!(
            initial_values(&specs, Some(&docs[0])),
            vec!["Tiền nước", "120000", "2024-05-02"]
        );
        assert_eq!(initial_values(&specs, None), vec!["", "", ""]);
    }

    #[test]
    fn submitted_form_round_trips_through_a_store() {
        let specs = field_specs(&headers(), &sample());
        let values = vec![
            "  Học phí ".to_string(),
            "2500000".to_string(),
            "2024-09-01".to_string(),
        ];
        let body = serialize_fields(&specs, &values).unwrap();
        assert!(body.get("id").is_none());

        // the backend stores the body and may echo numbers as strings or
        // dates as HTTP dates
        let mut stored = body.clone();
        stored.insert("id".into(), Value::String("new-1".into()));
        stored.insert("amount".into(), Value::String("2500000.0".into()));
        stored.insert(
            "date".into(),
            Value::String("Sun, 01 Sep 2024 00:00:00 GMT".into()),
        );

        assert_eq!(body["name"], "Học phí");
        assert!(values_match(&body, &stored));

        stored.insert("amount".into(), serde_json::json!(2_400_000));
        assert!(!values_match(&body, &stored));
    }

    #[test]
    fn non_numeric_amount_is_rejected() {
        let specs = field_specs(&headers(), &sample());
        let values = vec!["x".to_string(), "nhiều".to_string(), String::new()];
        let err = serialize_fields(&specs, &values).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn decimal_comma_is_accepted() {
        let specs = vec![FieldSpec {
            field: "rate".into(),
            label: "Lãi suất".into(),
            kind: FieldKind::Number,
        }];
        let body = serialize_fields(&specs, &["6,5".to_string()]).unwrap();
        assert_eq!(body["rate"], serde_json::json!(6.5));
    }
}
