//! Column layout per collection.

use crate::shared::components::data_table::HeaderSpec;
use contracts::domain::a001_collection::{Document, ID_FIELD};

/// Field the backend uses as the id of income/expense category documents.
pub const CATEGORY_KEY_FIELD: &str = "Danh mục thu chi";

/// Columns of the collections the app knows about.
pub fn known_headers(collection: &str) -> Option<Vec<HeaderSpec>> {
    match collection {
        "Chi" | "Thu" => Some(vec![
            HeaderSpec::new(ID_FIELD, "ID"),
            HeaderSpec::new(CATEGORY_KEY_FIELD, "Danh mục thu chi"),
        ]),
        _ => None,
    }
}

/// Registry columns first, then any other field seen in `docs` in the order
/// it first appears.
pub fn headers_for(collection: &str, docs: &[Document]) -> Vec<HeaderSpec> {
    let mut headers = known_headers(collection).unwrap_or_default();
    for doc in docs {
        for key in doc.keys() {
            if key != ID_FIELD && !headers.iter().any(|h| &h.field == key) {
                headers.push(HeaderSpec::new(key.clone(), key.clone()));
            }
        }
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(json: &str) -> Document {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn registry_columns_come_first() {
        let docs = vec![doc(r#"{"id":"Ăn uống","Danh mục thu chi":"Ăn uống","Ghi chú":"x"}"#)];
        let fields: Vec<_> = headers_for("Chi", &docs).into_iter().map(|h| h.field).collect();
        assert_eq!(fields, vec!["id", "Danh mục thu chi", "Ghi chú"]);
    }

    #[test]
    fn unknown_collection_derives_from_documents() {
        let docs = vec![
            doc(r#"{"id":"1","name":"A","amount":5}"#),
            doc(r#"{"id":"2","name":"B","unit":"kg"}"#),
        ];
        let fields: Vec<_> = headers_for("Kho", &docs).into_iter().map(|h| h.field).collect();
        assert_eq!(fields, vec!["name", "amount", "unit"]);
        assert!(headers_for("Kho", &[]).is_empty());
    }
}
