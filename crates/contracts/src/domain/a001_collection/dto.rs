use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier field every stored document carries.
pub const ID_FIELD: &str = "id";

/// A schemaless document; field order follows the server response.
pub type Document = Map<String, Value>;

/// Returns the document id as a string, whether stored as string or number.
pub fn document_id(doc: &Document) -> Option<String> {
    match doc.get(ID_FIELD)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// One page of `GET /api/collections/{name}/documents`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentPage {
    #[serde(default)]
    pub data: Vec<Document>,
    /// Cursor for the page after this one; absent on the last page.
    #[serde(default)]
    pub last_doc_id: Option<String>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub total_records: Option<u32>,
}

/// Response of create/update/delete on generic collections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_tolerates_missing_counters() {
        let page: DocumentPage =
            serde_json::from_str(r#"{"data":[{"id":"a","name":"x"}],"last_doc_id":"a"}"#).unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.last_doc_id.as_deref(), Some("a"));
        assert_eq!(page.total_pages, None);
    }

    #[test]
    fn document_id_accepts_numbers() {
        let doc: Document = serde_json::from_str(r#"{"id":42}"#).unwrap();
        assert_eq!(document_id(&doc).as_deref(), Some("42"));

        let blank: Document = serde_json::from_str(r#"{"id":""}"#).unwrap();
        assert_eq!(document_id(&blank), None);
    }
}
