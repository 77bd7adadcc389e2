//! URL helpers for backend paths.

use serde::Serialize;

/// Joins the configured API base with an absolute path.
///
/// An empty base keeps the path relative to the current origin.
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        return path.to_string();
    }
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Percent-encodes one path segment (collection names, ids).
pub fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Query of the cursor-paginated list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageQuery {
    #[serde(rename = "pageSize")]
    pub page_size: usize,
    #[serde(rename = "startAfter", skip_serializing_if = "Option::is_none")]
    pub start_after: Option<String>,
}

/// Appends a serialized query to `path`; empty queries leave it unchanged.
pub fn with_query<Q: Serialize>(path: &str, query: &Q) -> String {
    match serde_qs::to_string(query) {
        Ok(qs) if !qs.is_empty() => format!("{}?{}", path, qs),
        Ok(_) => path.to_string(),
        Err(e) => {
            log::warn!("query for {} not serializable: {}", path, e);
            path.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_base_and_path() {
        assert_eq!(join_url("", "/api/books"), "/api/books");
        assert_eq!(join_url("https://h.vn/", "/api/books"), "https://h.vn/api/books");
        assert_eq!(join_url("https://h.vn", "api/books"), "https://h.vn/api/books");
    }

    #[test]
    fn page_query_omits_missing_cursor() {
        let first = PageQuery {
            page_size: 10,
            start_after: None,
        };
        assert_eq!(with_query("/api/x", &first), "/api/x?pageSize=10");

        let next = PageQuery {
            page_size: 5,
            start_after: Some("abc 1".into()),
        };
        let url = with_query("/api/x", &next);
        assert!(url.starts_with("/api/x?pageSize=5&startAfter=abc"));
        assert!(!url.contains(' '));
    }

    #[test]
    fn segments_are_encoded() {
        assert_eq!(segment("Tiết kiệm"), "Ti%E1%BA%BFt%20ki%E1%BB%87m");
        assert_eq!(segment("Chi"), "Chi");
    }
}
