/// Wire types for the gallery backend's JSON contract
///
/// These structs mirror the response bodies exactly. Deserialization is
/// deliberately lenient: a payload missing `items` or `total` decodes to an
/// empty page instead of failing the whole request.

use serde::{Deserialize, Serialize};

/// A single image in the remote collection
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageRecord {
    /// Stable backend identifier
    pub id: i64,
    /// Original filename (e.g., "IMG_2041.jpg")
    pub filename: String,
    /// Machine-generated caption, absent for older uploads
    #[serde(default)]
    pub caption: Option<String>,
    /// Resolvable media location; absolute, or relative to the backend
    #[serde(default)]
    pub s3_url: String,
    /// ISO timestamp set by the backend at upload time.
    /// Kept as a string on the wire; parsed only for display.
    #[serde(default)]
    pub uploaded_at: Option<String>,
}

/// One bounded slice of the collection, as returned by `GET /images`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageResponse {
    #[serde(default)]
    pub items: Vec<ImageRecord>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub total: u64,
}

/// Response body of `GET /search`.
/// The backend reports search failures inside a 200 body via `error`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<ImageRecord>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response body of `GET /auth/status`
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub logged_in: bool,
}

/// Request body of `POST /auth/login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response body of `POST /upload/single`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_decodes_full_body() {
        let body = r#"{
            "items": [
                {"id": 7, "filename": "a.jpg", "caption": "a beach", "s3_url": "/static/a.jpg", "uploaded_at": "2024-03-01T09:30:00.123456"}
            ],
            "page": 1,
            "page_size": 20,
            "total": 45
        }"#;

        let page: PageResponse = serde_json::from_str(body).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, 7);
        assert_eq!(page.items[0].caption.as_deref(), Some("a beach"));
        assert_eq!(page.total, 45);
    }

    #[test]
    fn test_missing_items_and_total_degrade_to_empty() {
        let page: PageResponse = serde_json::from_str("{}").unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
    }

    #[test]
    fn test_null_caption_is_accepted() {
        let body = r#"{"id": 1, "filename": "x.png", "caption": null, "s3_url": "u"}"#;
        let record: ImageRecord = serde_json::from_str(body).unwrap();
        assert!(record.caption.is_none());
        assert!(record.uploaded_at.is_none());
    }

    #[test]
    fn test_search_body_with_backend_error() {
        let body = r#"{"query": "sunset", "results": [], "error": "Search temporarily unavailable"}"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        assert!(response.results.is_empty());
        assert_eq!(response.error.as_deref(), Some("Search temporarily unavailable"));
    }

    #[test]
    fn test_upload_response_defaults_to_failure() {
        let response: UploadResponse = serde_json::from_str("{}").unwrap();
        assert!(!response.success);
        assert!(response.error.is_none());
    }
}
