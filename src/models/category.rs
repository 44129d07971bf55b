//! Category payload schema for the plant API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Image attached to a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryImage {
    pub id: u64,
    pub url: String,
    pub name: String,
}

/// A plant category as served by `/getCategories`.
///
/// The wire format uses camelCase field names and RFC 3339 timestamps;
/// anything that fails to decode against this schema is reported as an
/// invalid response format rather than stored partially.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: u64,
    pub title: String,
    pub image: CategoryImage,
    /// Display ordering supplied by the server
    pub rank: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_wire_format() {
        let json = r#"{
            "id": 1,
            "title": "Indoor Plants",
            "image": {"id": 1, "url": "https://example.com/indoor.jpg", "name": "indoor-plants"},
            "rank": 1,
            "createdAt": "2023-01-01T00:00:00Z",
            "updatedAt": "2023-01-01T00:00:00Z"
        }"#;

        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category.title, "Indoor Plants");
        assert_eq!(category.image.name, "indoor-plants");
        assert_eq!(category.rank, 1);
    }

    #[test]
    fn test_rejects_missing_fields() {
        let json = r#"{"id": 1, "title": "Indoor Plants"}"#;
        assert!(serde_json::from_str::<Category>(json).is_err());
    }
}
