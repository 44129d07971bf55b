//! Question payload schema for the plant API.

use serde::{Deserialize, Serialize};

/// A home-screen question card as served by `/getQuestions`.
///
/// Unlike categories, the endpoint returns a bare array with snake_case
/// field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: u64,
    pub title: String,
    pub subtitle: String,
    pub image_uri: String,
    /// Link opened when the card is tapped
    pub uri: String,
    /// Display ordering supplied by the server
    pub order: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_wire_format() {
        let json = r#"{
            "id": 1,
            "title": "How to water succulents?",
            "subtitle": "Watering guide",
            "image_uri": "https://example.com/succulent.jpg",
            "uri": "https://example.com/articles/succulents",
            "order": 1
        }"#;

        let question: Question = serde_json::from_str(json).unwrap();
        assert_eq!(question.title, "How to water succulents?");
        assert_eq!(question.order, 1);
    }
}
