//! Page model for standalone site pages (including the homepage)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

/// Custom page model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    pub title: String,
    pub slug: String,
    /// HTML content
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub is_homepage: bool,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Input for creating a page
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreatePageInput {
    pub title: String,
    pub slug: String,
    pub content: String,
}

/// Input for updating a page; unset fields are left to the server
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdatePageInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl UpdatePageInput {
    pub fn has_changes(&self) -> bool {
        self.title.is_some() || self.content.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_deserializes_naive_timestamp() {
        let page: Page = serde_json::from_value(json!({
            "id": "p1",
            "title": "Home",
            "slug": "home",
            "content": "<h2>Welcome!</h2>",
            "is_homepage": true,
            "created_at": "2024-05-01T12:00:00.000000",
            "updated_at": "2024-05-02T12:00:00+00:00"
        }))
        .unwrap();

        assert!(page.is_homepage);
        assert!(page.updated_at.is_some());
    }

    #[test]
    fn test_update_input_skips_unset_fields() {
        let input = UpdatePageInput {
            title: Some("About".to_string()),
            content: None,
        };
        assert!(input.has_changes());
        assert_eq!(serde_json::to_value(&input).unwrap(), json!({"title": "About"}));
        assert!(!UpdatePageInput::default().has_changes());
    }
}
