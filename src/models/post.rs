//! Blog post model
//!
//! This module provides:
//! - `Post` entity as returned by the blog endpoints
//! - Input types for creating and updating posts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

/// Blog post entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Unique identifier
    pub id: String,
    /// Post title
    pub title: String,
    /// URL-friendly slug
    pub slug: String,
    /// HTML content
    #[serde(default)]
    pub content: String,
    /// Short summary shown in list views
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Featured image URL
    #[serde(default)]
    pub featured_image: Option<String>,
    /// Publication flag
    #[serde(default = "default_published")]
    pub published: bool,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    /// Creation timestamp
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

fn default_published() -> bool {
    true
}

/// Input for creating a new post
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatePostInput {
    pub title: String,
    pub slug: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    pub published: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
}

/// Input for updating an existing post
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdatePostInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
}

impl UpdatePostInput {
    /// Check if any field is set
    pub fn has_changes(&self) -> bool {
        self.title.is_some()
            || self.content.is_some()
            || self.excerpt.is_some()
            || self.tags.is_some()
            || self.featured_image.is_some()
            || self.published.is_some()
            || self.author.is_some()
            || self.meta_description.is_some()
    }
}
