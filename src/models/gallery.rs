//! Gallery image model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;
use super::upload::UploadFile;

/// Image shown in the public gallery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub file_url: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub uploaded_by: Option<String>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Multipart upload of a new gallery image
#[derive(Debug, Clone)]
pub struct NewGalleryImage {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub is_featured: bool,
    pub file: UploadFile,
}

/// Metadata update for an existing image
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateGalleryInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
}

impl UpdateGalleryInput {
    pub fn has_changes(&self) -> bool {
        self.title.is_some()
            || self.description.is_some()
            || self.tags.is_some()
            || self.is_featured.is_some()
    }
}
