//! Gallery endpoints
//!
//! Uploading an image is a multipart request carrying the file and its
//! metadata; updates are plain JSON.

use reqwest::multipart::{Form, Part};

use super::blog::TagList;
use super::client::segment;
use super::{ApiClient, ApiError};
use crate::models::{GalleryImage, ListQuery, NewGalleryImage, PagedList, UpdateGalleryInput, UploadFile};

/// Multipart part for a file, named and typed
pub(crate) fn file_part(file: &UploadFile) -> Result<Part, ApiError> {
    Part::bytes(file.bytes.clone())
        .file_name(file.file_name.clone())
        .mime_str(&file.mime_type)
        .map_err(|e| ApiError::InvalidRequest(format!("Invalid MIME type '{}': {}", file.mime_type, e)))
}

impl ApiClient {
    /// GET /api/gallery
    pub async fn list_gallery(&self, query: &ListQuery) -> Result<PagedList<GalleryImage>, ApiError> {
        self.send_json(self.get("/gallery").query(query)).await
    }

    /// GET /api/gallery/tags
    pub async fn gallery_tags(&self) -> Result<Vec<String>, ApiError> {
        let tags: TagList = self.send_json(self.get("/gallery/tags")).await?;
        Ok(tags.into())
    }

    /// POST /api/gallery (multipart)
    pub async fn upload_gallery_image(&self, image: &NewGalleryImage) -> Result<(), ApiError> {
        let form = Form::new()
            .part("file", file_part(&image.file)?)
            .text("title", image.title.clone())
            .text("description", image.description.clone())
            .text("tags", image.tags.join(","))
            .text("is_featured", image.is_featured.to_string());

        self.send_empty(self.post("/gallery").multipart(form)).await?;
        tracing::info!(
            file = %image.file.file_name,
            size = image.file.size(),
            "Gallery image uploaded"
        );
        Ok(())
    }

    /// PUT /api/gallery/{id}
    pub async fn update_gallery_image(
        &self,
        id: &str,
        input: &UpdateGalleryInput,
    ) -> Result<(), ApiError> {
        self.send_empty(self.put(&format!("/gallery/{}", segment(id))).json(input)).await?;
        tracing::info!(id, "Gallery image updated");
        Ok(())
    }

    /// DELETE /api/gallery/{id}
    pub async fn delete_gallery_image(&self, id: &str) -> Result<(), ApiError> {
        self.send_empty(self.delete(&format!("/gallery/{}", segment(id)))).await?;
        tracing::info!(id, "Gallery image deleted");
        Ok(())
    }
}
