//! Upload endpoints
//!
//! - `POST /api/upload` - Store a file, returns its generated name
//! - `GET /api/uploads/{filename}` - Fetch a stored file

use reqwest::multipart::Form;

use super::client::segment;
use super::gallery::file_part;
use super::{ApiClient, ApiError};
use crate::models::{UploadFile, UploadedFile};

/// Site-relative path of a stored upload, as saved in settings
pub fn upload_path(filename: &str) -> String {
    format!("/api/uploads/{}", segment(filename))
}

impl ApiClient {
    /// POST /api/upload (multipart `file`)
    pub async fn upload_file(&self, file: &UploadFile) -> Result<UploadedFile, ApiError> {
        let form = Form::new().part("file", file_part(file)?);
        let uploaded: UploadedFile = self.send_json(self.post("/upload").multipart(form)).await?;
        tracing::info!(
            filename = %uploaded.filename,
            size = uploaded.size,
            "File uploaded"
        );
        Ok(uploaded)
    }

    /// GET /api/uploads/{filename}
    pub async fn download_upload(&self, filename: &str) -> Result<Vec<u8>, ApiError> {
        let response = self
            .send(self.get(&format!("/uploads/{}", segment(filename))))
            .await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Absolute URL of a stored upload
    pub fn upload_url(&self, filename: &str) -> String {
        self.url(&format!("/uploads/{}", segment(filename)))
    }
}
