//! Site settings endpoints

use super::{ApiClient, ApiError};
use crate::models::{PublicSettings, Settings};

impl ApiClient {
    /// GET /api/settings
    pub async fn settings(&self) -> Result<Settings, ApiError> {
        self.send_json(self.get("/settings")).await
    }

    /// PUT /api/settings (form-encoded)
    pub async fn update_settings(&self, settings: &Settings) -> Result<(), ApiError> {
        self.send_empty(self.put("/settings").form(&settings.to_form())).await?;
        tracing::info!(background = %settings.background_type, "Settings updated");
        Ok(())
    }

    /// GET /api/public-settings
    pub async fn public_settings(&self) -> Result<PublicSettings, ApiError> {
        self.send_json(self.get("/public-settings")).await
    }
}
