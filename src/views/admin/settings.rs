//! Site settings panel

use crate::api::upload_path;
use crate::context::AppContext;
use crate::models::{BackgroundType, Settings, UploadFile};
use crate::views::LoadState;

pub const SETTINGS_SAVED: &str = "Settings saved successfully!";

/// Settings document being edited
pub struct SettingsPanel {
    ctx: AppContext,
    state: LoadState<()>,
    pub settings: Settings,
    alert: Option<String>,
    notice: Option<String>,
}

impl SettingsPanel {
    pub async fn open(ctx: &AppContext) -> Self {
        let mut panel = Self {
            ctx: ctx.clone(),
            state: LoadState::Loading,
            settings: Settings::default(),
            alert: None,
            notice: None,
        };
        panel.load().await;
        panel
    }

    /// Fetch the stored settings; on failure the form keeps its current values
    pub async fn load(&mut self) {
        match self.ctx.api.settings().await {
            Ok(settings) => {
                self.settings = settings;
                self.state = LoadState::Loaded(());
            }
            Err(e) => {
                tracing::warn!("Failed to fetch settings: {}", e);
                self.state = LoadState::Failed(e.message());
            }
        }
    }

    pub fn state(&self) -> &LoadState<()> {
        &self.state
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub async fn save(&mut self) -> bool {
        match self.ctx.api.update_settings(&self.settings).await {
            Ok(()) => {
                self.alert = None;
                self.notice = Some(SETTINGS_SAVED.to_string());
                true
            }
            Err(e) => {
                self.notice = None;
                self.alert = Some(format!("Error saving settings: {}", e.message()));
                false
            }
        }
    }

    /// Upload a background image and point the settings at it.
    ///
    /// Only the form changes; `save` persists it.
    pub async fn upload_background(&mut self, file: &UploadFile) -> bool {
        match self.ctx.api.upload_file(file).await {
            Ok(uploaded) => {
                self.settings.background_type = BackgroundType::Image;
                self.settings.background_image_url = Some(upload_path(&uploaded.filename));
                self.alert = None;
                true
            }
            Err(e) => {
                self.alert = Some(format!("Error uploading image: {}", e.message()));
                false
            }
        }
    }
}
