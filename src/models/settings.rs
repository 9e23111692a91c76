//! Site settings
//!
//! `Settings` is the admin view of the settings document; `PublicSettings`
//! is the subset any visitor may read to style the site shell.

use serde::{Deserialize, Serialize};

/// Site background mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundType {
    #[default]
    Default,
    Color,
    Gradient,
    Image,
}

impl BackgroundType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackgroundType::Default => "default",
            BackgroundType::Color => "color",
            BackgroundType::Gradient => "gradient",
            BackgroundType::Image => "image",
        }
    }
}

impl std::fmt::Display for BackgroundType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BackgroundType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "color" => Ok(Self::Color),
            "gradient" => Ok(Self::Gradient),
            "image" => Ok(Self::Image),
            _ => Err(format!("Invalid background type: {}", s)),
        }
    }
}

/// Full settings document (`GET /api/settings`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_site_title")]
    pub site_title: String,
    #[serde(default = "default_site_email")]
    pub site_email: String,
    /// Maximum upload size in bytes
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    /// Seconds a visitor must wait between contact messages
    #[serde(default = "default_contact_cooldown")]
    pub contact_cooldown: u64,
    #[serde(default)]
    pub background_type: BackgroundType,
    #[serde(default)]
    pub background_value: Option<String>,
    #[serde(default)]
    pub background_image_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            site_title: default_site_title(),
            site_email: default_site_email(),
            max_file_size: default_max_file_size(),
            contact_cooldown: default_contact_cooldown(),
            background_type: BackgroundType::Default,
            background_value: None,
            background_image_url: None,
        }
    }
}

fn default_site_title() -> String {
    "Sectorfive Personal Website".to_string()
}

fn default_site_email() -> String {
    "admin@sectorfive.win".to_string()
}

fn default_max_file_size() -> u64 {
    5 * 1024 * 1024 * 1024 // 5GB
}

fn default_contact_cooldown() -> u64 {
    300
}

impl Settings {
    /// Form fields for `PUT /api/settings`; unset background fields are omitted
    pub fn to_form(&self) -> Vec<(&'static str, String)> {
        let mut form = vec![
            ("max_file_size", self.max_file_size.to_string()),
            ("site_title", self.site_title.clone()),
            ("site_email", self.site_email.clone()),
            ("contact_cooldown", self.contact_cooldown.to_string()),
            ("background_type", self.background_type.to_string()),
        ];
        if let Some(value) = &self.background_value {
            form.push(("background_value", value.clone()));
        }
        if let Some(url) = &self.background_image_url {
            form.push(("background_image_url", url.clone()));
        }
        form
    }
}

/// Public subset of the settings (`GET /api/public-settings`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicSettings {
    #[serde(default = "default_site_title")]
    pub site_title: String,
    #[serde(default)]
    pub background_type: BackgroundType,
    #[serde(default)]
    pub background_value: Option<String>,
    #[serde(default)]
    pub background_image_url: Option<String>,
}

impl Default for PublicSettings {
    fn default() -> Self {
        Self {
            site_title: default_site_title(),
            background_type: BackgroundType::Default,
            background_value: None,
            background_image_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_settings_defaults_fill_missing_fields() {
        let settings: Settings = serde_json::from_value(json!({"site_title": "Mine"})).unwrap();
        assert_eq!(settings.site_title, "Mine");
        assert_eq!(settings.contact_cooldown, 300);
        assert_eq!(settings.max_file_size, 5_368_709_120);
        assert_eq!(settings.background_type, BackgroundType::Default);
    }

    #[test]
    fn test_to_form_omits_unset_background_fields() {
        let form = Settings::default().to_form();
        let keys: Vec<_> = form.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            vec!["max_file_size", "site_title", "site_email", "contact_cooldown", "background_type"]
        );

        let settings = Settings {
            background_type: BackgroundType::Color,
            background_value: Some("#112233".to_string()),
            ..Settings::default()
        };
        let form = settings.to_form();
        assert!(form.contains(&("background_type", "color".to_string())));
        assert!(form.contains(&("background_value", "#112233".to_string())));
    }

    #[test]
    fn test_background_type_parse() {
        assert_eq!("Gradient".parse::<BackgroundType>().unwrap(), BackgroundType::Gradient);
        assert!("video".parse::<BackgroundType>().is_err());
    }
}
