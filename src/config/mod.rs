//! Configuration management
//!
//! This module handles loading and parsing configuration for the Sectorfive client.
//! Configuration can be loaded from:
//! - config.yml file
//! - Environment variables (override file settings)
//!
//! Missing optional values are filled with sensible defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Site API configuration
    #[serde(default)]
    pub api: ApiConfig,
    /// Session storage configuration
    #[serde(default)]
    pub session: SessionConfig,
    /// List page sizes
    #[serde(default)]
    pub listing: ListingConfig,
    /// Site shell configuration
    #[serde(default)]
    pub site: SiteConfig,
    /// Content rendering configuration
    #[serde(default)]
    pub render: RenderConfig,
}

/// Site API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Backend base URL; `/api` is appended by the client
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_backend_url() -> String {
    "http://localhost:8001".to_string()
}

fn default_user_agent() -> String {
    format!("sectorfive/{}", env!("CARGO_PKG_VERSION"))
}

/// Session storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// File holding the bearer token between runs
    #[serde(default = "default_token_path")]
    pub token_path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_path: default_token_path(),
        }
    }
}

fn default_token_path() -> PathBuf {
    PathBuf::from("data/session.token")
}

/// Page sizes requested from list endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    #[serde(default = "default_blog_per_page")]
    pub blog_per_page: u32,
    #[serde(default = "default_gallery_per_page")]
    pub gallery_per_page: u32,
    #[serde(default = "default_admin_per_page")]
    pub admin_per_page: u32,
    #[serde(default = "default_analytics_per_page")]
    pub analytics_per_page: u32,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            blog_per_page: default_blog_per_page(),
            gallery_per_page: default_gallery_per_page(),
            admin_per_page: default_admin_per_page(),
            analytics_per_page: default_analytics_per_page(),
        }
    }
}

fn default_blog_per_page() -> u32 {
    10
}

fn default_gallery_per_page() -> u32 {
    12
}

fn default_admin_per_page() -> u32 {
    20
}

fn default_analytics_per_page() -> u32 {
    50
}

/// Site shell configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Path of the admin panel route
    #[serde(default = "default_admin_path")]
    pub admin_path: String,
    /// Text shown when the homepage cannot be fetched
    #[serde(default = "default_home_text")]
    pub default_home_text: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            admin_path: default_admin_path(),
            default_home_text: default_home_text(),
        }
    }
}

fn default_admin_path() -> String {
    "/admin".to_string()
}

fn default_home_text() -> String {
    "Welcome to Sectorfive.win! 🚀".to_string()
}

/// Content rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Run server HTML through the allow-list sanitizer before display
    #[serde(default = "default_sanitize_html")]
    pub sanitize_html: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            sanitize_html: default_sanitize_html(),
        }
    }
}

fn default_sanitize_html() -> bool {
    true
}

/// Error type for configuration parsing
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {message}")]
    ParseError {
        path: String,
        message: String,
    },
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

impl Config {
    /// Load configuration from file
    ///
    /// If the file doesn't exist, returns default configuration.
    /// If the file exists but is invalid YAML, returns an error with details.
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(&content).map_err(|e| {
            ConfigError::ParseError {
                path: path.display().to_string(),
                message: format_yaml_error(&e),
            }
        })?;

        Ok(config)
    }

    /// Load configuration from file with environment variable overrides,
    /// then validate the result.
    ///
    /// Environment variables follow the pattern:
    /// - SECTORFIVE_BACKEND_URL
    /// - SECTORFIVE_USER_AGENT
    /// - SECTORFIVE_TOKEN_PATH
    /// - SECTORFIVE_BLOG_PER_PAGE
    /// - SECTORFIVE_GALLERY_PER_PAGE
    /// - SECTORFIVE_ADMIN_PER_PAGE
    /// - SECTORFIVE_ANALYTICS_PER_PAGE
    /// - SECTORFIVE_ADMIN_PATH
    /// - SECTORFIVE_DEFAULT_HOME_TEXT
    /// - SECTORFIVE_SANITIZE_HTML
    pub fn load_with_env(path: &std::path::Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("SECTORFIVE_BACKEND_URL") {
            self.api.backend_url = url;
        }
        if let Ok(agent) = std::env::var("SECTORFIVE_USER_AGENT") {
            self.api.user_agent = agent;
        }

        if let Ok(path) = std::env::var("SECTORFIVE_TOKEN_PATH") {
            self.session.token_path = PathBuf::from(path);
        }

        override_u32("SECTORFIVE_BLOG_PER_PAGE", &mut self.listing.blog_per_page);
        override_u32("SECTORFIVE_GALLERY_PER_PAGE", &mut self.listing.gallery_per_page);
        override_u32("SECTORFIVE_ADMIN_PER_PAGE", &mut self.listing.admin_per_page);
        override_u32("SECTORFIVE_ANALYTICS_PER_PAGE", &mut self.listing.analytics_per_page);

        if let Ok(admin_path) = std::env::var("SECTORFIVE_ADMIN_PATH") {
            self.site.admin_path = admin_path;
        }
        if let Ok(text) = std::env::var("SECTORFIVE_DEFAULT_HOME_TEXT") {
            self.site.default_home_text = text;
        }

        if let Ok(flag) = std::env::var("SECTORFIVE_SANITIZE_HTML") {
            match flag.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.render.sanitize_html = true,
                "0" | "false" | "no" | "off" => self.render.sanitize_html = false,
                _ => {} // Ignore invalid values
            }
        }
    }

    /// Check values that would make every request or route fail
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api.backend_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "api.backend_url must start with http:// or https://, got '{}'",
                self.api.backend_url
            )));
        }

        let sizes = [
            ("listing.blog_per_page", self.listing.blog_per_page),
            ("listing.gallery_per_page", self.listing.gallery_per_page),
            ("listing.admin_per_page", self.listing.admin_per_page),
            ("listing.analytics_per_page", self.listing.analytics_per_page),
        ];
        for (name, value) in sizes {
            if value == 0 {
                return Err(ConfigError::ValidationError(format!("{} must be at least 1", name)));
            }
        }

        if !self.site.admin_path.starts_with('/') || self.site.admin_path.len() < 2 {
            return Err(ConfigError::ValidationError(format!(
                "site.admin_path must be an absolute path such as /admin, got '{}'",
                self.site.admin_path
            )));
        }

        Ok(())
    }
}

fn override_u32(key: &str, target: &mut u32) {
    if let Ok(value) = std::env::var(key) {
        if let Ok(value) = value.parse::<u32>() {
            *target = value;
        }
    }
}

/// Format YAML parsing error with location and context
fn format_yaml_error(e: &serde_yaml::Error) -> String {
    if let Some(location) = e.location() {
        format!(
            "at line {}, column {}: {}",
            location.line(),
            location.column(),
            e
        )
    } else {
        e.to_string()
    }
}

// Shared mutex for all config tests that modify environment variables.
#[cfg(test)]
static CONFIG_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
const ENV_KEYS: &[&str] = &[
    "SECTORFIVE_BACKEND_URL",
    "SECTORFIVE_USER_AGENT",
    "SECTORFIVE_TOKEN_PATH",
    "SECTORFIVE_BLOG_PER_PAGE",
    "SECTORFIVE_GALLERY_PER_PAGE",
    "SECTORFIVE_ADMIN_PER_PAGE",
    "SECTORFIVE_ANALYTICS_PER_PAGE",
    "SECTORFIVE_ADMIN_PATH",
    "SECTORFIVE_DEFAULT_HOME_TEXT",
    "SECTORFIVE_SANITIZE_HTML",
];

#[cfg(test)]
fn clear_env() {
    for key in ENV_KEYS {
        std::env::remove_var(key);
    }
}
