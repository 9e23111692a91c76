//! Authentication payloads
//!
//! The site has a single administrator account. The client only ever sees
//! it through these login, profile and credential-change payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

/// Body of `POST /api/login`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Response of `POST /api/login`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    /// Set while the account still uses its default credentials
    #[serde(default)]
    pub must_change_password: bool,
}

/// Response of `GET /api/me`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Me {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub must_change_password: bool,
    #[serde(default, with = "timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Form body of `POST /api/change-credentials`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChangeCredentialsInput {
    pub old_password: String,
    pub new_username: String,
    pub new_password: String,
}

/// Form body of `POST /api/change-password`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChangePasswordInput {
    pub old_password: String,
    pub new_password: String,
}
