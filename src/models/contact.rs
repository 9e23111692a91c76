//! Contact form submissions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

/// Message left through the public contact form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/contact`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContactInput {
    pub name: String,
    pub email: String,
    pub message: String,
}
