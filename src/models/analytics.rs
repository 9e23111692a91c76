//! Visitor analytics report

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::pagination::{Paged, Pagination};
use super::timestamp;

/// A single recorded page visit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Visit {
    #[serde(default)]
    pub id: Option<String>,
    pub ip_address: String,
    #[serde(default)]
    pub user_agent: String,
    pub page_url: String,
    #[serde(default)]
    pub referer: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub browser: Option<String>,
    #[serde(default)]
    pub os: Option<String>,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// Aggregation bucket (`{"_id": key, "count": n}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountBucket {
    #[serde(rename = "_id", default)]
    pub key: Option<String>,
    pub count: u64,
}

impl CountBucket {
    pub fn label(&self) -> &str {
        self.key.as_deref().unwrap_or("Unknown")
    }
}

/// Body of `GET /api/analytics`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsReport {
    #[serde(default)]
    pub total_visits: u64,
    #[serde(default)]
    pub unique_visitors: u64,
    #[serde(default)]
    pub recent_visits: Vec<Visit>,
    #[serde(default)]
    pub top_pages: Vec<CountBucket>,
    #[serde(default)]
    pub top_countries: Vec<CountBucket>,
    #[serde(default)]
    pub top_browsers: Vec<CountBucket>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

impl Paged for AnalyticsReport {
    type Item = Visit;

    fn items(&self) -> &[Visit] {
        &self.recent_visits
    }

    fn pagination(&self) -> Pagination {
        self.pagination
            .unwrap_or_else(|| Pagination::single(self.recent_visits.len()))
    }
}
