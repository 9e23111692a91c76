//! Visitor analytics endpoint

use super::{ApiClient, ApiError};
use crate::models::{AnalyticsReport, ListQuery};

impl ApiClient {
    /// GET /api/analytics
    ///
    /// Honours `search`, `country`, `page` and `limit` from the query.
    pub async fn analytics(&self, query: &ListQuery) -> Result<AnalyticsReport, ApiError> {
        self.send_json(self.get("/analytics").query(query)).await
    }
}
