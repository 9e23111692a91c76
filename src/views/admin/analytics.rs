//! Analytics panel

use crate::context::AppContext;
use crate::models::{AnalyticsReport, CountBucket, ListQuery, Visit};
use crate::paging::{AnalyticsSource, PageControls, PagedResource, RefreshOutcome};

/// Totals, top lists and paged recent visits
pub struct AnalyticsPanel {
    report: PagedResource<AnalyticsSource>,
}

impl AnalyticsPanel {
    pub async fn open(ctx: &AppContext) -> Self {
        let query = ListQuery::new(ctx.config.listing.analytics_per_page);
        let report = PagedResource::new(AnalyticsSource::new(ctx.api.clone()), query);
        report.refresh().await;
        Self { report }
    }

    /// Last loaded report; `None` until the first fetch succeeds
    pub fn report(&self) -> Option<AnalyticsReport> {
        self.report.current()
    }

    pub fn visits(&self) -> Vec<Visit> {
        self.report.items()
    }

    pub fn top_countries(&self) -> Vec<CountBucket> {
        self.report()
            .map(|report| report.top_countries)
            .unwrap_or_default()
    }

    pub fn error(&self) -> Option<String> {
        self.report.error()
    }

    pub fn controls(&self) -> PageControls {
        self.report.controls()
    }

    pub async fn search(&self, text: &str) -> RefreshOutcome {
        self.report.set_search(text).await
    }

    /// Filter by country; `all` clears the filter
    pub async fn set_country(&self, country: &str) -> RefreshOutcome {
        self.report.set_country(country).await
    }

    pub async fn set_page(&self, page: u32) -> Option<RefreshOutcome> {
        self.report.set_page(page).await
    }

    pub async fn next_page(&self) -> Option<RefreshOutcome> {
        self.report.next_page().await
    }

    pub async fn prev_page(&self) -> Option<RefreshOutcome> {
        self.report.prev_page().await
    }
}
