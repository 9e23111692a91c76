//! Admin dashboard: record counts at a glance

use crate::api::ApiError;
use crate::context::AppContext;
use crate::models::{ListQuery, Paged};

pub const UNKNOWN_COUNT: &str = "—";

/// One count per content type; `None` when its fetch failed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardCounts {
    pub pages: Option<u64>,
    pub posts: Option<u64>,
    pub images: Option<u64>,
    pub messages: Option<u64>,
}

fn count<P: Paged>(label: &str, result: Result<P, ApiError>) -> Option<u64> {
    match result {
        Ok(page) => Some(page.pagination().total_results),
        Err(e) => {
            tracing::warn!("Failed to count {}: {}", label, e);
            None
        }
    }
}

pub struct Dashboard {
    pub counts: DashboardCounts,
}

impl Dashboard {
    /// Fetch the four counts concurrently
    pub async fn open(ctx: &AppContext) -> Self {
        let query = ListQuery::new(1);
        let api = &ctx.api;
        let (pages, posts, images, messages) = futures::join!(
            api.list_pages(&query),
            api.list_posts(&query),
            api.list_gallery(&query),
            api.list_contact_messages(&query),
        );

        Self {
            counts: DashboardCounts {
                pages: count("pages", pages),
                posts: count("posts", posts),
                images: count("images", images),
                messages: count("messages", messages),
            },
        }
    }

    /// Label and display value for each card
    pub fn cards(&self) -> Vec<(&'static str, String)> {
        let show = |n: Option<u64>| n.map_or_else(|| UNKNOWN_COUNT.to_string(), |n| n.to_string());
        vec![
            ("📄 Pages", show(self.counts.pages)),
            ("📝 Blog posts", show(self.counts.posts)),
            ("🖼️ Gallery images", show(self.counts.images)),
            ("✉️ Messages", show(self.counts.messages)),
        ]
    }
}
