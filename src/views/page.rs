//! Custom page by slug

use super::LoadState;
use crate::context::AppContext;
use crate::models::Page;

pub const PAGE_NOT_FOUND: &str = "Page not found 😕";

#[derive(Debug, Clone)]
pub struct PageView {
    pub slug: String,
    pub state: LoadState<Page>,
}

impl PageView {
    pub async fn load(ctx: &AppContext, slug: &str) -> Self {
        Self {
            slug: slug.to_string(),
            state: LoadState::from_result(ctx.api.page_by_slug(slug).await),
        }
    }

    /// Rendered content of the loaded page
    pub fn content_html(&self, ctx: &AppContext) -> Option<String> {
        self.state
            .loaded()
            .map(|page| ctx.renderer().content_html(&page.content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{page_json, StubApi};
    use crate::context::testing::stub_context;
    use serde_json::json;

    #[tokio::test]
    async fn test_page_loaded_and_rendered() {
        let stub = StubApi::start().await;
        stub.on("GET", "/api/page/about", 200, page_json("p2", "about", false));
        let ctx = stub_context(&stub);

        let view = PageView::load(&ctx, "about").await;
        assert_eq!(view.state.loaded().unwrap().title, "Title about");
        assert_eq!(view.content_html(&ctx).as_deref(), Some("<p>about</p>"));
    }

    #[tokio::test]
    async fn test_page_not_found() {
        let stub = StubApi::start().await;
        stub.on("GET", "/api/page/nope", 404, json!({"detail": "Page not found"}));
        let ctx = stub_context(&stub);

        let view = PageView::load(&ctx, "nope").await;
        assert_eq!(view.state.loaded().map(|p| p.id.clone()), None);
        assert!(matches!(view.state, LoadState::NotFound));
        assert!(view.content_html(&ctx).is_none());
    }
}
