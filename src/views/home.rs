//! Homepage

use crate::context::AppContext;

/// The homepage content, or the configured fallback text
#[derive(Debug, Clone, PartialEq)]
pub struct HomeView {
    pub title: String,
    /// Rendered HTML
    pub content: String,
    /// False when the fallback text is shown
    pub from_server: bool,
}

impl HomeView {
    /// Fetch `/api/page/home`; any failure shows the default text instead
    pub async fn load(ctx: &AppContext) -> Self {
        let renderer = ctx.renderer();
        match ctx.api.homepage().await {
            Ok(page) => Self {
                title: page.title,
                content: renderer.content_html(&page.content),
                from_server: true,
            },
            Err(e) => {
                tracing::warn!("Failed to fetch homepage, using default text: {}", e);
                Self {
                    title: "Welcome to Sectorfive.win".to_string(),
                    content: renderer.content_html(&ctx.config.site.default_home_text),
                    from_server: false,
                }
            }
        }
    }
}
