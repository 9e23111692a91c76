//! Public image gallery

use crate::context::AppContext;
use crate::models::{GalleryImage, ListQuery};
use crate::paging::{GallerySource, PagedResource, RefreshOutcome};

pub const NO_IMAGES: &str = "No images yet. 📸";

/// Gallery images with search, tag filter and a featured-only switch
pub struct GalleryView {
    images: PagedResource<GallerySource>,
    tags: Vec<String>,
}

impl GalleryView {
    pub async fn open(ctx: &AppContext) -> Self {
        let query = ListQuery::new(ctx.config.listing.gallery_per_page);
        let images = PagedResource::new(GallerySource::new(ctx.api.clone()), query);

        let (_, tags) = futures::join!(images.refresh(), ctx.api.gallery_tags());
        let tags = tags.unwrap_or_else(|e| {
            tracing::warn!("Failed to fetch gallery tags: {}", e);
            Vec::new()
        });

        Self { images, tags }
    }

    pub fn images(&self) -> &PagedResource<GallerySource> {
        &self.images
    }

    pub fn items(&self) -> Vec<GalleryImage> {
        self.images.items()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub async fn search(&self, text: &str) -> RefreshOutcome {
        self.images.set_search(text).await
    }

    pub async fn toggle_tag(&self, tag: &str) -> RefreshOutcome {
        self.images.toggle_tag(tag).await
    }

    /// Show only featured images, or everything
    pub async fn set_featured_only(&self, featured_only: bool) -> RefreshOutcome {
        self.images
            .set_featured(featured_only.then_some(true))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{envelope, image_json, StubApi};
    use crate::context::testing::stub_context;
    use serde_json::json;

    #[tokio::test]
    async fn test_gallery_featured_filter() {
        let stub = StubApi::start().await;
        stub.on(
            "GET",
            "/api/gallery",
            200,
            envelope("images", vec![image_json("g1", true), image_json("g2", false)], 1, 1),
        );
        stub.on("GET", "/api/gallery/tags", 200, json!(["retro"]));

        let gallery = GalleryView::open(&stub_context(&stub)).await;
        assert_eq!(gallery.items().len(), 2);
        assert_eq!(gallery.tags(), ["retro"]);

        let list_request = stub
            .requests()
            .into_iter()
            .find(|r| r.path == "/api/gallery")
            .unwrap();
        assert_eq!(list_request.query_param("limit").as_deref(), Some("12"));
        assert!(list_request.query_param("featured").is_none());

        gallery.set_featured_only(true).await;
        assert_eq!(stub.last().query_param("featured").as_deref(), Some("true"));

        gallery.set_featured_only(false).await;
        assert!(stub.last().query_param("featured").is_none());
    }
}
