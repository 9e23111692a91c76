//! List sources backed by the site API

use async_trait::async_trait;

use super::ListSource;
use crate::api::{ApiClient, ApiError};
use crate::models::{AnalyticsReport, ContactMessage, GalleryImage, ListQuery, Page, PagedList, Post};

macro_rules! api_list_source {
    ($(#[$meta:meta])* $name:ident, $page:ty, $method:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            api: ApiClient,
        }

        impl $name {
            pub fn new(api: ApiClient) -> Self {
                Self { api }
            }
        }

        #[async_trait]
        impl ListSource for $name {
            type Page = $page;

            async fn fetch(&self, query: &ListQuery) -> Result<Self::Page, ApiError> {
                self.api.$method(query).await
            }
        }
    };
}

api_list_source!(
    /// `GET /api/blog`
    PostSource,
    PagedList<Post>,
    list_posts
);

api_list_source!(
    /// `GET /api/gallery`
    GallerySource,
    PagedList<GalleryImage>,
    list_gallery
);

api_list_source!(
    /// `GET /api/pages`
    PageSource,
    PagedList<Page>,
    list_pages
);

api_list_source!(
    /// `GET /api/contact-messages`
    MessageSource,
    PagedList<ContactMessage>,
    list_contact_messages
);

api_list_source!(
    /// `GET /api/analytics`, paged over recent visits
    AnalyticsSource,
    AnalyticsReport,
    analytics
);
