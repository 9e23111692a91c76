//! Page endpoints
//!
//! - `GET /api/page/home` - Homepage
//! - `GET /api/page/{slug}` - Page by slug
//! - `GET /api/pages` - List pages
//! - `POST /api/pages` - Create page
//! - `PUT /api/pages/{id}` - Update page
//! - `DELETE /api/pages/{id}` - Delete page

use super::client::segment;
use super::{ApiClient, ApiError};
use crate::models::{CreatePageInput, ListQuery, Page, PagedList, UpdatePageInput};

impl ApiClient {
    /// GET /api/page/home
    pub async fn homepage(&self) -> Result<Page, ApiError> {
        self.send_json(self.get("/page/home")).await
    }

    /// GET /api/page/{slug}
    pub async fn page_by_slug(&self, slug: &str) -> Result<Page, ApiError> {
        self.send_json(self.get(&format!("/page/{}", segment(slug)))).await
    }

    /// GET /api/pages
    pub async fn list_pages(&self, query: &ListQuery) -> Result<PagedList<Page>, ApiError> {
        self.send_json(self.get("/pages").query(query)).await
    }

    /// POST /api/pages
    pub async fn create_page(&self, input: &CreatePageInput) -> Result<Page, ApiError> {
        let page: Page = self.send_json(self.post("/pages").json(input)).await?;
        tracing::info!(slug = %page.slug, "Page created");
        Ok(page)
    }

    /// PUT /api/pages/{id}
    pub async fn update_page(&self, id: &str, input: &UpdatePageInput) -> Result<(), ApiError> {
        self.send_empty(self.put(&format!("/pages/{}", segment(id))).json(input)).await?;
        tracing::info!(id, "Page updated");
        Ok(())
    }

    /// DELETE /api/pages/{id}
    pub async fn delete_page(&self, id: &str) -> Result<(), ApiError> {
        self.send_empty(self.delete(&format!("/pages/{}", segment(id)))).await?;
        tracing::info!(id, "Page deleted");
        Ok(())
    }
}
