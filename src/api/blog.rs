//! Blog endpoints
//!
//! - `GET /api/blog` - List posts (search, tags, published, pagination)
//! - `GET /api/blog/{slug}` - Post by slug
//! - `GET /api/blog/tags` - All tags in use
//! - `POST /api/blog` - Create post
//! - `PUT /api/blog/{id}` - Update post
//! - `DELETE /api/blog/{id}` - Delete post

use serde::Deserialize;

use super::client::segment;
use super::{ApiClient, ApiError};
use crate::models::{CreatePostInput, ListQuery, PagedList, Post, UpdatePostInput};

/// Tag list body: a bare array or `{"tags": [...]}`
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum TagList {
    Bare(Vec<String>),
    Wrapped { tags: Vec<String> },
}

impl From<TagList> for Vec<String> {
    fn from(list: TagList) -> Self {
        match list {
            TagList::Bare(tags) | TagList::Wrapped { tags } => tags,
        }
    }
}

impl ApiClient {
    /// GET /api/blog
    pub async fn list_posts(&self, query: &ListQuery) -> Result<PagedList<Post>, ApiError> {
        self.send_json(self.get("/blog").query(query)).await
    }

    /// GET /api/blog/{slug}
    pub async fn post_by_slug(&self, slug: &str) -> Result<Post, ApiError> {
        self.send_json(self.get(&format!("/blog/{}", segment(slug)))).await
    }

    /// GET /api/blog/tags
    pub async fn blog_tags(&self) -> Result<Vec<String>, ApiError> {
        let tags: TagList = self.send_json(self.get("/blog/tags")).await?;
        Ok(tags.into())
    }

    /// POST /api/blog
    pub async fn create_post(&self, input: &CreatePostInput) -> Result<Post, ApiError> {
        let post: Post = self.send_json(self.post("/blog").json(input)).await?;
        tracing::info!(slug = %post.slug, "Post created");
        Ok(post)
    }

    /// PUT /api/blog/{id}
    pub async fn update_post(&self, id: &str, input: &UpdatePostInput) -> Result<(), ApiError> {
        self.send_empty(self.put(&format!("/blog/{}", segment(id))).json(input)).await?;
        tracing::info!(id, "Post updated");
        Ok(())
    }

    /// DELETE /api/blog/{id}
    pub async fn delete_post(&self, id: &str) -> Result<(), ApiError> {
        self.send_empty(self.delete(&format!("/blog/{}", segment(id)))).await?;
        tracing::info!(id, "Post deleted");
        Ok(())
    }
}
