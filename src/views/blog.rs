//! Blog list and single post

use super::LoadState;
use crate::context::AppContext;
use crate::models::{ListQuery, Post};
use crate::paging::{PagedResource, PostSource, RefreshOutcome};
use crate::render;

pub const POST_NOT_FOUND: &str = "Post not found 😕";
pub const NO_POSTS: &str = "No blog posts yet. Check back soon! 📰";

/// Published posts with search, tag filter and pagination
pub struct BlogView {
    posts: PagedResource<PostSource>,
    tags: Vec<String>,
}

impl BlogView {
    /// Load the first page and the tag cloud concurrently
    pub async fn open(ctx: &AppContext) -> Self {
        let query = ListQuery::new(ctx.config.listing.blog_per_page).with_published(Some(true));
        let posts = PagedResource::new(PostSource::new(ctx.api.clone()), query);

        let (_, tags) = futures::join!(posts.refresh(), ctx.api.blog_tags());
        let tags = tags.unwrap_or_else(|e| {
            tracing::warn!("Failed to fetch blog tags: {}", e);
            Vec::new()
        });

        Self { posts, tags }
    }

    pub fn posts(&self) -> &PagedResource<PostSource> {
        &self.posts
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn selected_tags(&self) -> Vec<String> {
        self.posts.query().tags
    }

    pub async fn search(&self, text: &str) -> RefreshOutcome {
        self.posts.set_search(text).await
    }

    pub async fn toggle_tag(&self, tag: &str) -> RefreshOutcome {
        self.posts.toggle_tag(tag).await
    }

    /// One line per post: title, date and excerpt
    pub fn previews(&self) -> Vec<PostPreview> {
        self.posts.items().iter().map(PostPreview::from).collect()
    }
}

/// What a list shows for one post
#[derive(Debug, Clone, PartialEq)]
pub struct PostPreview {
    pub title: String,
    pub slug: String,
    pub date: String,
    pub excerpt: String,
    pub tags: Vec<String>,
}

impl From<&Post> for PostPreview {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            slug: post.slug.clone(),
            date: render::format_date(&post.created_at),
            excerpt: render::excerpt(post),
            tags: post.tags.clone(),
        }
    }
}

/// A single post by slug
#[derive(Debug, Clone)]
pub struct BlogPostView {
    pub slug: String,
    pub state: LoadState<Post>,
}

impl BlogPostView {
    pub async fn load(ctx: &AppContext, slug: &str) -> Self {
        Self {
            slug: slug.to_string(),
            state: LoadState::from_result(ctx.api.post_by_slug(slug).await),
        }
    }

    pub fn content_html(&self, ctx: &AppContext) -> Option<String> {
        self.state
            .loaded()
            .map(|post| ctx.renderer().content_html(&post.content))
    }
}
