//! Blog posts panel

use async_trait::async_trait;

use super::{Editable, Resource};
use crate::api::{ApiClient, ApiError};
use crate::models::{CreatePostInput, Post, UpdatePostInput};
use crate::paging::PostSource;
use crate::views::form::{changed, join_tags, optional, required, split_tags, FormError};
use crate::views::ViewError;

/// Post form state; tags are edited as comma separated text
#[derive(Debug, Clone, PartialEq)]
pub struct PostForm {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub tags_text: String,
    pub featured_image: String,
    pub published: bool,
    pub author: String,
    pub meta_description: String,
}

impl Default for PostForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            slug: String::new(),
            content: String::new(),
            excerpt: String::new(),
            tags_text: String::new(),
            featured_image: String::new(),
            published: true,
            author: String::new(),
            meta_description: String::new(),
        }
    }
}

impl PostForm {
    pub fn tags(&self) -> Vec<String> {
        split_tags(&self.tags_text)
    }

    pub fn to_create(&self) -> Result<CreatePostInput, FormError> {
        Ok(CreatePostInput {
            title: required("title", &self.title)?.to_string(),
            slug: required("slug", &self.slug)?.to_string(),
            content: required("content", &self.content)?.to_string(),
            excerpt: optional(&self.excerpt),
            tags: self.tags(),
            featured_image: optional(&self.featured_image),
            published: self.published,
            author: optional(&self.author),
            meta_description: optional(&self.meta_description),
        })
    }

    /// Fields changed since `original` was loaded; the slug stays as
    /// created. A cleared optional field is sent as an empty string.
    pub fn to_update(&self, original: &PostForm) -> Result<UpdatePostInput, FormError> {
        let tags = self.tags();
        let input = UpdatePostInput {
            title: changed(required("title", &self.title)?, &original.title),
            content: changed(required("content", &self.content)?, &original.content),
            excerpt: changed(&self.excerpt, &original.excerpt),
            tags: (tags != original.tags()).then_some(tags),
            featured_image: changed(&self.featured_image, &original.featured_image),
            published: (self.published != original.published).then_some(self.published),
            author: changed(&self.author, &original.author),
            meta_description: changed(&self.meta_description, &original.meta_description),
        };
        if !input.has_changes() {
            return Err(FormError::NothingToUpdate);
        }
        Ok(input)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Posts;

#[async_trait]
impl Resource for Posts {
    type Item = Post;
    type Source = PostSource;
    type Form = PostForm;

    const NAME: &'static str = "Post";

    fn source(&self, api: ApiClient) -> PostSource {
        PostSource::new(api)
    }

    fn id<'a>(&self, item: &'a Post) -> &'a str {
        &item.id
    }

    async fn delete(&self, api: &ApiClient, id: &str) -> Result<(), ApiError> {
        api.delete_post(id).await
    }
}

#[async_trait]
impl Editable for Posts {
    fn form_from(&self, post: &Post) -> PostForm {
        PostForm {
            title: post.title.clone(),
            slug: post.slug.clone(),
            content: post.content.clone(),
            excerpt: post.excerpt.clone().unwrap_or_default(),
            tags_text: join_tags(&post.tags),
            featured_image: post.featured_image.clone().unwrap_or_default(),
            published: post.published,
            author: post.author.clone().unwrap_or_default(),
            meta_description: post.meta_description.clone().unwrap_or_default(),
        }
    }

    async fn create(&self, api: &ApiClient, form: &PostForm) -> Result<(), ViewError> {
        let input = form.to_create()?;
        api.create_post(&input).await?;
        Ok(())
    }

    async fn update(
        &self,
        api: &ApiClient,
        id: &str,
        original: &PostForm,
        form: &PostForm,
    ) -> Result<(), ViewError> {
        let input = form.to_update(original)?;
        api.update_post(id, &input).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_post_form_splits_tags() {
        let form = PostForm {
            title: "Hello".to_string(),
            slug: "hello".to_string(),
            content: "Body".to_string(),
            tags_text: "rust, , web,rust".to_string(),
            ..PostForm::default()
        };
        let input = form.to_create().unwrap();
        assert_eq!(input.tags, vec!["rust", "web", "rust"]);
        assert!(input.published);
        assert!(input.excerpt.is_none());
    }

    #[test]
    fn test_post_form_requires_content() {
        let form = PostForm {
            title: "Hello".to_string(),
            slug: "hello".to_string(),
            ..PostForm::default()
        };
        assert_eq!(form.to_create().unwrap_err(), FormError::Required("content"));
    }

    fn loaded_post() -> PostForm {
        PostForm {
            title: "Hello".to_string(),
            slug: "hello".to_string(),
            content: "Body".to_string(),
            excerpt: "Short".to_string(),
            tags_text: "a, b".to_string(),
            featured_image: "/api/uploads/cover.png".to_string(),
            author: "admin".to_string(),
            meta_description: "About hello".to_string(),
            ..PostForm::default()
        }
    }

    #[test]
    fn test_post_update_payload() {
        let original = loaded_post();
        let form = PostForm {
            title: "Hello again".to_string(),
            tags_text: "a,b".to_string(),
            published: false,
            ..original.clone()
        };
        assert_eq!(
            serde_json::to_value(form.to_update(&original).unwrap()).unwrap(),
            json!({"title": "Hello again", "published": false})
        );
    }

    #[test]
    fn test_post_update_sends_cleared_fields() {
        let original = loaded_post();
        let form = PostForm {
            excerpt: String::new(),
            featured_image: "  ".to_string(),
            author: String::new(),
            meta_description: String::new(),
            tags_text: String::new(),
            ..original.clone()
        };
        assert_eq!(
            serde_json::to_value(form.to_update(&original).unwrap()).unwrap(),
            json!({
                "excerpt": "",
                "tags": [],
                "featured_image": "",
                "author": "",
                "meta_description": ""
            })
        );
    }

    #[test]
    fn test_post_update_without_changes_is_rejected() {
        let original = loaded_post();
        assert_eq!(
            original.clone().to_update(&original).unwrap_err(),
            FormError::NothingToUpdate
        );
    }
}
