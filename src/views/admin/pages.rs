//! Pages panel

use async_trait::async_trait;

use super::{Editable, Resource};
use crate::api::{ApiClient, ApiError};
use crate::models::{CreatePageInput, Page, UpdatePageInput};
use crate::paging::PageSource;
use crate::views::form::{changed, required, FormError};
use crate::views::ViewError;

/// Page form state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageForm {
    pub title: String,
    pub slug: String,
    pub content: String,
}

impl PageForm {
    pub fn to_create(&self) -> Result<CreatePageInput, FormError> {
        Ok(CreatePageInput {
            title: required("title", &self.title)?.to_string(),
            slug: required("slug", &self.slug)?.to_string(),
            content: self.content.clone(),
        })
    }

    /// Fields changed since `original` was loaded. The slug is fixed once
    /// a page exists.
    pub fn to_update(&self, original: &PageForm) -> Result<UpdatePageInput, FormError> {
        let input = UpdatePageInput {
            title: changed(required("title", &self.title)?, &original.title),
            content: (self.content != original.content).then(|| self.content.clone()),
        };
        if !input.has_changes() {
            return Err(FormError::NothingToUpdate);
        }
        Ok(input)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Pages;

#[async_trait]
impl Resource for Pages {
    type Item = Page;
    type Source = PageSource;
    type Form = PageForm;

    const NAME: &'static str = "Page";

    fn source(&self, api: ApiClient) -> PageSource {
        PageSource::new(api)
    }

    fn id<'a>(&self, item: &'a Page) -> &'a str {
        &item.id
    }

    async fn delete(&self, api: &ApiClient, id: &str) -> Result<(), ApiError> {
        api.delete_page(id).await
    }
}

#[async_trait]
impl Editable for Pages {
    fn form_from(&self, page: &Page) -> PageForm {
        PageForm {
            title: page.title.clone(),
            slug: page.slug.clone(),
            content: page.content.clone(),
        }
    }

    async fn create(&self, api: &ApiClient, form: &PageForm) -> Result<(), ViewError> {
        let input = form.to_create()?;
        api.create_page(&input).await?;
        Ok(())
    }

    async fn update(
        &self,
        api: &ApiClient,
        id: &str,
        original: &PageForm,
        form: &PageForm,
    ) -> Result<(), ViewError> {
        let input = form.to_update(original)?;
        api.update_page(id, &input).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_form_requires_title_and_slug() {
        let form = PageForm {
            title: "About".to_string(),
            ..PageForm::default()
        };
        assert_eq!(form.to_create().unwrap_err(), FormError::Required("slug"));

        let form = PageForm {
            title: " About ".to_string(),
            slug: "about".to_string(),
            content: "Hi".to_string(),
        };
        let input = form.to_create().unwrap();
        assert_eq!(input.title, "About");
        assert_eq!(input.slug, "about");
    }

    #[test]
    fn test_page_update_sends_changed_fields_only() {
        let original = PageForm {
            title: "About".to_string(),
            slug: "about".to_string(),
            content: "Old".to_string(),
        };
        let form = PageForm {
            slug: "ignored".to_string(),
            content: String::new(),
            ..original.clone()
        };
        let body = serde_json::to_value(form.to_update(&original).unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"content": ""}));
    }

    #[test]
    fn test_page_update_without_changes_is_rejected() {
        let original = PageForm {
            title: "About".to_string(),
            slug: "about".to_string(),
            content: "Hi".to_string(),
        };
        let form = PageForm {
            title: " About ".to_string(),
            ..original.clone()
        };
        assert_eq!(form.to_update(&original).unwrap_err(), FormError::NothingToUpdate);

        let form = PageForm {
            title: String::new(),
            ..original.clone()
        };
        assert_eq!(form.to_update(&original).unwrap_err(), FormError::Required("title"));
    }
}
