//! Gallery panel

use async_trait::async_trait;

use super::{Editable, Resource};
use crate::api::{ApiClient, ApiError};
use crate::models::{GalleryImage, NewGalleryImage, UpdateGalleryInput, UploadFile};
use crate::paging::GallerySource;
use crate::views::form::{changed, join_tags, required, split_tags, FormError};
use crate::views::ViewError;

/// Gallery form state. The file is only sent on create; size and type are
/// left to the server.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GalleryForm {
    pub title: String,
    pub description: String,
    pub tags_text: String,
    pub is_featured: bool,
    pub file: Option<UploadFile>,
}

impl GalleryForm {
    pub fn to_upload(&self) -> Result<NewGalleryImage, FormError> {
        let file = self.file.clone().ok_or(FormError::MissingFile)?;
        Ok(NewGalleryImage {
            title: required("title", &self.title)?.to_string(),
            description: self.description.trim().to_string(),
            tags: split_tags(&self.tags_text),
            is_featured: self.is_featured,
            file,
        })
    }

    /// Metadata changed since `original` was loaded
    pub fn to_update(&self, original: &GalleryForm) -> Result<UpdateGalleryInput, FormError> {
        let tags = split_tags(&self.tags_text);
        let input = UpdateGalleryInput {
            title: changed(required("title", &self.title)?, &original.title),
            description: changed(&self.description, &original.description),
            tags: (tags != split_tags(&original.tags_text)).then_some(tags),
            is_featured: (self.is_featured != original.is_featured).then_some(self.is_featured),
        };
        if !input.has_changes() {
            return Err(FormError::NothingToUpdate);
        }
        Ok(input)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GalleryImages;

#[async_trait]
impl Resource for GalleryImages {
    type Item = GalleryImage;
    type Source = GallerySource;
    type Form = GalleryForm;

    const NAME: &'static str = "Image";

    fn source(&self, api: ApiClient) -> GallerySource {
        GallerySource::new(api)
    }

    fn id<'a>(&self, item: &'a GalleryImage) -> &'a str {
        &item.id
    }

    async fn delete(&self, api: &ApiClient, id: &str) -> Result<(), ApiError> {
        api.delete_gallery_image(id).await
    }
}

#[async_trait]
impl Editable for GalleryImages {
    fn form_from(&self, image: &GalleryImage) -> GalleryForm {
        GalleryForm {
            title: image.title.clone(),
            description: image.description.clone().unwrap_or_default(),
            tags_text: join_tags(&image.tags),
            is_featured: image.is_featured,
            file: None,
        }
    }

    async fn create(&self, api: &ApiClient, form: &GalleryForm) -> Result<(), ViewError> {
        let image = form.to_upload()?;
        api.upload_gallery_image(&image).await?;
        Ok(())
    }

    async fn update(
        &self,
        api: &ApiClient,
        id: &str,
        original: &GalleryForm,
        form: &GalleryForm,
    ) -> Result<(), ViewError> {
        let input = form.to_update(original)?;
        api.update_gallery_image(id, &input).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_requires_file() {
        let form = GalleryForm {
            title: "Sunset".to_string(),
            ..GalleryForm::default()
        };
        assert_eq!(form.to_upload().unwrap_err(), FormError::MissingFile);

        let form = GalleryForm {
            file: Some(UploadFile::new("sunset.jpg", vec![1, 2, 3])),
            tags_text: "sky, ,orange".to_string(),
            ..form
        };
        let upload = form.to_upload().unwrap();
        assert_eq!(upload.tags, vec!["sky", "orange"]);
        assert_eq!(upload.file.mime_type, "image/jpeg");
    }
}
