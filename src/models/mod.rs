//! Data models
//!
//! This module contains the records exchanged with the site API.
//! Models represent:
//! - Content entities (Page, Post, GalleryImage, ContactMessage)
//! - Site settings and analytics reports
//! - Request bodies and list envelopes

mod analytics;
mod contact;
mod gallery;
mod page;
mod pagination;
mod post;
mod settings;
pub mod timestamp;
mod upload;
mod user;

pub use analytics::{AnalyticsReport, CountBucket, Visit};
pub use contact::{ContactInput, ContactMessage};
pub use gallery::{GalleryImage, NewGalleryImage, UpdateGalleryInput};
pub use page::{CreatePageInput, Page, UpdatePageInput};
pub use pagination::{default_limit, default_page, ListQuery, Paged, PagedList, Pagination};
pub use post::{CreatePostInput, Post, UpdatePostInput};
pub use settings::{BackgroundType, PublicSettings, Settings};
pub use upload::{mime_for_file_name, UploadFile, UploadedFile};
pub use user::{ChangeCredentialsInput, ChangePasswordInput, LoginInput, LoginResponse, Me};
