//! View models
//!
//! Each view owns the state a page of the site would hold: what it loaded,
//! its form fields, its error message. Views never panic on server data;
//! every failure degrades to a message, a fallback or an empty list.
//!
//! Visitor views:
//! - Home, PageView, BlogPostView
//! - Blog and Gallery lists
//! - Contact, Login and FirstSetup forms
//!
//! Admin panels live in `admin`.

pub mod admin;
pub mod blog;
pub mod contact;
pub mod form;
pub mod gallery;
pub mod home;
pub mod login;
pub mod page;
pub mod setup;

pub use blog::{BlogPostView, BlogView};
pub use contact::{ContactForm, ContactStatus};
pub use form::{join_tags, split_tags, FormError, FormMode};
pub use gallery::GalleryView;
pub use home::HomeView;
pub use login::LoginForm;
pub use page::PageView;
pub use setup::SetupForm;

use thiserror::Error;

use crate::api::ApiError;
use crate::session::SessionError;

/// Errors surfaced by view actions
#[derive(Debug, Error)]
pub enum ViewError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ViewError {
    /// Text for an alert or inline error
    pub fn message(&self) -> String {
        match self {
            ViewError::Api(e) => e.message(),
            other => other.to_string(),
        }
    }
}

/// Result of loading a single record
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Loaded(T),
    NotFound,
    Failed(String),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Loading
    }
}

impl<T> LoadState<T> {
    /// 404 becomes `NotFound`; any other error becomes `Failed`
    pub fn from_result(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => LoadState::Loaded(value),
            Err(e) if e.is_not_found() => LoadState::NotFound,
            Err(e) => {
                tracing::warn!("Load failed: {}", e);
                LoadState::Failed(e.message())
            }
        }
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}
