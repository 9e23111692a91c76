//! Admin panels
//!
//! Pages, posts, gallery images and contact messages share one generic
//! `CrudPanel`: a paged table, a single form state object mirroring one
//! record, a create/edit mode and a two-step delete. Analytics, settings and
//! the dashboard have their own panels.
//!
//! Failures never touch the form: the server's detail lands in `alert` and
//! the user can fix the input and submit again.

mod analytics;
mod blog;
mod dashboard;
mod gallery;
mod messages;
mod pages;
mod settings;

pub use analytics::AnalyticsPanel;
pub use blog::{PostForm, Posts};
pub use dashboard::{Dashboard, DashboardCounts};
pub use gallery::{GalleryForm, GalleryImages};
pub use messages::Messages;
pub use pages::{PageForm, Pages};
pub use settings::SettingsPanel;

use async_trait::async_trait;

use super::form::FormMode;
use super::ViewError;
use crate::api::{ApiClient, ApiError};
use crate::context::AppContext;
use crate::models::{ListQuery, PagedList};
use crate::paging::{ListSource, PagedResource, RefreshOutcome};

/// A record type an admin table can list and delete
#[async_trait]
pub trait Resource: Send + Sync {
    type Item: Clone + Send + Sync;
    type Source: ListSource<Page = PagedList<Self::Item>>;
    /// Form state; `()` for read-only tables
    type Form: Default + Clone + Send + Sync;

    /// Singular, capitalized, used in notices and alerts
    const NAME: &'static str;

    fn source(&self, api: ApiClient) -> Self::Source;

    fn id<'a>(&self, item: &'a Self::Item) -> &'a str;

    async fn delete(&self, api: &ApiClient, id: &str) -> Result<(), ApiError>;
}

/// A resource with a create/edit form
#[async_trait]
pub trait Editable: Resource {
    /// Fill the form from an existing record
    fn form_from(&self, item: &Self::Item) -> Self::Form;

    /// Submit the whole form as a new record
    async fn create(&self, api: &ApiClient, form: &Self::Form) -> Result<(), ViewError>;

    /// Submit the fields that differ from `original`, the record as loaded
    async fn update(
        &self,
        api: &ApiClient,
        id: &str,
        original: &Self::Form,
        form: &Self::Form,
    ) -> Result<(), ViewError>;
}

/// Paged table plus form for one resource
pub struct CrudPanel<R: Resource> {
    resource: R,
    api: ApiClient,
    list: PagedResource<R::Source>,
    mode: FormMode,
    form: R::Form,
    original: R::Form,
    pending_delete: Option<String>,
    alert: Option<String>,
    notice: Option<String>,
}

impl<R: Resource> CrudPanel<R> {
    pub fn new(ctx: &AppContext, resource: R) -> Self {
        let query = ListQuery::new(ctx.config.listing.admin_per_page);
        let list = PagedResource::new(resource.source(ctx.api.clone()), query);
        Self {
            resource,
            api: ctx.api.clone(),
            list,
            mode: FormMode::Create,
            form: R::Form::default(),
            original: R::Form::default(),
            pending_delete: None,
            alert: None,
            notice: None,
        }
    }

    /// Panel with its first page loaded
    pub async fn open(ctx: &AppContext, resource: R) -> Self {
        let panel = Self::new(ctx, resource);
        panel.load().await;
        panel
    }

    pub async fn load(&self) -> RefreshOutcome {
        self.list.refresh().await
    }

    pub fn list(&self) -> &PagedResource<R::Source> {
        &self.list
    }

    pub fn items(&self) -> Vec<R::Item> {
        self.list.items()
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn form(&self) -> &R::Form {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut R::Form {
        &mut self.form
    }

    /// Blocking error from the last mutation
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Confirmation of the last successful mutation
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    /// First step of a delete: remember which record to remove
    pub fn request_delete(&mut self, id: impl Into<String>) {
        self.pending_delete = Some(id.into());
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Second step of a delete. Returns false when nothing was pending or
    /// the request failed.
    pub async fn confirm_delete(&mut self) -> bool {
        let Some(id) = self.pending_delete.take() else {
            return false;
        };

        match self.resource.delete(&self.api, &id).await {
            Ok(()) => {
                tracing::info!("{} {} deleted", R::NAME, id);
                self.alert = None;
                self.notice = Some(format!("{} deleted", R::NAME));
                if self.mode.editing_id() == Some(id.as_str()) {
                    self.reset_form();
                }
                self.list.refresh().await;
                true
            }
            Err(e) => {
                tracing::warn!("Failed to delete {} {}: {}", R::NAME, id, e);
                self.alert = Some(format!("Error deleting {}: {}", R::NAME.to_lowercase(), e.message()));
                false
            }
        }
    }

    pub async fn search(&self, text: &str) -> RefreshOutcome {
        self.list.set_search(text).await
    }

    pub async fn next_page(&self) -> Option<RefreshOutcome> {
        self.list.next_page().await
    }

    pub async fn prev_page(&self) -> Option<RefreshOutcome> {
        self.list.prev_page().await
    }

    fn reset_form(&mut self) {
        self.mode = FormMode::Create;
        self.form = R::Form::default();
        self.original = R::Form::default();
    }
}

impl<R: Editable> CrudPanel<R> {
    /// Empty form in create mode
    pub fn start_create(&mut self) {
        self.reset_form();
        self.alert = None;
    }

    pub fn start_edit(&mut self, item: &R::Item) {
        self.mode = FormMode::Edit(self.resource.id(item).to_string());
        self.form = self.resource.form_from(item);
        self.original = self.form.clone();
        self.alert = None;
    }

    /// Edit a record of the current page by id; false when it is not listed
    pub fn edit_by_id(&mut self, id: &str) -> bool {
        let item = self
            .list
            .items()
            .into_iter()
            .find(|item| self.resource.id(item) == id);
        match item {
            Some(item) => {
                self.start_edit(&item);
                true
            }
            None => false,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.reset_form();
    }

    /// Create or update depending on the mode.
    ///
    /// On success the form is reset and the list refetched. On failure the
    /// form and mode are left exactly as they were.
    pub async fn submit(&mut self) -> bool {
        let (result, verb) = match &self.mode {
            FormMode::Create => (self.resource.create(&self.api, &self.form).await, "created"),
            FormMode::Edit(id) => (
                self.resource.update(&self.api, id, &self.original, &self.form).await,
                "updated",
            ),
        };

        match result {
            Ok(()) => {
                self.alert = None;
                self.notice = Some(format!("{} {} successfully!", R::NAME, verb));
                self.reset_form();
                self.list.refresh().await;
                true
            }
            Err(e) => {
                tracing::warn!("Failed to save {}: {}", R::NAME, e);
                self.notice = None;
                self.alert = Some(format!("Error saving {}: {}", R::NAME.to_lowercase(), e.message()));
                false
            }
        }
    }
}
