//! Paged list resources
//!
//! `PagedResource` owns the query of one list view (search text, tags,
//! flags, page number), fetches through a `ListSource` and keeps the last
//! page it applied. Every fetch takes a ticket from a sequence counter; a
//! response is applied only if its ticket is still the newest one issued,
//! so a slow earlier request can never overwrite a later one.

mod sources;

pub use sources::{AnalyticsSource, GallerySource, MessageSource, PageSource, PostSource};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::api::ApiError;
use crate::models::{ListQuery, Paged, Pagination};

/// Anything that can fetch one page of a list for a query
#[async_trait]
pub trait ListSource: Send + Sync {
    type Page: Paged + Clone + Send + Sync;

    async fn fetch(&self, query: &ListQuery) -> Result<Self::Page, ApiError>;
}

/// What happened to the response of a `refresh`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The response replaced the displayed page
    Applied,
    /// A newer request was issued first; the response was dropped
    Superseded,
    /// The request failed; the error is now displayed
    Failed(String),
}

/// Previous/next state derived from server pagination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageControls {
    pub current_page: u32,
    pub total_pages: u32,
    pub has_prev: bool,
    pub has_next: bool,
}

impl PageControls {
    pub fn new(current_page: u32, total_pages: u32) -> Self {
        Self {
            current_page,
            total_pages,
            has_prev: current_page > 1,
            has_next: current_page < total_pages,
        }
    }

    pub fn from_pagination(pagination: Pagination) -> Self {
        Self::new(pagination.current_page, pagination.total_pages)
    }

    /// `Page 2 of 5`
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.current_page, self.total_pages.max(1))
    }
}

struct ResourceState<P> {
    page: Option<P>,
    error: Option<String>,
    loading: bool,
}

/// One list view's query, request sequence and last applied result
pub struct PagedResource<S: ListSource> {
    source: S,
    query: Mutex<ListQuery>,
    seq: AtomicU64,
    state: Mutex<ResourceState<S::Page>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

impl<S: ListSource> PagedResource<S> {
    pub fn new(source: S, query: ListQuery) -> Self {
        Self {
            source,
            query: Mutex::new(query),
            seq: AtomicU64::new(0),
            state: Mutex::new(ResourceState {
                page: None,
                error: None,
                loading: false,
            }),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn query(&self) -> ListQuery {
        lock(&self.query).clone()
    }

    /// Last applied page, if any
    pub fn current(&self) -> Option<S::Page> {
        lock(&self.state).page.clone()
    }

    /// Items of the last applied page
    pub fn items(&self) -> Vec<<S::Page as Paged>::Item>
    where
        <S::Page as Paged>::Item: Clone,
    {
        lock(&self.state)
            .page
            .as_ref()
            .map(|page| page.items().to_vec())
            .unwrap_or_default()
    }

    pub fn error(&self) -> Option<String> {
        lock(&self.state).error.clone()
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.state).loading
    }

    pub fn controls(&self) -> PageControls {
        match lock(&self.state).page.as_ref() {
            Some(page) => PageControls::from_pagination(page.pagination()),
            None => PageControls::new(lock(&self.query).page, 0),
        }
    }

    /// Fetch with the current query and apply the response if it is still
    /// the newest request
    pub async fn refresh(&self) -> RefreshOutcome {
        let ticket = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let query = self.query();
        lock(&self.state).loading = true;

        let result = self.source.fetch(&query).await;

        let mut state = lock(&self.state);
        if self.seq.load(Ordering::SeqCst) != ticket {
            tracing::warn!(ticket, page = query.page, "Discarding superseded list response");
            return RefreshOutcome::Superseded;
        }

        state.loading = false;
        match result {
            Ok(page) => {
                state.page = Some(page);
                state.error = None;
                RefreshOutcome::Applied
            }
            Err(e) => {
                tracing::warn!(page = query.page, "List fetch failed: {}", e);
                let message = e.message();
                state.error = Some(message.clone());
                RefreshOutcome::Failed(message)
            }
        }
    }

    /// Change the filters, go back to page 1 and refresh
    pub async fn update_filters(&self, f: impl FnOnce(&mut ListQuery)) -> RefreshOutcome {
        {
            let mut query = lock(&self.query);
            f(&mut query);
            query.page = 1;
        }
        self.refresh().await
    }

    pub async fn set_search(&self, search: &str) -> RefreshOutcome {
        self.update_filters(|q| q.set_search(search)).await
    }

    pub async fn set_tags(&self, tags: Vec<String>) -> RefreshOutcome {
        self.update_filters(|q| q.tags = tags).await
    }

    /// Add the tag to the filter, or remove it if already selected
    pub async fn toggle_tag(&self, tag: &str) -> RefreshOutcome {
        self.update_filters(|q| {
            if let Some(pos) = q.tags.iter().position(|t| t == tag) {
                q.tags.remove(pos);
            } else {
                q.tags.push(tag.to_string());
            }
        })
        .await
    }

    pub async fn set_published(&self, published: Option<bool>) -> RefreshOutcome {
        self.update_filters(|q| q.published = published).await
    }

    pub async fn set_featured(&self, featured: Option<bool>) -> RefreshOutcome {
        self.update_filters(|q| q.featured = featured).await
    }

    pub async fn set_country(&self, country: &str) -> RefreshOutcome {
        self.update_filters(|q| q.set_country(country)).await
    }

    /// Jump to a page; `None` when the page is out of range
    pub async fn set_page(&self, page: u32) -> Option<RefreshOutcome> {
        let controls = self.controls();
        if page < 1 || page > controls.total_pages.max(1) {
            return None;
        }
        lock(&self.query).page = page;
        Some(self.refresh().await)
    }

    /// `None` when already on the last page
    pub async fn next_page(&self) -> Option<RefreshOutcome> {
        let controls = self.controls();
        if !controls.has_next {
            return None;
        }
        self.set_page(controls.current_page + 1).await
    }

    /// `None` when already on the first page
    pub async fn prev_page(&self) -> Option<RefreshOutcome> {
        let controls = self.controls();
        if !controls.has_prev {
            return None;
        }
        self.set_page(controls.current_page - 1).await
    }
}
