//! Public experience listing.
//!
//! Shows a paginated card grid with debounced filters. Deletion is a
//! two-step intent: [`ListController::request_delete`] returns the
//! confirmation prompt and [`ListController::confirm_delete`] performs the
//! call, refetches the page and reports a notice.

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::ExperienceApi;
use crate::controllers::{Nav, Notice, PendingDelete};
use crate::domain::{Experience, Result};
use crate::search::{
    FilterCriteria, FilterPatch, PageFetcher, RequestState, ResultPage, SearchController,
    SearchQuery,
};
use crate::ui::viewmodel::{self, ExperienceRow};
use crate::Config;

/// Fetches listing pages through the backend trait.
pub(crate) struct ListFetcher {
    api: Arc<dyn ExperienceApi>,
}

impl ListFetcher {
    pub(crate) fn new(api: Arc<dyn ExperienceApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl PageFetcher<ResultPage<Experience>> for ListFetcher {
    async fn fetch(&self, query: &SearchQuery) -> Result<ResultPage<Experience>> {
        self.api.list(query).await
    }
}

/// Controller for the public listing screen.
pub struct ListController {
    api: Arc<dyn ExperienceApi>,
    search: SearchController<ResultPage<Experience>, ListFetcher>,
}

impl ListController {
    /// Creates the controller with default criteria.
    #[must_use]
    pub fn new(api: Arc<dyn ExperienceApi>, config: &Config) -> Self {
        Self::with_criteria(api, config, FilterCriteria::default())
    }

    /// Creates the controller with pre-seeded criteria.
    #[must_use]
    pub fn with_criteria(
        api: Arc<dyn ExperienceApi>,
        config: &Config,
        criteria: FilterCriteria,
    ) -> Self {
        let fetcher = Arc::new(ListFetcher::new(Arc::clone(&api)));
        let search = SearchController::new(
            fetcher,
            criteria,
            config.default_page_size,
            config.debounce(),
        );
        Self { api, search }
    }

    /// Initial load of the first page.
    pub fn load(&mut self) {
        self.search.refresh();
    }

    /// Applies a filter edit, debounced.
    pub fn filter(&mut self, patch: &FilterPatch) {
        self.search.set_filter(patch);
    }

    /// Resets every filter, debounced.
    pub fn clear_filters(&mut self) {
        self.search.clear_filters();
    }

    /// Jumps to a page, fetching immediately.
    pub fn change_page(&mut self, page_index: usize) {
        self.search.set_page(page_index);
    }

    /// Changes the page size, keeping the current page index.
    pub fn change_page_size(&mut self, page_size: usize) {
        self.search.set_page_size(page_size);
    }

    /// Current request state.
    #[must_use]
    pub fn state(&self) -> RequestState<ResultPage<Experience>> {
        self.search.snapshot()
    }

    /// Display rows for the fetched page, empty until one succeeds.
    #[must_use]
    pub fn rows(&self) -> Vec<ExperienceRow> {
        self.state()
            .success()
            .map(viewmodel::rows)
            .unwrap_or_default()
    }

    /// Current criteria snapshot.
    #[must_use]
    pub fn criteria(&self) -> FilterCriteria {
        self.search.criteria()
    }

    /// Zero-based index of the page on display.
    #[must_use]
    pub fn page_index(&self) -> usize {
        self.search.page().page_index
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.api.loading().is_loading() || self.search.is_loading()
    }

    /// Awaits outstanding debounce timers and fetches.
    pub async fn settle(&mut self) {
        self.search.settle().await;
    }

    /// Opens an experience's detail page.
    #[must_use]
    pub fn view(&self, id: &str) -> Nav {
        Nav::ToDetail(id.to_string())
    }

    /// Opens the editor for a new experience.
    #[must_use]
    pub fn create(&self) -> Nav {
        Nav::ToCreate
    }

    /// Opens the editor for an existing experience.
    #[must_use]
    pub fn edit(&self, id: &str) -> Nav {
        Nav::ToEdit(id.to_string())
    }

    /// Starts the delete flow. Returns `None` for unsaved drafts.
    #[must_use]
    pub fn request_delete(&self, exp: &Experience) -> Option<PendingDelete> {
        let id = exp.id.as_deref()?;
        Some(PendingDelete::new(id, &exp.title))
    }

    /// Performs a confirmed delete, then refetches the current page.
    pub async fn confirm_delete(&mut self, pending: &PendingDelete) -> Notice {
        match self.api.delete(&pending.id).await {
            Ok(()) => {
                self.search.refresh();
                Notice::success("Experience deleted successfully")
            }
            Err(err) => {
                tracing::error!(id = %pending.id, error = %err, "delete failed");
                Notice::error("Failed to delete experience. Please try again.")
            }
        }
    }
}
