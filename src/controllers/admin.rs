//! Management listing.
//!
//! Like the public listing but with a smaller page, a default newest-first
//! ordering, status filtering, and write operations: status toggling,
//! duplication and deletion. Writes go to the server first and the page is
//! refetched afterwards, so the table always shows server truth.

use std::sync::Arc;

use crate::api::ExperienceApi;
use crate::controllers::list::ListFetcher;
use crate::controllers::{Nav, Notice, PendingDelete};
use crate::domain::{Experience, ExperiencePatch, SortBy};
use crate::search::{
    FilterCriteria, FilterPatch, RequestState, ResultPage, SearchController,
};
use crate::ui::viewmodel::{self, ExperienceRow};
use crate::Config;

/// Rows per page in the management table.
const ADMIN_PAGE_SIZE: usize = 10;

/// Controller for the management screen.
pub struct AdminController {
    api: Arc<dyn ExperienceApi>,
    search: SearchController<ResultPage<Experience>, ListFetcher>,
}

impl AdminController {
    #[must_use]
    pub fn new(api: Arc<dyn ExperienceApi>, config: &Config) -> Self {
        let criteria = FilterCriteria {
            sort_by: Some(SortBy::CreatedDesc),
            ..FilterCriteria::default()
        };
        let fetcher = Arc::new(ListFetcher::new(Arc::clone(&api)));
        let search = SearchController::new(fetcher, criteria, ADMIN_PAGE_SIZE, config.debounce());
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

    /// Display rows for the fetched page.
    #[must_use]
    pub fn rows(&self) -> Vec<ExperienceRow> {
        self.state()
            .success()
            .map(viewmodel::rows)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.api.loading().is_loading() || self.search.is_loading()
    }

    /// Awaits outstanding debounce timers and fetches.
    pub async fn settle(&mut self) {
        self.search.settle().await;
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

    /// Flips an experience between active and inactive, then refetches.
    pub async fn toggle_active(&mut self, exp: &Experience) -> Notice {
        let Some(id) = exp.id.as_deref() else {
            return Notice::error("Experience has not been saved yet");
        };
        let patch = ExperiencePatch {
            is_active: Some(!exp.is_active),
            ..ExperiencePatch::default()
        };
        match self.api.update(id, &patch).await {
            Ok(updated) => {
                self.search.refresh();
                if updated.is_active {
                    Notice::success("Experience activated")
                } else {
                    Notice::success("Experience deactivated")
                }
            }
            Err(err) => {
                tracing::error!(id, error = %err, "status toggle failed");
                Notice::error("Failed to update experience status. Please try again.")
            }
        }
    }

    /// Creates an inactive copy of an experience and opens it for editing.
    pub async fn duplicate(&mut self, exp: &Experience) -> (Nav, Notice) {
        let mut draft = exp.draft();
        draft.title = format!("{} (Copy)", exp.title);
        draft.is_active = false;
        match self.api.create(&draft).await {
            Ok(created) => match created.id {
                Some(id) => (
                    Nav::ToEdit(id),
                    Notice::success("Experience duplicated successfully"),
                ),
                None => {
                    self.search.refresh();
                    (Nav::Stay, Notice::success("Experience duplicated successfully"))
                }
            },
            Err(err) => {
                tracing::error!(error = %err, "duplication failed");
                (
                    Nav::Stay,
                    Notice::error("Failed to duplicate experience. Please try again."),
                )
            }
        }
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
