//! Search results screen.
//!
//! Seeded from the booking search (location, dates, party size) carried in
//! route query parameters, then refined with debounced in-page filters.
//! The search endpoint also returns facets used to build the refinement
//! controls.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::api::{ExperienceApi, Facets, PriceRange, SearchOutcome};
use crate::controllers::Nav;
use crate::domain::{Result, SortBy};
use crate::search::{
    FilterCriteria, FilterPatch, PageFetcher, Patch, RequestState, SearchController, SearchQuery,
};
use crate::ui::format::format_search_summary;
use crate::ui::viewmodel::{self, ExperienceRow};
use crate::Config;

/// Price slider bounds shown before the first response arrives.
const DEFAULT_PRICE_RANGE: PriceRange = PriceRange {
    min: 0.0,
    max: 1000.0,
};

/// Booking context the results screen is opened with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchSeed {
    pub location_id: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub participants: Option<u32>,
    /// One-based page from the route, defaulting to the first.
    pub page: usize,
}

impl SearchSeed {
    /// Parses route query parameters, ignoring anything malformed.
    #[must_use]
    pub fn from_query_params(params: &BTreeMap<String, String>) -> Self {
        let text = |key: &str| {
            params
                .get(key)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        SearchSeed {
            location_id: text("locationId"),
            start_date: params.get("startDate").and_then(|s| s.parse().ok()),
            end_date: params.get("endDate").and_then(|s| s.parse().ok()),
            participants: params.get("participants").and_then(|s| s.parse().ok()),
            page: params
                .get("page")
                .and_then(|s| s.parse().ok())
                .filter(|&p: &usize| p >= 1)
                .unwrap_or(1),
        }
    }

    fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            location_id: self.location_id.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            participants: self.participants,
            sort_by: Some(SortBy::Rating),
            ..FilterCriteria::default()
        }
    }
}

/// How the result cards are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    #[default]
    Grid,
    List,
}

struct ResultsFetcher {
    api: Arc<dyn ExperienceApi>,
}

#[async_trait]
impl PageFetcher<SearchOutcome> for ResultsFetcher {
    async fn fetch(&self, query: &SearchQuery) -> Result<SearchOutcome> {
        self.api.search(query).await
    }
}

/// Controller for the search results screen.
pub struct ResultsController {
    api: Arc<dyn ExperienceApi>,
    seed: SearchSeed,
    search: SearchController<SearchOutcome, ResultsFetcher>,
    layout: Layout,
}

impl ResultsController {
    #[must_use]
    pub fn new(api: Arc<dyn ExperienceApi>, config: &Config, seed: SearchSeed) -> Self {
        let fetcher = Arc::new(ResultsFetcher {
            api: Arc::clone(&api),
        });
        let mut search = SearchController::new(
            fetcher,
            seed.criteria(),
            config.default_page_size,
            config.debounce(),
        );
        if seed.page > 1 {
            // load() issues the first fetch; set_page would fetch twice.
            search.seed_page_index(seed.page - 1);
        }
        Self {
            api,
            seed,
            search,
            layout: Layout::default(),
        }
    }

    /// Initial fetch for the seeded criteria and page.
    pub fn load(&mut self) {
        self.search.refresh();
    }

    /// Applies a refinement filter, debounced.
    pub fn filter(&mut self, patch: &FilterPatch) {
        self.search.set_filter(patch);
    }

    /// Resets the in-page refinements while keeping the booking seed. The
    /// sort order returns to its rating default rather than clearing.
    pub fn clear_filters(&mut self) {
        self.search.set_filter(&FilterPatch {
            search: Patch::Clear,
            category: Patch::Clear,
            difficulty: Patch::Clear,
            min_price: Patch::Clear,
            max_price: Patch::Clear,
            sort_by: Patch::Set(SortBy::Rating),
            ..FilterPatch::default()
        });
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
    pub fn state(&self) -> RequestState<SearchOutcome> {
        self.search.snapshot()
    }

    /// Display rows for the fetched page.
    #[must_use]
    pub fn rows(&self) -> Vec<ExperienceRow> {
        self.state()
            .success()
            .map(|outcome| viewmodel::rows(&outcome.page))
            .unwrap_or_default()
    }

    /// Facets from the newest response, if it carried any.
    #[must_use]
    pub fn facets(&self) -> Option<Facets> {
        self.state().success().and_then(|o| o.facets.clone())
    }

    /// Price slider bounds, falling back to a sensible default.
    #[must_use]
    pub fn price_range(&self) -> PriceRange {
        self.facets()
            .and_then(|f| f.price_range)
            .unwrap_or(DEFAULT_PRICE_RANGE)
    }

    /// One-line description of the seeded search.
    #[must_use]
    pub fn summary(&self) -> String {
        format_search_summary(&self.seed)
    }

    #[must_use]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
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

    /// Starts a booking, carrying the seeded context along.
    #[must_use]
    pub fn book(&self, id: &str) -> Nav {
        Nav::ToBooking {
            id: id.to_string(),
            start_date: self.seed.start_date,
            end_date: self.seed.end_date,
            participants: self.seed.participants,
        }
    }
}
