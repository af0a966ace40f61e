//! The pure search state machine.
//!
//! [`SearchMachine`] holds filter criteria, pagination and request state and
//! decides, synchronously and without IO, how each input changes them. The
//! async side lives in [`crate::search::controller`], which asks the machine
//! what to do and carries out the resulting fetches.
//!
//! Two rules shape the design:
//!
//! - Filter edits are debounced and only fetch when the normalized criteria
//!   actually changed since the last fetch.
//! - Every fetch is issued under a monotonically increasing token; a
//!   response is applied only if its token is still the newest, so a slow
//!   old response can never overwrite a newer one.

use crate::domain::Result;
use crate::search::criteria::{FilterCriteria, FilterPatch, PageRequest, SearchQuery};
use crate::search::state::RequestState;

/// A claim on one fetch: the query to run and the token that must still be
/// newest when the response comes back.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    pub token: u64,
    pub query: SearchQuery,
}

/// What a filter edit requires of the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterSignal {
    /// The edit changed nothing and no fetch is pending; do nothing.
    Unchanged,
    /// Restart the debounce timer; fetch when it fires.
    Debounce,
}

/// Search state: criteria, page, newest token and request lifecycle.
#[derive(Debug)]
pub struct SearchMachine<P> {
    criteria: FilterCriteria,
    page: PageRequest,
    /// Criteria of the most recently issued fetch. `None` until the first
    /// fetch; used for distinct-until-changed suppression.
    last_fetched: Option<FilterCriteria>,
    latest_token: u64,
    state: RequestState<P>,
}

impl<P> SearchMachine<P> {
    /// Creates a machine with the given initial criteria and page size.
    #[must_use]
    pub fn new(criteria: FilterCriteria, page_size: usize) -> Self {
        Self {
            criteria: criteria.normalized(),
            page: PageRequest::new(0, page_size),
            last_fetched: None,
            latest_token: 0,
            state: RequestState::Idle,
        }
    }

    #[must_use]
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    #[must_use]
    pub fn page(&self) -> PageRequest {
        self.page
    }

    #[must_use]
    pub fn state(&self) -> &RequestState<P> {
        &self.state
    }

    /// Applies a filter edit.
    ///
    /// A changed filter resets pagination to the first page. An edit that
    /// leaves the criteria equal to what was already fetched is suppressed;
    /// an equal edit arriving while a debounce may still be pending keeps
    /// the timer running so the pending fetch is not lost.
    pub fn set_filter(&mut self, patch: &FilterPatch) -> FilterSignal {
        let merged = self.criteria.merged(patch);
        if merged == self.criteria {
            if self.last_fetched.as_ref() == Some(&self.criteria) {
                return FilterSignal::Unchanged;
            }
            return FilterSignal::Debounce;
        }
        self.criteria = merged;
        self.page.page_index = 0;
        FilterSignal::Debounce
    }

    /// Resets every filter to its default. Debounced like any other edit.
    pub fn clear_filters(&mut self) -> FilterSignal {
        let defaults = FilterCriteria::default();
        if defaults == self.criteria {
            if self.last_fetched.as_ref() == Some(&self.criteria) {
                return FilterSignal::Unchanged;
            }
            return FilterSignal::Debounce;
        }
        self.criteria = defaults;
        self.page.page_index = 0;
        FilterSignal::Debounce
    }

    /// Positions the page index without fetching. Used to seed a controller
    /// from route state before its first load.
    pub fn seed_page_index(&mut self, page_index: usize) {
        self.page.page_index = page_index;
    }

    /// Jumps to a page. Page changes bypass the debounce and fetch at once.
    pub fn set_page(&mut self, page_index: usize) -> FetchTicket {
        self.page.page_index = page_index;
        self.begin_fetch()
    }

    /// Changes how many items each page holds. The page index is kept, so
    /// the paginator does not jump back to the start on a size-only change.
    pub fn set_page_size(&mut self, page_size: usize) -> FetchTicket {
        self.page = PageRequest::new(self.page.page_index, page_size);
        self.begin_fetch()
    }

    /// Issues a fetch for the current criteria and page unconditionally.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest_token += 1;
        self.last_fetched = Some(self.criteria.clone());
        self.state = RequestState::Loading;
        tracing::debug!(token = self.latest_token, page = self.page.page_index, "issuing fetch");
        FetchTicket {
            token: self.latest_token,
            query: SearchQuery {
                criteria: self.criteria.clone(),
                page: self.page,
            },
        }
    }

    /// Called when the debounce timer fires. Returns `None` when the
    /// criteria no longer differ from the last fetch, which happens when a
    /// page change fetched them in the meantime.
    pub fn debounced_fetch(&mut self) -> Option<FetchTicket> {
        if self.last_fetched.as_ref() == Some(&self.criteria) {
            return None;
        }
        Some(self.begin_fetch())
    }

    /// Applies a fetch response. Returns whether it was accepted; a
    /// response whose token is no longer the newest is discarded and the
    /// state is left for the newer fetch to resolve.
    pub fn apply_response(&mut self, token: u64, result: Result<P>) -> bool {
        if token != self.latest_token {
            tracing::debug!(token, latest = self.latest_token, "discarding stale response");
            return false;
        }
        self.state = match result {
            Ok(payload) => RequestState::Success(payload),
            Err(err) => RequestState::Failed(err.info()),
        };
        true
    }
}
