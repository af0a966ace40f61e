//! Request lifecycle state and result pages.

use crate::domain::ErrorInfo;

/// One page of fetched items with pagination totals.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPage<T> {
    pub items: Vec<T>,
    pub total_count: usize,
    pub total_pages: usize,
}

impl<T> ResultPage<T> {
    /// Builds a page, deriving `total_pages` from the page size.
    #[must_use]
    pub fn new(items: Vec<T>, total_count: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            items,
            total_count,
            total_pages: total_count.div_ceil(page_size),
        }
    }

    /// A page with no results.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            total_pages: 0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for ResultPage<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Lifecycle of an asynchronous fetch.
///
/// A new fetch moves the state to `Loading` regardless of what was shown
/// before; only the response belonging to the newest fetch may move it on
/// to `Success` or `Failed`.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState<P> {
    /// Nothing requested yet.
    Idle,
    /// A fetch is outstanding.
    Loading,
    /// The newest fetch succeeded.
    Success(P),
    /// The newest fetch failed.
    Failed(ErrorInfo),
}

impl<P> RequestState<P> {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    /// The payload, when the newest fetch succeeded.
    #[must_use]
    pub fn success(&self) -> Option<&P> {
        match self {
            RequestState::Success(payload) => Some(payload),
            _ => None,
        }
    }

    /// The error, when the newest fetch failed.
    #[must_use]
    pub fn error(&self) -> Option<&ErrorInfo> {
        match self {
            RequestState::Failed(info) => Some(info),
            _ => None,
        }
    }
}

impl<P> Default for RequestState<P> {
    fn default() -> Self {
        RequestState::Idle
    }
}
