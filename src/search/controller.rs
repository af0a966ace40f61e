//! Async driver for the search machine.
//!
//! [`SearchController`] owns a [`SearchMachine`] behind a mutex and turns
//! its decisions into tokio tasks: a debounce timer that is aborted and
//! rescheduled on every edit, and fetch tasks that run the query against a
//! [`PageFetcher`] and feed the response back under its token.
//!
//! The mutex is a `std::sync::Mutex` and is never held across an await;
//! every task locks, decides, unlocks, then does its IO.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;

use crate::domain::Result;
use crate::search::criteria::{FilterCriteria, FilterPatch, PageRequest, SearchQuery};
use crate::search::machine::{FetchTicket, FilterSignal, SearchMachine};
use crate::search::state::RequestState;

/// Executes one search query. Implemented over the backend by each view
/// controller; tests substitute fakes.
#[async_trait]
pub trait PageFetcher<P>: Send + Sync {
    async fn fetch(&self, query: &SearchQuery) -> Result<P>;
}

/// Drives a [`SearchMachine`] with debounced, cancellable fetches.
pub struct SearchController<P, F> {
    machine: Arc<Mutex<SearchMachine<P>>>,
    fetcher: Arc<F>,
    debounce: Duration,
    timer: Option<JoinHandle<()>>,
    fetches: Vec<JoinHandle<()>>,
}

impl<P, F> SearchController<P, F>
where
    P: Send + 'static,
    F: PageFetcher<P> + 'static,
{
    /// Creates a controller around initial criteria.
    #[must_use]
    pub fn new(
        fetcher: Arc<F>,
        criteria: FilterCriteria,
        page_size: usize,
        debounce: Duration,
    ) -> Self {
        Self {
            machine: Arc::new(Mutex::new(SearchMachine::new(criteria, page_size))),
            fetcher,
            debounce,
            timer: None,
            fetches: Vec::new(),
        }
    }

    /// Applies a filter edit, restarting the debounce timer when needed.
    pub fn set_filter(&mut self, patch: &FilterPatch) {
        let signal = self.lock().set_filter(patch);
        self.handle_signal(signal);
    }

    /// Clears every filter, debounced like an edit.
    pub fn clear_filters(&mut self) {
        let signal = self.lock().clear_filters();
        self.handle_signal(signal);
    }

    /// Positions the page index without fetching, for route-seeded screens
    /// whose first fetch happens on load.
    pub fn seed_page_index(&mut self, page_index: usize) {
        self.lock().seed_page_index(page_index);
    }

    /// Jumps to a page, fetching immediately.
    pub fn set_page(&mut self, page_index: usize) {
        let ticket = self.lock().set_page(page_index);
        self.spawn_fetch(ticket);
    }

    /// Changes the page size, keeping the current page index.
    pub fn set_page_size(&mut self, page_size: usize) {
        let ticket = self.lock().set_page_size(page_size);
        self.spawn_fetch(ticket);
    }

    /// Fetches the current criteria and page unconditionally.
    pub fn refresh(&mut self) {
        let ticket = self.lock().begin_fetch();
        self.spawn_fetch(ticket);
    }

    /// Current criteria snapshot.
    #[must_use]
    pub fn criteria(&self) -> FilterCriteria {
        self.lock().criteria().clone()
    }

    /// Current pagination snapshot.
    #[must_use]
    pub fn page(&self) -> PageRequest {
        self.lock().page()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.lock().state().is_loading()
    }

    /// Awaits the pending timer and every outstanding fetch.
    ///
    /// Only the console frontend and tests use this; an interactive shell
    /// would instead poll [`SearchController::snapshot`].
    pub async fn settle(&mut self) {
        if let Some(timer) = self.timer.take() {
            let _ = timer.await;
        }
        for fetch in self.fetches.drain(..) {
            let _ = fetch.await;
        }
    }

    fn handle_signal(&mut self, signal: FilterSignal) {
        match signal {
            FilterSignal::Unchanged => {}
            FilterSignal::Debounce => self.reschedule_timer(),
        }
    }

    /// Aborts any pending timer and starts a fresh one. When it fires, the
    /// machine decides whether a fetch is still warranted.
    fn reschedule_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        let machine = Arc::clone(&self.machine);
        let fetcher = Arc::clone(&self.fetcher);
        let debounce = self.debounce;
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            let ticket = lock_machine(&machine).debounced_fetch();
            if let Some(ticket) = ticket {
                run_fetch(machine, fetcher, ticket).await;
            }
        }));
    }

    fn spawn_fetch(&mut self, ticket: FetchTicket) {
        let machine = Arc::clone(&self.machine);
        let fetcher = Arc::clone(&self.fetcher);
        self.fetches.retain(|handle| !handle.is_finished());
        self.fetches
            .push(tokio::spawn(run_fetch(machine, fetcher, ticket)));
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SearchMachine<P>> {
        lock_machine(&self.machine)
    }
}

impl<P, F> SearchController<P, F>
where
    P: Clone + Send + 'static,
    F: PageFetcher<P> + 'static,
{
    /// Snapshot of the request state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> RequestState<P> {
        self.lock().state().clone()
    }
}

impl<P, F> Drop for SearchController<P, F> {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        for fetch in self.fetches.drain(..) {
            fetch.abort();
        }
    }
}

async fn run_fetch<P, F>(
    machine: Arc<Mutex<SearchMachine<P>>>,
    fetcher: Arc<F>,
    ticket: FetchTicket,
) where
    P: Send + 'static,
    F: PageFetcher<P> + 'static,
{
    let result = fetcher.fetch(&ticket.query).await;
    lock_machine(&machine).apply_response(ticket.token, result);
}

/// Recovers from a poisoned lock. The machine updates each field with a
/// single assignment, so state left by a panicking holder is still usable.
fn lock_machine<P>(machine: &Mutex<SearchMachine<P>>) -> std::sync::MutexGuard<'_, SearchMachine<P>> {
    machine.lock().unwrap_or_else(|e| e.into_inner())
}
