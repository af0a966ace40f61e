//! Debounced search, filtering and pagination.
//!
//! The split follows a sans-io shape: [`machine`] is the pure state machine
//! deciding what each input means, [`controller`] drives it with tokio
//! timers and fetch tasks, and [`criteria`] and [`state`] hold the value
//! types both sides exchange.
//!
//! # Behavior
//!
//! - Filter edits debounce for the configured interval and are suppressed
//!   when the normalized criteria are unchanged since the last fetch.
//! - Page changes fetch immediately without touching the filter debounce.
//! - Responses carry a token; only the newest fetch may update the state,
//!   so overlapping requests resolve to the newest regardless of order.

pub mod controller;
pub mod criteria;
pub mod machine;
pub mod state;

pub use controller::{PageFetcher, SearchController};
pub use criteria::{
    FilterCriteria, FilterPatch, PageRequest, Patch, SearchQuery, DEFAULT_PAGE_SIZE,
};
pub use machine::{FetchTicket, FilterSignal, SearchMachine};
pub use state::{RequestState, ResultPage};
