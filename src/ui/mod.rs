//! Presentation helpers: formatting and view models.
//!
//! Controllers expose domain state; this module turns it into display-ready
//! strings and row structs so frontends stay free of formatting logic.

pub mod format;
pub mod viewmodel;

pub use format::{format_duration, format_price, format_search_summary, star_rating};
pub use viewmodel::{rows, EmptyState, ExperienceRow, StatusBadge};
