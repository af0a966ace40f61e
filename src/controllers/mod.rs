//! View controllers for each screen of the experience client.
//!
//! A controller owns the state one screen needs, exposes intent methods the
//! frontend calls, and reports navigation and notices back as values so the
//! frontend decides how to route and render them.
//!
//! # Organization
//!
//! - [`list`]: public listing with filters and pagination
//! - [`results`]: search results seeded from a booking query
//! - [`admin`]: management listing with status toggling and duplication
//! - [`detail`]: single-experience view with image gallery
//! - [`form`]: create and edit editor

pub mod admin;
pub mod detail;
pub mod form;
pub mod list;
pub mod results;

pub use admin::AdminController;
pub use detail::DetailController;
pub use form::{FormController, FormMode};
pub use list::ListController;
pub use results::{ResultsController, SearchSeed};

/// Where the frontend should navigate after an intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nav {
    /// Stay on the current screen.
    Stay,
    /// Go to the public listing.
    ToList,
    /// Open an experience's detail page.
    ToDetail(String),
    /// Open the editor for an existing experience.
    ToEdit(String),
    /// Open the editor for a new experience.
    ToCreate,
    /// Start a booking for an experience with the given search context.
    ToBooking {
        id: String,
        start_date: Option<chrono::NaiveDate>,
        end_date: Option<chrono::NaiveDate>,
        participants: Option<u32>,
    },
}

/// Severity of a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Transient message shown to the user after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// A delete awaiting user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: String,
    /// Confirmation prompt naming the experience.
    pub prompt: String,
}

impl PendingDelete {
    #[must_use]
    pub fn new(id: impl Into<String>, title: &str) -> Self {
        PendingDelete {
            id: id.into(),
            prompt: format!("Are you sure you want to delete \"{title}\"?"),
        }
    }
}
