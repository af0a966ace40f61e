//! Excursio: an async client for a travel experience booking API.
//!
//! Excursio is the client-side core of an experience catalog. It provides:
//! - Debounced, distinct-until-changed filtering with pagination
//! - Stale-response protection for overlapping fetches
//! - Typed access to the experience REST API behind a trait seam
//! - View controllers for listing, search results, admin, detail and editing
//! - A validated, schema-driven experience editor form

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Console Shim (main.rs)                             │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Controller Layer (controllers/)                    │  ← Screen logic
//! │  - Listing, results, admin, detail, editor          │
//! │  - Navigation and notices as values                 │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Search Layer  │   │ Form Layer    │   │ UI Layer      │
//! │ (search/)     │   │ (form/)       │   │ (ui/)         │
//! │ - Debounce    │   │ - Schema      │   │ - Formatting  │
//! │ - Tokens      │   │ - Validation  │   │ - View models │
//! │ - Pagination  │   │ - Drafting    │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │
//! ┌─────────────────────────────────────────────────────┐
//! │  API Layer (api/)                                   │
//! │  - Backend trait and HTTP implementation            │
//! │  - Response envelope, error normalization           │
//! │  - Loading counter                                  │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Config discovery (infrastructure/)               │
//! │  - Error types (domain/error)                       │
//! │  - Experience model (domain/experience)             │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`domain`]: Core domain types (Experience, errors)
//! - [`api`]: HTTP backend behind the [`api::ExperienceApi`] trait
//! - [`search`]: Debounced search state machine and its async driver
//! - [`controllers`]: Per-screen view controllers
//! - [`form`]: Experience editor schema, validation and state
//! - [`ui`]: Formatting helpers and view models
//! - [`infrastructure`]: Config file discovery
//! - [`observability`]: Tracing setup
//!
//! # Configuration
//!
//! Configuration is read from a TOML file discovered under
//! `~/.config/excursio/config.toml` (overridable via `EXCURSIO_CONFIG`),
//! with individual values overridable through the environment:
//!
//! ```toml
//! base_url = "http://localhost:3000/api"
//! default_page_size = 12
//! debounce_ms = 500
//! request_timeout_secs = 30
//! trace_level = "info"
//! ```
//!
//! # Key Design Decisions
//!
//! ## Sans-IO Search Machine
//!
//! Filtering, debouncing and pagination decisions live in a pure state
//! machine ([`search::SearchMachine`]); an async controller drives it with
//! tokio timers and tasks. The split keeps the tricky logic synchronous and
//! directly testable.
//!
//! ## Request Tokens
//!
//! Every fetch carries a monotonically increasing token and a response is
//! applied only when its token is still the newest, so a slow old response
//! can never overwrite a newer one.
//!
//! ## Navigation as Values
//!
//! Controllers return [`controllers::Nav`] and [`controllers::Notice`]
//! values instead of performing side effects, leaving routing and display
//! to whichever frontend embeds them.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use excursio::api::HttpBackend;
//! use excursio::controllers::ListController;
//! use excursio::Config;
//!
//! # async fn run() -> excursio::domain::Result<()> {
//! let config = Config::default();
//! let api = Arc::new(HttpBackend::new(&config)?);
//!
//! let mut list = ListController::new(api, &config);
//! list.load();
//! list.settle().await;
//!
//! for row in list.rows() {
//!     println!("{} · {} · {}", row.title, row.location, row.price);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod controllers;
pub mod domain;
pub mod form;
pub mod infrastructure;
pub mod observability;
pub mod search;
pub mod ui;

pub use api::{ExperienceApi, HttpBackend};
pub use controllers::{Nav, Notice, NoticeLevel, PendingDelete};
pub use domain::{Error, ErrorInfo, Experience, Result};
pub use search::{FilterCriteria, FilterPatch, Patch, DEFAULT_PAGE_SIZE};

use std::time::Duration;

use serde::Deserialize;

/// Client configuration.
///
/// Loaded from a TOML file via [`Config::load`]; every field has a default
/// so a missing file or a partial file both work.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the experience API.
    ///
    /// Joined with relative endpoint paths; a missing trailing slash is
    /// tolerated. Default: `http://localhost:3000/api`
    pub base_url: String,

    /// Items per page in the public listing. Default: 12
    pub default_page_size: usize,

    /// Quiet period after a filter edit before fetching, in milliseconds.
    /// Default: 500
    pub debounce_ms: u64,

    /// Per-request timeout in seconds. Default: 30
    pub request_timeout_secs: u64,

    /// Tracing level when `RUST_LOG` is unset.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_string(),
            default_page_size: DEFAULT_PAGE_SIZE,
            debounce_ms: 500,
            request_timeout_secs: 30,
            trace_level: None,
        }
    }
}

impl Config {
    /// The debounce interval as a [`Duration`].
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(format!("invalid config file: {e}")))
    }

    /// Reads and parses a configuration file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;
        Self::from_toml(&text)
    }

    /// Loads configuration from the discovered file, then applies
    /// environment overrides.
    ///
    /// A missing file yields the defaults; an unreadable or invalid file is
    /// an error. Environment values that fail to parse are ignored.
    ///
    /// # Environment Overrides
    ///
    /// - `EXCURSIO_BASE_URL`
    /// - `EXCURSIO_PAGE_SIZE`
    /// - `EXCURSIO_DEBOUNCE_MS`
    /// - `EXCURSIO_TIMEOUT_SECS`
    /// - `EXCURSIO_TRACE_LEVEL`
    pub fn load() -> Result<Self> {
        let mut config = match infrastructure::config_file() {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(v) = std::env::var("EXCURSIO_BASE_URL") {
            if !v.trim().is_empty() {
                self.base_url = v;
            }
        }
        if let Ok(v) = std::env::var("EXCURSIO_PAGE_SIZE") {
            if let Ok(n) = v.parse() {
                self.default_page_size = n;
            }
        }
        if let Ok(v) = std::env::var("EXCURSIO_DEBOUNCE_MS") {
            if let Ok(n) = v.parse() {
                self.debounce_ms = n;
            }
        }
        if let Ok(v) = std::env::var("EXCURSIO_TIMEOUT_SECS") {
            if let Ok(n) = v.parse() {
                self.request_timeout_secs = n;
            }
        }
        if let Ok(v) = std::env::var("EXCURSIO_TRACE_LEVEL") {
            if !v.trim().is_empty() {
                self.trace_level = Some(v);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = Config::default();
        assert_eq!(config.base_url, "http://localhost:3000/api");
        assert_eq!(config.default_page_size, 12);
        assert_eq!(config.debounce(), Duration::from_millis(500));
    }

    #[test]
    fn partial_toml_keeps_defaults_for_the_rest() {
        let config = Config::from_toml("base_url = \"https://api.example.com/\"").unwrap();
        assert_eq!(config.base_url, "https://api.example.com/");
        assert_eq!(config.default_page_size, 12);
        assert_eq!(config.debounce_ms, 500);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(Config::from_toml("base_url = [").is_err());
    }

    #[test]
    fn reads_a_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "debounce_ms = 250\ndefault_page_size = 24\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.debounce(), Duration::from_millis(250));
        assert_eq!(config.default_page_size, 24);

        assert!(Config::from_file(&dir.path().join("missing.toml")).is_err());
    }
}
