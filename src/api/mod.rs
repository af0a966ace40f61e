//! HTTP access to the experience backend.
//!
//! The layering mirrors the rest of the crate: [`client`] owns the generic
//! request plumbing (base URL, envelope unwrapping, error normalization,
//! loading counter), [`backend`] maps the concrete REST endpoints onto it
//! behind the [`ExperienceApi`] trait, and [`loading`] tracks in-flight
//! requests for spinner display.

pub mod backend;
pub mod client;
pub mod envelope;
pub mod loading;

pub use backend::{
    AvailabilityCheck, AvailabilityQuery, ExperienceApi, Facets, HttpBackend, PriceRange,
    SearchOutcome,
};
pub use client::HttpClient;
pub use envelope::Envelope;
pub use loading::{LoadingCounter, LoadingGuard};
