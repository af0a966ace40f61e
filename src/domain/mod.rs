//! Domain layer for the experience client.
//!
//! This module contains the core data model and error types, independent of
//! HTTP plumbing or view concerns. Everything the rest of the crate exchanges
//! with the backend is defined here.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`experience`]: The experience data model and its enumerations
//!
//! # Examples
//!
//! ```
//! use excursio::domain::{Category, Difficulty};
//!
//! assert_eq!(Category::FoodDrink.as_str(), "food-drink");
//! assert_eq!(Difficulty::Moderate.label(), "Moderate");
//! ```

pub mod error;
pub mod experience;

pub use error::{Error, ErrorInfo, Result};
pub use experience::{
    Availability, Category, Coordinates, Difficulty, Experience, ExperiencePatch, Location,
    SortBy, Status,
};
