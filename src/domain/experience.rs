//! Core data model for travel experiences.
//!
//! These types mirror the backend's JSON representation. Field names on the
//! wire are camelCase while enum values use the backend's lowercase and
//! kebab-case spellings, so every type carries the serde attributes needed
//! to round-trip without manual mapping.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Experience category.
///
/// Serialized in kebab-case to match the backend (`food-drink`, not
/// `FoodDrink`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Adventure,
    Cultural,
    FoodDrink,
    Nature,
    Historical,
    Entertainment,
    Sports,
    Wellness,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 8] = [
        Category::Adventure,
        Category::Cultural,
        Category::FoodDrink,
        Category::Nature,
        Category::Historical,
        Category::Entertainment,
        Category::Sports,
        Category::Wellness,
    ];

    /// The wire spelling of this category.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Adventure => "adventure",
            Category::Cultural => "cultural",
            Category::FoodDrink => "food-drink",
            Category::Nature => "nature",
            Category::Historical => "historical",
            Category::Entertainment => "entertainment",
            Category::Sports => "sports",
            Category::Wellness => "wellness",
        }
    }

    /// Human-readable label for menus and badges.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Category::Adventure => "Adventure",
            Category::Cultural => "Cultural",
            Category::FoodDrink => "Food & Drink",
            Category::Nature => "Nature",
            Category::Historical => "Historical",
            Category::Entertainment => "Entertainment",
            Category::Sports => "Sports",
            Category::Wellness => "Wellness",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

/// Physical difficulty of an experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Moderate,
    Challenging,
    Extreme,
}

impl Difficulty {
    /// All difficulties, mildest first.
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Moderate,
        Difficulty::Challenging,
        Difficulty::Extreme,
    ];

    /// The wire spelling of this difficulty.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Moderate => "moderate",
            Difficulty::Challenging => "challenging",
            Difficulty::Extreme => "extreme",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Moderate => "Moderate",
            Difficulty::Challenging => "Challenging",
            Difficulty::Extreme => "Extreme",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .iter()
            .copied()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| format!("unknown difficulty: {s}"))
    }
}

/// Publication status used by admin filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Inactive,
}

impl Status {
    /// The wire spelling of this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Inactive => "inactive",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Status::Active),
            "inactive" => Ok(Status::Inactive),
            other => Err(format!("unknown status: {other}")),
        }
    }
}

/// Result ordering understood by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortBy {
    #[serde(rename = "rating")]
    Rating,
    #[serde(rename = "price_asc")]
    PriceAsc,
    #[serde(rename = "price_desc")]
    PriceDesc,
    #[serde(rename = "duration")]
    Duration,
    #[serde(rename = "createdAt_desc")]
    CreatedDesc,
}

impl SortBy {
    /// The wire spelling of this ordering.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Rating => "rating",
            SortBy::PriceAsc => "price_asc",
            SortBy::PriceDesc => "price_desc",
            SortBy::Duration => "duration",
            SortBy::CreatedDesc => "createdAt_desc",
        }
    }
}

impl std::fmt::Display for SortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Geographic coordinates of a meeting point or venue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Where an experience takes place.
///
/// Also the record shape of `GET /locations` and the location facets, where
/// `id` is present; drafts built from the form leave it empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

/// A bookable date with remaining capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub date: NaiveDate,
    pub available_slots: u32,
    /// Date-specific price override, when the backend supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// A travel experience as the backend represents it.
///
/// `id`, `created_at` and `updated_at` are assigned server-side and absent
/// on drafts, hence optional and skipped when empty so creation payloads do
/// not carry them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub short_description: String,
    pub category: Category,
    pub location: Location,
    /// Duration in hours. Fractional values are common (0.5 = thirty minutes).
    pub duration: f64,
    pub price: f64,
    pub currency: String,
    pub max_participants: u32,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub included: Vec<String>,
    #[serde(default)]
    pub excluded: Vec<String>,
    pub meeting_point: String,
    #[serde(default)]
    pub languages: Vec<String>,
    pub cancellation_policy: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    pub is_active: bool,
    #[serde(default)]
    pub availability: Vec<Availability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Experience {
    /// Strips server-assigned fields, producing a draft suitable for
    /// creation. Used when duplicating an existing experience.
    #[must_use]
    pub fn draft(&self) -> Experience {
        Experience {
            id: None,
            created_at: None,
            updated_at: None,
            ..self.clone()
        }
    }
}

/// Partial update payload for `PUT /experiences/{id}`.
///
/// Every field is optional; only the fields present are serialized, so a
/// status toggle sends nothing but `{"isActive": ...}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperiencePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlights: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub included: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excluded: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_point: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl From<&Experience> for ExperiencePatch {
    /// Full-replacement patch carrying every editable field.
    fn from(exp: &Experience) -> Self {
        ExperiencePatch {
            title: Some(exp.title.clone()),
            description: Some(exp.description.clone()),
            short_description: Some(exp.short_description.clone()),
            category: Some(exp.category),
            location: Some(exp.location.clone()),
            duration: Some(exp.duration),
            price: Some(exp.price),
            currency: Some(exp.currency.clone()),
            max_participants: Some(exp.max_participants),
            difficulty: Some(exp.difficulty),
            images: Some(exp.images.clone()),
            highlights: Some(exp.highlights.clone()),
            included: Some(exp.included.clone()),
            excluded: Some(exp.excluded.clone()),
            meeting_point: Some(exp.meeting_point.clone()),
            languages: Some(exp.languages.clone()),
            cancellation_policy: Some(exp.cancellation_policy.clone()),
            is_active: Some(exp.is_active),
        }
    }
}
