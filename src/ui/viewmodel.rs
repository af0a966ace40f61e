//! View model types representing renderable listing state.
//!
//! View models are immutable snapshots computed from controller state,
//! optimized for rendering: prices, durations and ratings arrive
//! pre-formatted so the frontend only places strings. They contain no
//! business logic.

use crate::domain::Experience;
use crate::search::ResultPage;
use crate::ui::format::{format_duration, format_price, star_rating};

/// Status chip shown next to an experience in admin listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBadge {
    pub label: &'static str,
    /// Theme color name, not a concrete color.
    pub color: &'static str,
}

impl StatusBadge {
    #[must_use]
    pub fn for_active(is_active: bool) -> Self {
        if is_active {
            StatusBadge {
                label: "Active",
                color: "primary",
            }
        } else {
            StatusBadge {
                label: "Inactive",
                color: "warn",
            }
        }
    }
}

/// One row of a listing table or card grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceRow {
    /// Server id; empty only for drafts, which listings never contain.
    pub id: String,
    pub title: String,
    pub location: String,
    pub category: &'static str,
    pub price: String,
    pub duration: String,
    pub stars: [bool; 5],
    pub rating: f64,
    pub review_count: u32,
    pub status: StatusBadge,
}

impl ExperienceRow {
    #[must_use]
    pub fn from_experience(exp: &Experience) -> Self {
        ExperienceRow {
            id: exp.id.clone().unwrap_or_default(),
            title: exp.title.clone(),
            location: exp.location.name.clone(),
            category: exp.category.label(),
            price: format_price(exp.price, &exp.currency),
            duration: format_duration(exp.duration),
            stars: star_rating(exp.rating),
            rating: exp.rating,
            review_count: exp.review_count,
            status: StatusBadge::for_active(exp.is_active),
        }
    }
}

/// Rows for a fetched page.
#[must_use]
pub fn rows(page: &ResultPage<Experience>) -> Vec<ExperienceRow> {
    page.items.iter().map(ExperienceRow::from_experience).collect()
}

/// Message shown when a listing has nothing to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

impl EmptyState {
    /// Empty state for a listing, worded for whether filters are active.
    #[must_use]
    pub fn for_listing(filtered: bool) -> Self {
        if filtered {
            EmptyState {
                message: "No experiences match your filters".to_string(),
                subtitle: "Try adjusting or clearing your filters".to_string(),
            }
        } else {
            EmptyState {
                message: "No experiences found".to_string(),
                subtitle: "Check back later for new experiences".to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Difficulty, Location};

    fn sample() -> Experience {
        Experience {
            id: Some("exp-1".to_string()),
            title: "Sunset kayak tour".to_string(),
            description: String::new(),
            short_description: String::new(),
            category: Category::FoodDrink,
            location: Location {
                name: "Split harbor".to_string(),
                ..Location::default()
            },
            duration: 2.5,
            price: 1234.5,
            currency: "USD".to_string(),
            max_participants: 8,
            difficulty: Difficulty::Easy,
            images: Vec::new(),
            highlights: Vec::new(),
            included: Vec::new(),
            excluded: Vec::new(),
            meeting_point: String::new(),
            languages: Vec::new(),
            cancellation_policy: String::new(),
            rating: 4.6,
            review_count: 120,
            is_active: false,
            availability: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn row_precomputes_display_strings() {
        let row = ExperienceRow::from_experience(&sample());
        assert_eq!(row.price, "$1,234.50");
        assert_eq!(row.duration, "2.5 hours");
        assert_eq!(row.category, "Food & Drink");
        assert_eq!(row.stars, [true, true, true, true, false]);
        assert_eq!(row.status, StatusBadge::for_active(false));
        assert_eq!(row.status.label, "Inactive");
    }

    #[test]
    fn empty_state_wording_depends_on_filters() {
        assert!(EmptyState::for_listing(true).subtitle.contains("filters"));
        assert!(EmptyState::for_listing(false).message.contains("found"));
    }
}
