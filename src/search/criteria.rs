//! Filter criteria, patches and pagination requests.
//!
//! A [`FilterCriteria`] is the normalized value the debounce logic compares
//! for change detection, so normalization must be idempotent: trimming an
//! already-trimmed string and dropping an already-absent field both yield
//! the same value. Views never mutate criteria directly; they submit a
//! [`FilterPatch`] and the machine merges it.

use chrono::NaiveDate;

use crate::domain::{Category, Difficulty, SortBy, Status};

/// Page size used by the public listing.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Normalized filter state.
///
/// `None` means "not filtering on this"; empty and whitespace-only strings
/// normalize to `None` so they compare equal to an untouched field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub search: Option<String>,
    pub category: Option<Category>,
    pub difficulty: Option<Difficulty>,
    pub location: Option<String>,
    pub location_id: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub participants: Option<u32>,
    pub status: Option<Status>,
    pub sort_by: Option<SortBy>,
}

impl FilterCriteria {
    /// Returns the normalized form of `self`. Idempotent.
    #[must_use]
    pub fn normalized(&self) -> FilterCriteria {
        let mut out = self.clone();
        out.search = normalize_text(out.search);
        out.location = normalize_text(out.location);
        out.location_id = normalize_text(out.location_id);
        out
    }

    /// Merges a patch into `self`, returning the normalized result.
    #[must_use]
    pub fn merged(&self, patch: &FilterPatch) -> FilterCriteria {
        let mut out = self.clone();
        patch.search.apply(&mut out.search);
        patch.category.apply(&mut out.category);
        patch.difficulty.apply(&mut out.difficulty);
        patch.location.apply(&mut out.location);
        patch.location_id.apply(&mut out.location_id);
        patch.min_price.apply(&mut out.min_price);
        patch.max_price.apply(&mut out.max_price);
        patch.start_date.apply(&mut out.start_date);
        patch.end_date.apply(&mut out.end_date);
        patch.participants.apply(&mut out.participants);
        patch.status.apply(&mut out.status);
        patch.sort_by.apply(&mut out.sort_by);
        out.normalized()
    }

    /// Query parameters for the listing and search endpoints.
    ///
    /// Absent fields are omitted entirely; the HTTP layer additionally drops
    /// any pair whose value is blank.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(v) = &self.search {
            pairs.push(("search", v.clone()));
        }
        if let Some(v) = &self.category {
            pairs.push(("category", v.as_str().to_string()));
        }
        if let Some(v) = &self.difficulty {
            pairs.push(("difficulty", v.as_str().to_string()));
        }
        if let Some(v) = &self.location {
            pairs.push(("location", v.clone()));
        }
        if let Some(v) = &self.location_id {
            pairs.push(("locationId", v.clone()));
        }
        if let Some(v) = self.min_price {
            pairs.push(("minPrice", v.to_string()));
        }
        if let Some(v) = self.max_price {
            pairs.push(("maxPrice", v.to_string()));
        }
        if let Some(v) = self.start_date {
            pairs.push(("startDate", v.to_string()));
        }
        if let Some(v) = self.end_date {
            pairs.push(("endDate", v.to_string()));
        }
        if let Some(v) = self.participants {
            pairs.push(("participants", v.to_string()));
        }
        if let Some(v) = &self.status {
            pairs.push(("status", v.as_str().to_string()));
        }
        if let Some(v) = &self.sort_by {
            pairs.push(("sortBy", v.as_str().to_string()));
        }
        pairs
    }
}

fn normalize_text(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Per-field instruction inside a [`FilterPatch`].
#[derive(Debug, Clone, PartialEq)]
pub enum Patch<T> {
    /// Leave the field as it is.
    Keep,
    /// Reset the field to "not filtering".
    Clear,
    /// Set the field to a value.
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Keep
    }
}

impl<T: Clone> Patch<T> {
    fn apply(&self, target: &mut Option<T>) {
        match self {
            Patch::Keep => {}
            Patch::Clear => *target = None,
            Patch::Set(value) => *target = Some(value.clone()),
        }
    }
}

/// Partial change to filter criteria.
///
/// Distinguishing [`Patch::Keep`] from [`Patch::Clear`] lets a view change
/// one field without knowing the others, and lets "clear this filter" be
/// expressed without sentinel values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterPatch {
    pub search: Patch<String>,
    pub category: Patch<Category>,
    pub difficulty: Patch<Difficulty>,
    pub location: Patch<String>,
    pub location_id: Patch<String>,
    pub min_price: Patch<f64>,
    pub max_price: Patch<f64>,
    pub start_date: Patch<NaiveDate>,
    pub end_date: Patch<NaiveDate>,
    pub participants: Patch<u32>,
    pub status: Patch<Status>,
    pub sort_by: Patch<SortBy>,
}

/// Which page of results to request.
///
/// Internally zero-based; the wire protocol is one-based, so
/// [`PageRequest::to_query_pairs`] adds one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page_index: usize,
    pub page_size: usize,
}

impl PageRequest {
    /// Creates a request, clamping the page size to at least one.
    #[must_use]
    pub fn new(page_index: usize, page_size: usize) -> Self {
        Self {
            page_index,
            page_size: page_size.max(1),
        }
    }

    /// The `page` and `limit` wire parameters.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", (self.page_index + 1).to_string()),
            ("limit", self.page_size.to_string()),
        ]
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

/// A complete fetch request: what to filter on and which page to show.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub criteria: FilterCriteria,
    pub page: PageRequest,
}

impl SearchQuery {
    /// Combined filter and pagination wire parameters.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = self.criteria.to_query_pairs();
        pairs.extend(self.page.to_query_pairs());
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_is_idempotent() {
        let criteria = FilterCriteria {
            search: Some("  hiking  ".to_string()),
            location: Some("   ".to_string()),
            ..FilterCriteria::default()
        };
        let once = criteria.normalized();
        assert_eq!(once.search.as_deref(), Some("hiking"));
        assert_eq!(once.location, None);
        assert_eq!(once.normalized(), once);
    }

    #[test]
    fn blank_fields_produce_no_pairs() {
        let criteria = FilterCriteria {
            search: Some("  ".to_string()),
            ..FilterCriteria::default()
        }
        .normalized();
        assert!(criteria.to_query_pairs().is_empty());
    }

    #[test]
    fn merged_applies_set_clear_and_keep() {
        let criteria = FilterCriteria {
            search: Some("hiking".to_string()),
            category: Some(Category::Adventure),
            min_price: Some(10.0),
            ..FilterCriteria::default()
        };
        let patch = FilterPatch {
            search: Patch::Set("  kayak ".to_string()),
            category: Patch::Clear,
            ..FilterPatch::default()
        };
        let merged = criteria.merged(&patch);
        assert_eq!(merged.search.as_deref(), Some("kayak"));
        assert_eq!(merged.category, None);
        assert_eq!(merged.min_price, Some(10.0));
    }

    #[test]
    fn setting_a_blank_string_equals_clearing() {
        let criteria = FilterCriteria {
            search: Some("hiking".to_string()),
            ..FilterCriteria::default()
        };
        let blanked = criteria.merged(&FilterPatch {
            search: Patch::Set("   ".to_string()),
            ..FilterPatch::default()
        });
        let cleared = criteria.merged(&FilterPatch {
            search: Patch::Clear,
            ..FilterPatch::default()
        });
        assert_eq!(blanked, cleared);
    }

    #[test]
    fn page_request_is_one_based_on_the_wire() {
        let page = PageRequest::new(2, 12);
        assert_eq!(
            page.to_query_pairs(),
            vec![("page", "3".to_string()), ("limit", "12".to_string())]
        );
    }

    #[test]
    fn page_size_clamps_to_one() {
        assert_eq!(PageRequest::new(0, 0).page_size, 1);
    }

    #[test]
    fn query_pairs_combine_filters_and_pagination() {
        let query = SearchQuery {
            criteria: FilterCriteria {
                category: Some(Category::Nature),
                sort_by: Some(SortBy::PriceAsc),
                ..FilterCriteria::default()
            },
            page: PageRequest::default(),
        };
        assert_eq!(
            query.to_query_pairs(),
            vec![
                ("category", "nature".to_string()),
                ("sortBy", "price_asc".to_string()),
                ("page", "1".to_string()),
                ("limit", "12".to_string()),
            ]
        );
    }
}
