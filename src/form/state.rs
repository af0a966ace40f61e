//! Mutable state of the experience editor.
//!
//! Field values are kept as strings so the state maps one-to-one onto text
//! inputs. Validation errors are only surfaced for touched fields; a failed
//! submit touches everything so each problem becomes visible at once.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::{Category, Difficulty, Experience, Location};
use crate::form::schema::{check, spec, ArrayField, Field};

/// Editor state: scalar values, list values and which fields were touched.
#[derive(Debug, Clone)]
pub struct FormState {
    values: BTreeMap<Field, String>,
    arrays: BTreeMap<ArrayField, Vec<String>>,
    touched: BTreeSet<Field>,
}

impl FormState {
    /// An empty form carrying every field's default.
    #[must_use]
    pub fn new() -> Self {
        let values = Field::ALL
            .iter()
            .map(|&f| (f, spec(f).default.to_string()))
            .collect();
        let arrays = ArrayField::ALL.iter().map(|&f| (f, Vec::new())).collect();
        Self {
            values,
            arrays,
            touched: BTreeSet::new(),
        }
    }

    /// Fills the form from an existing experience for editing.
    #[must_use]
    pub fn from_experience(exp: &Experience) -> Self {
        let mut form = Self::new();
        form.set_value(Field::Title, &exp.title);
        form.set_value(Field::ShortDescription, &exp.short_description);
        form.set_value(Field::Description, &exp.description);
        form.set_value(Field::Location, &exp.location.name);
        form.set_value(Field::Duration, &exp.duration.to_string());
        form.set_value(Field::Price, &exp.price.to_string());
        form.set_value(Field::Currency, &exp.currency);
        form.set_value(Field::MaxParticipants, &exp.max_participants.to_string());
        form.set_value(Field::Category, exp.category.as_str());
        form.set_value(Field::Difficulty, exp.difficulty.as_str());
        form.set_value(Field::MeetingPoint, &exp.meeting_point);
        form.set_value(Field::CancellationPolicy, &exp.cancellation_policy);
        form.set_value(Field::IsActive, if exp.is_active { "true" } else { "false" });
        form.touched.clear();
        *form.items_mut(ArrayField::Images) = exp.images.clone();
        *form.items_mut(ArrayField::Highlights) = exp.highlights.clone();
        *form.items_mut(ArrayField::Included) = exp.included.clone();
        *form.items_mut(ArrayField::Excluded) = exp.excluded.clone();
        *form.items_mut(ArrayField::Languages) = exp.languages.clone();
        form
    }

    /// Sets a scalar field, marking it touched.
    pub fn set_value(&mut self, field: Field, value: &str) {
        self.values.insert(field, value.to_string());
        self.touched.insert(field);
    }

    /// Current value of a scalar field.
    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        self.values.get(&field).map_or("", String::as_str)
    }

    /// Current entries of a list field.
    #[must_use]
    pub fn items(&self, field: ArrayField) -> &[String] {
        self.arrays.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Appends an empty entry to a list field for the user to fill in.
    pub fn add_item(&mut self, field: ArrayField) {
        self.items_mut(field).push(String::new());
    }

    /// Overwrites one entry of a list field. Out-of-range indexes are
    /// ignored.
    pub fn set_item(&mut self, field: ArrayField, index: usize, value: &str) {
        let items = self.items_mut(field);
        if let Some(slot) = items.get_mut(index) {
            *slot = value.to_string();
        }
    }

    /// Removes one entry of a list field. Out-of-range indexes are ignored.
    pub fn remove_item(&mut self, field: ArrayField, index: usize) {
        let items = self.items_mut(field);
        if index < items.len() {
            items.remove(index);
        }
    }

    /// Marks every field touched, revealing all validation errors.
    pub fn touch_all(&mut self) {
        self.touched.extend(Field::ALL);
    }

    /// Every current validation error, touched or not.
    #[must_use]
    pub fn validate(&self) -> BTreeMap<Field, String> {
        Field::ALL
            .iter()
            .filter_map(|&f| check(f, self.value(f)).map(|msg| (f, msg)))
            .collect()
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// The error to display for a field, or `None` while it is untouched.
    #[must_use]
    pub fn field_error(&self, field: Field) -> Option<String> {
        if self.touched.contains(&field) {
            check(field, self.value(field))
        } else {
            None
        }
    }

    /// Builds a creation draft from the form.
    ///
    /// Returns `None` when a numeric or enumerated field does not parse;
    /// a form that passed [`FormState::validate`] always converts. Blank
    /// list entries are dropped.
    #[must_use]
    pub fn to_draft(&self) -> Option<Experience> {
        let category: Category = self.value(Field::Category).trim().parse().ok()?;
        let difficulty: Difficulty = self.value(Field::Difficulty).trim().parse().ok()?;
        let duration: f64 = self.value(Field::Duration).trim().parse().ok()?;
        let price: f64 = self.value(Field::Price).trim().parse().ok()?;
        let max_participants = self
            .value(Field::MaxParticipants)
            .trim()
            .parse::<f64>()
            .ok()? as u32;
        Some(Experience {
            id: None,
            title: self.value(Field::Title).trim().to_string(),
            description: self.value(Field::Description).trim().to_string(),
            short_description: self.value(Field::ShortDescription).trim().to_string(),
            category,
            location: Location {
                name: self.value(Field::Location).trim().to_string(),
                ..Location::default()
            },
            duration,
            price,
            currency: self.value(Field::Currency).trim().to_string(),
            max_participants,
            difficulty,
            images: self.cleaned(ArrayField::Images),
            highlights: self.cleaned(ArrayField::Highlights),
            included: self.cleaned(ArrayField::Included),
            excluded: self.cleaned(ArrayField::Excluded),
            meeting_point: self.value(Field::MeetingPoint).trim().to_string(),
            languages: self.cleaned(ArrayField::Languages),
            cancellation_policy: self.value(Field::CancellationPolicy).trim().to_string(),
            rating: 0.0,
            review_count: 0,
            is_active: self.value(Field::IsActive) == "true",
            availability: Vec::new(),
            created_at: None,
            updated_at: None,
        })
    }

    fn cleaned(&self, field: ArrayField) -> Vec<String> {
        self.items(field)
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    fn items_mut(&mut self, field: ArrayField) -> &mut Vec<String> {
        self.arrays.entry(field).or_default()
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}
