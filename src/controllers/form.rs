//! Create and edit editor screen.
//!
//! Wraps a [`FormState`] with the load-populate-submit flow. Submission
//! validates first; a failed validation touches every field so all errors
//! show, and nothing is sent.

use std::sync::Arc;

use crate::api::ExperienceApi;
use crate::controllers::{Nav, Notice};
use crate::domain::ExperiencePatch;
use crate::form::{ArrayField, Field, FormState};

/// Whether the editor creates a new experience or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(String),
}

/// Controller for the editor screen.
pub struct FormController {
    api: Arc<dyn ExperienceApi>,
    mode: FormMode,
    form: FormState,
    saving: bool,
}

impl FormController {
    #[must_use]
    pub fn new(api: Arc<dyn ExperienceApi>, mode: FormMode) -> Self {
        Self {
            api,
            mode,
            form: FormState::new(),
            saving: false,
        }
    }

    /// Populates the form when editing. Creating needs no load.
    pub async fn load(&mut self) -> (Nav, Option<Notice>) {
        let FormMode::Edit(id) = self.mode.clone() else {
            return (Nav::Stay, None);
        };
        match self.api.get(&id).await {
            Ok(exp) => {
                self.form = FormState::from_experience(&exp);
                (Nav::Stay, None)
            }
            Err(err) => {
                tracing::error!(id = %id, error = %err, "form load failed");
                (
                    Nav::ToList,
                    Some(Notice::error("Failed to load experience for editing")),
                )
            }
        }
    }

    #[must_use]
    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    #[must_use]
    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Whether a submit is in flight.
    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Sets a scalar field, marking it touched.
    pub fn set_value(&mut self, field: Field, value: &str) {
        self.form.set_value(field, value);
    }

    /// Appends an empty entry to a list field.
    pub fn add_item(&mut self, field: ArrayField) {
        self.form.add_item(field);
    }

    /// Overwrites one entry of a list field.
    pub fn set_item(&mut self, field: ArrayField, index: usize, value: &str) {
        self.form.set_item(field, index, value);
    }

    /// Removes one entry of a list field.
    pub fn remove_item(&mut self, field: ArrayField, index: usize) {
        self.form.remove_item(field, index);
    }

    /// The error to display for a field, or `None` while it is untouched.
    #[must_use]
    pub fn field_error(&self, field: Field) -> Option<String> {
        self.form.field_error(field)
    }

    /// Validates and submits the form.
    ///
    /// Creation navigates to the new experience's detail page; an update
    /// stays on the detail page of the edited one.
    pub async fn submit(&mut self) -> (Nav, Notice) {
        if !self.form.is_valid() {
            self.form.touch_all();
            return (
                Nav::Stay,
                Notice::error("Please fix the form errors before submitting"),
            );
        }
        let Some(draft) = self.form.to_draft() else {
            return (
                Nav::Stay,
                Notice::error("Please fix the form errors before submitting"),
            );
        };

        self.saving = true;
        let outcome = match self.mode.clone() {
            FormMode::Create => match self.api.create(&draft).await {
                Ok(created) => {
                    let nav = created
                        .id
                        .map(Nav::ToDetail)
                        .unwrap_or(Nav::ToList);
                    Ok((nav, Notice::success("Experience created successfully")))
                }
                Err(err) => Err(err),
            },
            FormMode::Edit(id) => {
                let patch = ExperiencePatch::from(&draft);
                match self.api.update(&id, &patch).await {
                    Ok(_) => Ok((
                        Nav::ToDetail(id),
                        Notice::success("Experience updated successfully"),
                    )),
                    Err(err) => Err(err),
                }
            }
        };
        self.saving = false;

        match outcome {
            Ok(result) => result,
            Err(err) => {
                tracing::error!(error = %err, "form submit failed");
                (
                    Nav::Stay,
                    Notice::error("Failed to save experience. Please try again."),
                )
            }
        }
    }

    /// Leaves the editor without saving.
    #[must_use]
    pub fn cancel(&self) -> Nav {
        match &self.mode {
            FormMode::Create => Nav::ToList,
            FormMode::Edit(id) => Nav::ToDetail(id.clone()),
        }
    }
}
