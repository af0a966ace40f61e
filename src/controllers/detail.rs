//! Single-experience detail screen.
//!
//! Loads one experience by id, exposes an image gallery cursor, an
//! availability check for the booking widget, and the delete flow. A load
//! failure navigates back to the listing with an error notice.

use std::sync::Arc;

use crate::api::{AvailabilityCheck, AvailabilityQuery, ExperienceApi};
use crate::controllers::{Nav, Notice, PendingDelete};
use crate::domain::{Experience, Result};
use crate::search::RequestState;

/// Controller for the detail screen.
pub struct DetailController {
    api: Arc<dyn ExperienceApi>,
    state: RequestState<Experience>,
    selected_image: usize,
}

impl DetailController {
    #[must_use]
    pub fn new(api: Arc<dyn ExperienceApi>) -> Self {
        Self {
            api,
            state: RequestState::Idle,
            selected_image: 0,
        }
    }

    /// Loads the experience. On failure the caller is sent back to the
    /// listing with a notice.
    pub async fn load(&mut self, id: &str) -> (Nav, Option<Notice>) {
        self.state = RequestState::Loading;
        self.selected_image = 0;
        match self.api.get(id).await {
            Ok(exp) => {
                self.state = RequestState::Success(exp);
                (Nav::Stay, None)
            }
            Err(err) => {
                tracing::error!(id, error = %err, "detail load failed");
                self.state = RequestState::Failed(err.info());
                (
                    Nav::ToList,
                    Some(Notice::error("Failed to load experience details")),
                )
            }
        }
    }

    /// Current request state.
    #[must_use]
    pub fn state(&self) -> &RequestState<Experience> {
        &self.state
    }

    /// The loaded experience, if the load succeeded.
    #[must_use]
    pub fn experience(&self) -> Option<&Experience> {
        self.state.success()
    }

    /// Index of the gallery image on display.
    #[must_use]
    pub fn selected_image(&self) -> usize {
        self.selected_image
    }

    /// Jumps the gallery to an image. Out-of-range indexes are ignored.
    pub fn select_image(&mut self, index: usize) {
        if index < self.image_count() {
            self.selected_image = index;
        }
    }

    /// Advances the gallery, wrapping past the last image.
    pub fn next_image(&mut self) {
        let count = self.image_count();
        if count > 0 {
            self.selected_image = (self.selected_image + 1) % count;
        }
    }

    /// Steps the gallery back, wrapping before the first image.
    pub fn previous_image(&mut self) {
        let count = self.image_count();
        if count > 0 {
            self.selected_image = (self.selected_image + count - 1) % count;
        }
    }

    /// Asks the backend whether the loaded experience can host a booking.
    pub async fn check_availability(
        &self,
        query: &AvailabilityQuery,
    ) -> Result<AvailabilityCheck> {
        let id = self
            .experience()
            .and_then(|exp| exp.id.as_deref())
            .ok_or_else(|| {
                crate::domain::Error::Unknown("no experience loaded".to_string())
            })?;
        self.api.check_availability(id, query).await
    }

    /// Returns to the listing.
    #[must_use]
    pub fn back(&self) -> Nav {
        Nav::ToList
    }

    /// Opens the editor for the loaded experience.
    #[must_use]
    pub fn edit(&self) -> Option<Nav> {
        let id = self.experience()?.id.clone()?;
        Some(Nav::ToEdit(id))
    }

    /// Starts the delete flow for the loaded experience.
    #[must_use]
    pub fn request_delete(&self) -> Option<PendingDelete> {
        let exp = self.experience()?;
        let id = exp.id.as_deref()?;
        Some(PendingDelete::new(id, &exp.title))
    }

    /// Performs a confirmed delete and leaves the screen.
    pub async fn confirm_delete(&mut self, pending: &PendingDelete) -> (Nav, Notice) {
        match self.api.delete(&pending.id).await {
            Ok(()) => (
                Nav::ToList,
                Notice::success("Experience deleted successfully"),
            ),
            Err(err) => {
                tracing::error!(id = %pending.id, error = %err, "delete failed");
                (
                    Nav::Stay,
                    Notice::error("Failed to delete experience. Please try again."),
                )
            }
        }
    }

    fn image_count(&self) -> usize {
        self.experience().map_or(0, |exp| exp.images.len())
    }
}
