//! Incoming event payload - content and linkage, no identity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::DomainError;
use crate::value_objects::{LinkedResource, Location};

/// The event attributes a caller submits on create and update
///
/// Carries no identity: the local identifier, handle, provenance and
/// remote identifier are assigned by the engine. The same draft shape is
/// used for full-replace updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct EventDraft {
    /// Event subject/title
    #[validate(length(min = 1, message = "subject is required"))]
    pub subject: String,
    /// Event date, day granularity
    pub date: NaiveDate,
    /// Free-text description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Reference URL rendered into the remote event body
    #[validate(url(message = "reference url must be a valid URL"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Where the event takes place
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    /// The single business resource this event belongs to
    pub linked_resource: LinkedResource,
}

impl EventDraft {
    /// Create a draft with the required fields
    #[must_use]
    pub fn new(subject: impl Into<String>, date: NaiveDate, linked_resource: LinkedResource) -> Self {
        Self {
            subject: subject.into(),
            date,
            description: None,
            url: None,
            location: None,
            linked_resource,
        }
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the reference URL
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the location
    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Validate the draft's content fields
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ValidationError`] describing the first
    /// offending field.
    pub fn validated(&self) -> Result<(), DomainError> {
        self.validate()
            .map_err(|e| DomainError::ValidationError(e.to_string()))
    }
}
