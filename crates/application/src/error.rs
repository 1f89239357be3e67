//! Application-level errors - the failure taxonomy of the sync engine

use domain::{CalendarUri, DomainError, EventId};
use thiserror::Error;

use crate::ports::{RemoteCalendarError, StoreError};

/// Errors that can occur while orchestrating a synchronization operation
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error (validation, malformed identifiers)
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The linked resource reference could not be resolved to a known kind
    #[error("Routing failed: {0}")]
    Routing(String),

    /// The referenced event has no local record
    #[error("Calendar event not found: {0}")]
    NotFoundLocal(EventId),

    /// Update attempted on an event without a remote mirror.
    ///
    /// Such events were created by an external system and are read-only
    /// through this engine.
    #[error("Calendar event {0} is mastered externally and cannot be modified here")]
    ImmutableExternalEvent(EventId),

    /// The event's calendar has no remote calendar mapping
    #[error("No remote calendar mapping for calendar <{0}>")]
    MissingCalendarLink(CalendarUri),

    /// Remote provider failure other than "not found"
    #[error("Remote calendar failure: {0}")]
    Remote(#[from] RemoteCalendarError),

    /// Local record store failure
    #[error("Event store failure: {0}")]
    Store(#[from] StoreError),
}

impl ApplicationError {
    /// Whether this error maps to a not-found outcome at the boundary
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFoundLocal(_))
    }

    /// Whether this error maps to a conflict outcome at the boundary
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::ImmutableExternalEvent(_))
    }
}
