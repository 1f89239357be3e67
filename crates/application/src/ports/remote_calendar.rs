//! Remote calendar port - the mirrored side of synchronization
//!
//! All operations are scoped to one calendar, addressed either by its
//! remote identifier or as the acting user's personal calendar. "Not
//! found" on the remote side is legitimate control flow here, so it is
//! modeled as result variants (`Option`, [`RemoteUpdateOutcome`], silent
//! delete success) rather than as an error.

use std::fmt;

use async_trait::async_trait;
use chrono::NaiveDate;
use domain::{CalendarKind, EventDraft, RemoteCalendarId, RemoteEventId};
use thiserror::Error;

/// Which remote calendar an operation addresses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarTarget {
    /// A shared calendar with a known remote identifier
    Named(RemoteCalendarId),
    /// The acting user's own calendar (personal-calendar mode)
    CurrentUser,
}

impl fmt::Display for CalendarTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(id) => write!(f, "calendar {id}"),
            Self::CurrentUser => write!(f, "personal calendar"),
        }
    }
}

/// The slice of remote event state this engine reconciles against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEventSnapshot {
    /// Provider-assigned event identifier
    pub id: RemoteEventId,
    /// The remote-side event date, day granularity
    pub date: NaiveDate,
}

/// Result of a remote update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteUpdateOutcome {
    /// The existing remote event was updated in place
    Updated(RemoteEventSnapshot),
    /// The remote event had vanished; a fresh one was created from current
    /// content and its new identifier must be re-bound locally
    Recreated(RemoteEventSnapshot),
}

impl RemoteUpdateOutcome {
    /// Whether the remote event was re-created during the update
    #[must_use]
    pub const fn was_recreated(&self) -> bool {
        matches!(self, Self::Recreated(_))
    }

    /// Consume the outcome, yielding the resulting snapshot
    #[must_use]
    pub fn into_snapshot(self) -> RemoteEventSnapshot {
        match self {
            Self::Updated(snapshot) | Self::Recreated(snapshot) => snapshot,
        }
    }
}

/// Remote calendar errors
///
/// Deliberately has no "not found" variant; the port contract normalizes
/// that outcome into its result types.
#[derive(Debug, Error)]
pub enum RemoteCalendarError {
    /// The provider rejected the credentials
    #[error("Remote authentication failed")]
    Unauthorized,

    /// The provider is temporarily unavailable (5xx)
    #[error("Remote calendar service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The request failed for another reason
    #[error("Remote request failed: {0}")]
    RequestFailed(String),

    /// The provider's response could not be interpreted
    #[error("Failed to parse remote response: {0}")]
    ParseError(String),
}

/// Remote calendar port
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteCalendarPort: Send + Sync {
    /// Create the remote representation of a new event.
    ///
    /// Returns the snapshot carrying the provider-assigned identifier.
    async fn create(
        &self,
        target: &CalendarTarget,
        kind: CalendarKind,
        draft: &EventDraft,
    ) -> Result<RemoteEventSnapshot, RemoteCalendarError>;

    /// Fetch the remote event by identifier; `None` when the provider
    /// reports it missing.
    async fn get(
        &self,
        target: &CalendarTarget,
        remote_id: &RemoteEventId,
    ) -> Result<Option<RemoteEventSnapshot>, RemoteCalendarError>;

    /// Rebuild the remote representation of an existing event.
    ///
    /// When `reschedule` is false the start and end instants are omitted
    /// from the payload so the remote time slot is left untouched. When
    /// the provider reports the event missing, a fresh remote event is
    /// created from current content and returned as
    /// [`RemoteUpdateOutcome::Recreated`].
    async fn update(
        &self,
        target: &CalendarTarget,
        remote_id: &RemoteEventId,
        kind: CalendarKind,
        draft: &EventDraft,
        reschedule: bool,
    ) -> Result<RemoteUpdateOutcome, RemoteCalendarError>;

    /// Delete the remote event; "not found" counts as success.
    async fn delete(
        &self,
        target: &CalendarTarget,
        remote_id: &RemoteEventId,
    ) -> Result<(), RemoteCalendarError>;
}
