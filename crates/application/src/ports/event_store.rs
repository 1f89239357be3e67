//! Event store port - the local system of record
//!
//! The store owns event records and their calendar-membership links.
//! Implemented by the SQLite adapter in the infrastructure crate.

use async_trait::async_trait;
use domain::{Calendar, CalendarEvent, CalendarUri, EventDraft, EventId, RemoteEventId, UserId};
use thiserror::Error;

/// Event store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// A query or statement against the store failed
    #[error("Store query failed: {0}")]
    QueryFailed(String),

    /// A stored record could not be mapped back to the domain model
    #[error("Stored record is malformed: {0}")]
    MalformedRecord(String),
}

/// Event store port
///
/// A missing remote identifier on a stored record is a normal condition
/// (externally-mastered events), never a store error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventStorePort: Send + Sync {
    /// Insert a new event record under the given calendar.
    ///
    /// Assigns the local identifier and URI handle, stamps provenance,
    /// persists present optional fields and the membership link. Returns
    /// the full stored record.
    async fn insert(
        &self,
        calendar: &CalendarUri,
        draft: &EventDraft,
        remote_id: Option<RemoteEventId>,
        owner: UserId,
    ) -> Result<CalendarEvent, StoreError>;

    /// Fetch an event record by local identifier
    async fn get(&self, id: &EventId) -> Result<Option<CalendarEvent>, StoreError>;

    /// Replace the mutable fields of an existing record.
    ///
    /// Keeps the local identifier and URI handle, re-stamps the editor and
    /// modification timestamp, re-asserts the membership link.
    async fn update(
        &self,
        id: &EventId,
        calendar: &CalendarUri,
        draft: &EventDraft,
        remote_id: Option<RemoteEventId>,
        editor: UserId,
    ) -> Result<CalendarEvent, StoreError>;

    /// Remove an event record and its membership link.
    ///
    /// Deleting an absent record is a no-op. Must succeed even when
    /// optional fields were never set.
    async fn delete(&self, id: &EventId) -> Result<(), StoreError>;

    /// List all calendars known to the store, for registry bootstrap
    async fn list_calendars(&self) -> Result<Vec<Calendar>, StoreError>;
}
