//! Calendar event entity - the unit of synchronization

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{
    CalendarUri, EventId, LinkedResource, Location, RemoteEventId, UserId,
};

/// A calendar event as recorded in the local store
///
/// The local store is the system of record; the remote provider holds a
/// mirror. A record carries at most one remote identifier. When the
/// identifier is present the event is mirrored; when it is absent the
/// event either has not been mirrored yet or was created by an external
/// system and is read-only through this engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Local identifier, assigned at insert
    pub id: EventId,
    /// Local URI handle
    pub uri: String,
    /// Event subject/title
    pub subject: String,
    /// Event date, day granularity
    pub date: NaiveDate,
    /// Free-text description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Reference URL rendered into the remote event body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Where the event takes place
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    /// The single business resource this event belongs to
    pub linked_resource: LinkedResource,
    /// The owning calendar
    pub calendar: CalendarUri,
    /// Identifier of the mirrored remote event, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_id: Option<RemoteEventId>,
    /// Origin marker stamped on records created by this engine
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    /// User who created the record
    pub created_by: UserId,
    /// User who last edited the record
    pub modified_by: UserId,
    /// When the record was created
    pub created_at: DateTime<Utc>,
    /// When the record was last modified
    pub updated_at: DateTime<Utc>,
}

impl CalendarEvent {
    /// Whether a remote mirror exists for this event
    #[must_use]
    pub const fn is_synced(&self) -> bool {
        self.remote_id.is_some()
    }

    /// Whether this event is mastered by an external system.
    ///
    /// Such events carry no remote identifier and are read-only through
    /// this engine; updating them is rejected rather than silently
    /// creating a remote mirror.
    #[must_use]
    pub const fn is_externally_mastered(&self) -> bool {
        self.remote_id.is_none()
    }

    /// Rebind the remote identifier after a recovery re-create
    pub fn bind_remote_id(&mut self, remote_id: RemoteEventId) {
        self.remote_id = Some(remote_id);
    }
}

impl std::fmt::Display for CalendarEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} on {} ({})", self.subject, self.date, self.id)
    }
}
