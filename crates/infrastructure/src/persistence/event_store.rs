//! SQLite-based event persistence
//!
//! Implements the application's event store port. The store is the system
//! of record: local identifiers and URI handles are minted here, and the
//! calendar-membership link lives in the same row as the event.

use std::sync::Arc;

use application::ports::{EventStorePort, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use domain::{
    Calendar, CalendarEvent, CalendarUri, EventDraft, EventId, LinkedResource,
    LinkedResourceKind, Location, RemoteCalendarId, RemoteEventId, UserId,
};
use rusqlite::{OptionalExtension, Row, params};
use tokio::task;
use tracing::{debug, instrument};

use super::connection::ConnectionPool;

const EVENT_COLUMNS: &str = "id, uri, calendar_uri, subject, date, description, url, location,
     linked_kind, linked_uri, remote_id, origin, created_by, modified_by, created_at, updated_at";

/// SQLite-based event store
#[derive(Debug, Clone)]
pub struct SqliteEventStore {
    pool: Arc<ConnectionPool>,
    event_base_uri: String,
    origin: String,
}

impl SqliteEventStore {
    /// Create a new SQLite event store.
    ///
    /// `event_base_uri` is the base under which local handles are minted;
    /// `origin` is the marker stamped on every record this engine creates.
    pub fn new(
        pool: Arc<ConnectionPool>,
        event_base_uri: impl Into<String>,
        origin: impl Into<String>,
    ) -> Self {
        Self {
            pool,
            event_base_uri: event_base_uri.into(),
            origin: origin.into(),
        }
    }

    /// Register or replace a calendar mapping.
    ///
    /// Calendars are reference data seeded by operations; the sync engine
    /// itself only reads them.
    #[instrument(skip(self, calendar), fields(calendar = %calendar.uri))]
    pub async fn register_calendar(&self, calendar: &Calendar) -> Result<(), StoreError> {
        let pool = Arc::clone(&self.pool);
        let uri = calendar.uri.to_string();
        let remote_id = calendar.remote_id.as_ref().map(ToString::to_string);

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(|e| StoreError::QueryFailed(e.to_string()))?;
            conn.execute(
                "INSERT OR REPLACE INTO calendars (uri, remote_id) VALUES (?1, ?2)",
                params![uri, remote_id],
            )
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?;
            Ok(())
        })
        .await
        .map_err(|e| StoreError::QueryFailed(e.to_string()))?
    }
}

#[async_trait]
impl EventStorePort for SqliteEventStore {
    #[instrument(skip(self, draft), fields(calendar = %calendar))]
    async fn insert(
        &self,
        calendar: &CalendarUri,
        draft: &EventDraft,
        remote_id: Option<RemoteEventId>,
        owner: UserId,
    ) -> Result<CalendarEvent, StoreError> {
        let pool = Arc::clone(&self.pool);
        let id = EventId::new();
        let now = Utc::now();
        let event = CalendarEvent {
            id,
            uri: format!("{}/calendar-events/{id}", self.event_base_uri),
            subject: draft.subject.clone(),
            date: draft.date,
            description: draft.description.clone(),
            url: draft.url.clone(),
            location: draft.location.clone(),
            linked_resource: draft.linked_resource.clone(),
            calendar: calendar.clone(),
            remote_id,
            origin: Some(self.origin.clone()),
            created_by: owner,
            modified_by: owner,
            created_at: now,
            updated_at: now,
        };

        let row = event.clone();
        task::spawn_blocking(move || {
            let conn = pool.get().map_err(|e| StoreError::QueryFailed(e.to_string()))?;
            conn.execute(
                "INSERT INTO calendar_events (
                    id, uri, calendar_uri, subject, date, description, url, location,
                    linked_kind, linked_uri, remote_id, origin,
                    created_by, modified_by, created_at, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
                params![
                    row.id.to_string(),
                    row.uri,
                    row.calendar.to_string(),
                    row.subject,
                    row.date.to_string(),
                    row.description,
                    row.url,
                    location_to_json(row.location.as_ref())?,
                    kind_to_str(row.linked_resource.kind()),
                    row.linked_resource.uri(),
                    row.remote_id.as_ref().map(ToString::to_string),
                    row.origin,
                    row.created_by.to_string(),
                    row.modified_by.to_string(),
                    row.created_at.to_rfc3339(),
                    row.updated_at.to_rfc3339(),
                ],
            )
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

            debug!("Inserted calendar event");
            Ok(())
        })
        .await
        .map_err(|e| StoreError::QueryFailed(e.to_string()))??;

        Ok(event)
    }

    #[instrument(skip(self), fields(event_id = %id))]
    async fn get(&self, id: &EventId) -> Result<Option<CalendarEvent>, StoreError> {
        let pool = Arc::clone(&self.pool);
        let id_str = id.to_string();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(|e| StoreError::QueryFailed(e.to_string()))?;
            let row = conn
                .query_row(
                    &format!("SELECT {EVENT_COLUMNS} FROM calendar_events WHERE id = ?1"),
                    [&id_str],
                    read_event_row,
                )
                .optional()
                .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

            row.map(row_to_event).transpose()
        })
        .await
        .map_err(|e| StoreError::QueryFailed(e.to_string()))?
    }

    #[instrument(skip(self, draft), fields(event_id = %id, calendar = %calendar))]
    async fn update(
        &self,
        id: &EventId,
        calendar: &CalendarUri,
        draft: &EventDraft,
        remote_id: Option<RemoteEventId>,
        editor: UserId,
    ) -> Result<CalendarEvent, StoreError> {
        let pool = Arc::clone(&self.pool);
        let id_str = id.to_string();
        let calendar = calendar.to_string();
        let draft = draft.clone();
        let now = Utc::now();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(|e| StoreError::QueryFailed(e.to_string()))?;

            let affected = conn
                .execute(
                    "UPDATE calendar_events SET
                        calendar_uri = ?1, subject = ?2, date = ?3, description = ?4,
                        url = ?5, location = ?6, linked_kind = ?7, linked_uri = ?8,
                        remote_id = ?9, modified_by = ?10, updated_at = ?11
                     WHERE id = ?12",
                    params![
                        calendar,
                        draft.subject,
                        draft.date.to_string(),
                        draft.description,
                        draft.url,
                        location_to_json(draft.location.as_ref())?,
                        kind_to_str(draft.linked_resource.kind()),
                        draft.linked_resource.uri(),
                        remote_id.as_ref().map(ToString::to_string),
                        editor.to_string(),
                        now.to_rfc3339(),
                        id_str,
                    ],
                )
                .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

            if affected == 0 {
                return Err(StoreError::QueryFailed(format!(
                    "no calendar event row for {id_str}"
                )));
            }

            let row = conn
                .query_row(
                    &format!("SELECT {EVENT_COLUMNS} FROM calendar_events WHERE id = ?1"),
                    [&id_str],
                    read_event_row,
                )
                .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

            debug!("Updated calendar event");
            row_to_event(row)
        })
        .await
        .map_err(|e| StoreError::QueryFailed(e.to_string()))?
    }

    #[instrument(skip(self), fields(event_id = %id))]
    async fn delete(&self, id: &EventId) -> Result<(), StoreError> {
        let pool = Arc::clone(&self.pool);
        let id_str = id.to_string();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(|e| StoreError::QueryFailed(e.to_string()))?;
            // Deleting an absent row is a no-op; the affected count is not
            // part of the contract.
            conn.execute("DELETE FROM calendar_events WHERE id = ?1", [&id_str])
                .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

            debug!("Deleted calendar event");
            Ok(())
        })
        .await
        .map_err(|e| StoreError::QueryFailed(e.to_string()))?
    }

    #[instrument(skip(self))]
    async fn list_calendars(&self) -> Result<Vec<Calendar>, StoreError> {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(|e| StoreError::QueryFailed(e.to_string()))?;
            let mut stmt = conn
                .prepare("SELECT uri, remote_id FROM calendars ORDER BY uri")
                .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

            let rows = stmt
                .query_map([], |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?))
                })
                .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

            let mut calendars = Vec::new();
            for row in rows {
                let (uri, remote_id) = row.map_err(|e| StoreError::QueryFailed(e.to_string()))?;
                let uri = CalendarUri::new(uri)
                    .map_err(|e| StoreError::MalformedRecord(e.to_string()))?;
                let remote_id = remote_id
                    .map(RemoteCalendarId::new)
                    .transpose()
                    .map_err(|e| StoreError::MalformedRecord(e.to_string()))?;
                calendars.push(Calendar::new(uri, remote_id));
            }

            debug!(count = calendars.len(), "Listed calendars");
            Ok(calendars)
        })
        .await
        .map_err(|e| StoreError::QueryFailed(e.to_string()))?
    }
}

/// Raw event row, read column-wise before domain mapping
struct EventRow {
    id: String,
    uri: String,
    calendar: String,
    subject: String,
    date: String,
    description: Option<String>,
    url: Option<String>,
    location: Option<String>,
    linked_kind: String,
    linked_uri: String,
    remote_id: Option<String>,
    origin: Option<String>,
    created_by: String,
    modified_by: String,
    created_at: String,
    updated_at: String,
}

fn read_event_row(row: &Row<'_>) -> rusqlite::Result<EventRow> {
    Ok(EventRow {
        id: row.get(0)?,
        uri: row.get(1)?,
        calendar: row.get(2)?,
        subject: row.get(3)?,
        date: row.get(4)?,
        description: row.get(5)?,
        url: row.get(6)?,
        location: row.get(7)?,
        linked_kind: row.get(8)?,
        linked_uri: row.get(9)?,
        remote_id: row.get(10)?,
        origin: row.get(11)?,
        created_by: row.get(12)?,
        modified_by: row.get(13)?,
        created_at: row.get(14)?,
        updated_at: row.get(15)?,
    })
}

/// Map a raw row to the domain entity
fn row_to_event(row: EventRow) -> Result<CalendarEvent, StoreError> {
    let id = EventId::parse(&row.id)
        .map_err(|e| StoreError::MalformedRecord(format!("event id: {e}")))?;
    let calendar = CalendarUri::new(row.calendar)
        .map_err(|e| StoreError::MalformedRecord(e.to_string()))?;
    let date: NaiveDate = row
        .date
        .parse()
        .map_err(|e| StoreError::MalformedRecord(format!("event date: {e}")))?;
    let kind = str_to_kind(&row.linked_kind)?;
    let linked_resource = LinkedResource::with_kind(kind, row.linked_uri);
    // A missing remote identifier is a normal row (externally mastered).
    let remote_id = row
        .remote_id
        .map(RemoteEventId::new)
        .transpose()
        .map_err(|e| StoreError::MalformedRecord(e.to_string()))?;
    let location = row
        .location
        .as_deref()
        .map(serde_json::from_str::<Location>)
        .transpose()
        .map_err(|e| StoreError::MalformedRecord(format!("location: {e}")))?;
    let created_by = UserId::parse(&row.created_by)
        .map_err(|e| StoreError::MalformedRecord(format!("created_by: {e}")))?;
    let modified_by = UserId::parse(&row.modified_by)
        .map_err(|e| StoreError::MalformedRecord(format!("modified_by: {e}")))?;
    let created_at = parse_timestamp(&row.created_at)?;
    let updated_at = parse_timestamp(&row.updated_at)?;

    Ok(CalendarEvent {
        id,
        uri: row.uri,
        subject: row.subject,
        date,
        description: row.description,
        url: row.url,
        location,
        linked_resource,
        calendar,
        remote_id,
        origin: row.origin,
        created_by,
        modified_by,
        created_at,
        updated_at,
    })
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::MalformedRecord(format!("timestamp: {e}")))
}

fn location_to_json(location: Option<&Location>) -> Result<Option<String>, StoreError> {
    location
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| StoreError::MalformedRecord(format!("location: {e}")))
}

/// Database string for a linked-resource kind
const fn kind_to_str(kind: LinkedResourceKind) -> &'static str {
    match kind {
        LinkedResourceKind::VisitRequest => "visit_request",
        LinkedResourceKind::Intervention => "intervention",
        LinkedResourceKind::Order => "order",
    }
}

/// Parse a linked-resource kind from its database string
fn str_to_kind(s: &str) -> Result<LinkedResourceKind, StoreError> {
    match s {
        "visit_request" => Ok(LinkedResourceKind::VisitRequest),
        "intervention" => Ok(LinkedResourceKind::Intervention),
        "order" => Ok(LinkedResourceKind::Order),
        other => Err(StoreError::MalformedRecord(format!(
            "unknown linked-resource kind: {other}"
        ))),
    }
}
