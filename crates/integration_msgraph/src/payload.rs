//! Graph event payload construction and response mapping
//!
//! Events are whole-day records locally; remotely they occupy a one-hour
//! slot starting at a configured hour that depends on the calendar kind.
//! The instants are wall-clock values in a named provider time zone.

use application::{RemoteCalendarError, RemoteEventSnapshot};
use chrono::NaiveDate;
use domain::{CalendarKind, EventDraft, RemoteEventId};
use serde::{Deserialize, Serialize};

use crate::config::GraphConfig;

/// Wall-clock instant with a provider-named time zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphDateTime {
    pub date_time: String,
    pub time_zone: String,
}

/// HTML event body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphBody {
    pub content_type: String,
    pub content: String,
}

/// Event location
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphLocation {
    pub display_name: String,
}

/// Outgoing event representation
///
/// `start` and `end` are omitted entirely on content-only updates so the
/// provider keeps the existing time slot untouched.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEventPayload {
    pub subject: String,
    pub body: GraphBody,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<GraphDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<GraphDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GraphLocation>,
    pub is_reminder_on: bool,
}

/// Incoming event representation, reduced to what the engine reconciles
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEventResource {
    pub id: String,
    #[serde(default)]
    pub start: Option<GraphDateTime>,
}

impl GraphEventResource {
    /// Map the provider resource to the snapshot the engine works with
    ///
    /// # Errors
    ///
    /// Fails when the identifier is empty or the start instant is missing
    /// or unparseable.
    pub fn into_snapshot(self) -> Result<RemoteEventSnapshot, RemoteCalendarError> {
        let id = RemoteEventId::new(self.id)
            .map_err(|e| RemoteCalendarError::ParseError(e.to_string()))?;
        let start = self.start.ok_or_else(|| {
            RemoteCalendarError::ParseError("event resource has no start instant".to_string())
        })?;
        let date = parse_event_date(&start.date_time)?;
        Ok(RemoteEventSnapshot { id, date })
    }
}

/// Extract the calendar day from a wall-clock instant string
fn parse_event_date(date_time: &str) -> Result<NaiveDate, RemoteCalendarError> {
    let day = date_time.get(..10).ok_or_else(|| {
        RemoteCalendarError::ParseError(format!("instant too short: {date_time}"))
    })?;
    day.parse().map_err(|_| {
        RemoteCalendarError::ParseError(format!("invalid instant: {date_time}"))
    })
}

/// The configured start hour for a calendar kind
pub const fn start_hour(config: &GraphConfig, kind: CalendarKind) -> u32 {
    match kind {
        CalendarKind::CustomerVisit => config.visit_start_hour,
        CalendarKind::Planning => config.planning_start_hour,
    }
}

/// A wall-clock instant at the given hour on the event's day
fn graph_instant(config: &GraphConfig, date: NaiveDate, hour: u32) -> GraphDateTime {
    GraphDateTime {
        date_time: format!("{date}T{hour:02}:00:00"),
        time_zone: config.time_zone.clone(),
    }
}

/// Compose the HTML body from the description and the reference link
fn html_body(config: &GraphConfig, draft: &EventDraft) -> String {
    let mut body = String::new();
    if let Some(description) = &draft.description {
        body.push_str(&format!("<p>{description}</p>"));
    }
    if let Some(url) = &draft.url {
        body.push_str(&format!(
            "<p>{}: <a href=\"{url}\">{url}</a></p>",
            config.reference_label
        ));
    }
    body
}

/// Build the outgoing payload for an event.
///
/// With `include_schedule` the one-hour slot is computed from the event
/// date and the kind's configured hour; without it the slot fields are
/// absent and only content fields travel.
pub fn build_payload(
    config: &GraphConfig,
    kind: CalendarKind,
    draft: &EventDraft,
    include_schedule: bool,
) -> GraphEventPayload {
    let (start, end) = if include_schedule {
        let hour = start_hour(config, kind);
        (
            Some(graph_instant(config, draft.date, hour)),
            Some(graph_instant(config, draft.date, hour + 1)),
        )
    } else {
        (None, None)
    };

    GraphEventPayload {
        subject: draft.subject.clone(),
        body: GraphBody {
            content_type: "html".to_string(),
            content: html_body(config, draft),
        },
        start,
        end,
        location: draft.location.as_ref().map(|location| GraphLocation {
            display_name: location.display_name(),
        }),
        is_reminder_on: false,
    }
}
