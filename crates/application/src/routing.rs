//! Calendar routing - which calendar an event belongs to, and how to
//! address it remotely
//!
//! The registry is an immutable lookup table built once at startup from
//! the record store and passed by reference (`Arc`) into the services.
//! Nothing mutates it afterwards; a refresh is an explicit re-load that
//! constructs a new registry.

use std::collections::HashMap;

use domain::{CalendarKind, CalendarUri, LinkedResource, RemoteCalendarId};
use tracing::{debug, info};

use crate::error::ApplicationError;
use crate::ports::{CalendarTarget, EventStorePort};

/// The routing decision for one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedCalendar {
    /// The owning calendar's URI
    pub calendar: CalendarUri,
    /// The calendar kind, which selects the remote start hour
    pub kind: CalendarKind,
}

/// Immutable calendar lookup table
///
/// Maps calendar URIs to their remote identifiers and knows the two
/// well-known calendars events are routed to. Under personal-calendar
/// mode every remote operation addresses the acting user's own calendar
/// and the mapped identifiers are ignored.
#[derive(Debug, Clone)]
pub struct CalendarRegistry {
    visit_calendar: CalendarUri,
    planning_calendar: CalendarUri,
    personal_mode: bool,
    remote_ids: HashMap<CalendarUri, RemoteCalendarId>,
}

impl CalendarRegistry {
    /// Build a registry from an explicit mapping
    #[must_use]
    pub fn new(
        visit_calendar: CalendarUri,
        planning_calendar: CalendarUri,
        personal_mode: bool,
        remote_ids: HashMap<CalendarUri, RemoteCalendarId>,
    ) -> Self {
        Self {
            visit_calendar,
            planning_calendar,
            personal_mode,
            remote_ids,
        }
    }

    /// Build the registry by reading all calendar mappings from the store.
    ///
    /// Intended to run once at startup; the result is immutable.
    ///
    /// # Errors
    ///
    /// Returns a store error when the calendar listing fails.
    pub async fn load(
        store: &dyn EventStorePort,
        visit_calendar: CalendarUri,
        planning_calendar: CalendarUri,
        personal_mode: bool,
    ) -> Result<Self, ApplicationError> {
        let calendars = store.list_calendars().await?;
        let remote_ids: HashMap<CalendarUri, RemoteCalendarId> = calendars
            .into_iter()
            .filter_map(|calendar| calendar.remote_id.map(|id| (calendar.uri, id)))
            .collect();

        info!(
            mappings = remote_ids.len(),
            personal_mode, "Loaded calendar registry"
        );

        Ok(Self::new(
            visit_calendar,
            planning_calendar,
            personal_mode,
            remote_ids,
        ))
    }

    /// Resolve a bare resource reference to a typed linked resource.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Routing`] when the reference does not
    /// identify any known resource kind.
    pub fn resolve_reference(&self, reference: &str) -> Result<LinkedResource, ApplicationError> {
        LinkedResource::from_uri(reference).map_err(|e| ApplicationError::Routing(e.to_string()))
    }

    /// The calendar an event with the given linkage is routed to
    #[must_use]
    pub fn route(&self, resource: &LinkedResource) -> RoutedCalendar {
        let kind = CalendarKind::for_resource(resource.kind());
        let calendar = match kind {
            CalendarKind::CustomerVisit => self.visit_calendar.clone(),
            CalendarKind::Planning => self.planning_calendar.clone(),
        };
        debug!(resource = %resource, calendar = %calendar, "Routed event");
        RoutedCalendar { calendar, kind }
    }

    /// How remote operations should address the given calendar.
    ///
    /// Under personal-calendar mode this is always the current user's own
    /// calendar - a valid directive, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::MissingCalendarLink`] when personal
    /// mode is off and the calendar has no remote mapping.
    pub fn target(&self, calendar: &CalendarUri) -> Result<CalendarTarget, ApplicationError> {
        if self.personal_mode {
            return Ok(CalendarTarget::CurrentUser);
        }
        self.remote_ids
            .get(calendar)
            .cloned()
            .map(CalendarTarget::Named)
            .ok_or_else(|| ApplicationError::MissingCalendarLink(calendar.clone()))
    }

    /// The remote identifier mapped to a calendar, if any
    #[must_use]
    pub fn remote_calendar_id(&self, calendar: &CalendarUri) -> Option<&RemoteCalendarId> {
        self.remote_ids.get(calendar)
    }
}
