//! Calendar entity - a named bucket of events

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value_objects::{CalendarUri, LinkedResourceKind, RemoteCalendarId};

/// The kind of calendar an event is routed to
///
/// Determines which configured start hour applies when the remote
/// representation is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarKind {
    /// Calendar holding customer visit appointments
    CustomerVisit,
    /// General planning calendar
    Planning,
}

impl CalendarKind {
    /// The calendar kind an event with the given linkage is routed to.
    ///
    /// Visit requests go to the customer-visit calendar; interventions and
    /// orders go to the planning calendar.
    #[must_use]
    pub const fn for_resource(kind: LinkedResourceKind) -> Self {
        match kind {
            LinkedResourceKind::VisitRequest => Self::CustomerVisit,
            LinkedResourceKind::Intervention | LinkedResourceKind::Order => Self::Planning,
        }
    }

    /// Get a human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::CustomerVisit => "customer visit",
            Self::Planning => "planning",
        }
    }
}

impl fmt::Display for CalendarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A calendar known to the local store
///
/// The remote identifier is absent for calendars that are not mirrored,
/// and deliberately blanked under personal-calendar mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    /// Stable URI identifying the calendar locally
    pub uri: CalendarUri,
    /// Identifier of the mirrored calendar on the remote provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_id: Option<RemoteCalendarId>,
}

impl Calendar {
    /// Create a calendar with a remote mapping
    #[must_use]
    pub const fn new(uri: CalendarUri, remote_id: Option<RemoteCalendarId>) -> Self {
        Self { uri, remote_id }
    }
}
