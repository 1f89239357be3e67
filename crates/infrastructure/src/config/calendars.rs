//! Calendar routing configuration

use domain::{CalendarUri, DomainError};
use serde::{Deserialize, Serialize};

/// Well-known calendars and local URI minting settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarSyncConfig {
    /// URI of the customer-visit calendar
    #[serde(default = "default_visit_calendar_uri")]
    pub visit_calendar_uri: String,

    /// URI of the general planning calendar
    #[serde(default = "default_planning_calendar_uri")]
    pub planning_calendar_uri: String,

    /// Route every remote operation to the acting user's own calendar
    /// instead of the named shared calendars
    #[serde(default)]
    pub use_personal_calendar: bool,

    /// Base URI under which local event handles are minted
    #[serde(default = "default_event_base_uri")]
    pub event_base_uri: String,

    /// Origin marker stamped on records created by this engine
    #[serde(default = "default_origin")]
    pub origin: String,
}

fn default_visit_calendar_uri() -> String {
    "https://data.example.org/calendars/customer-visits".to_string()
}

fn default_planning_calendar_uri() -> String {
    "https://data.example.org/calendars/planning".to_string()
}

fn default_event_base_uri() -> String {
    "https://data.example.org".to_string()
}

fn default_origin() -> String {
    "calendar-mirror".to_string()
}

impl Default for CalendarSyncConfig {
    fn default() -> Self {
        Self {
            visit_calendar_uri: default_visit_calendar_uri(),
            planning_calendar_uri: default_planning_calendar_uri(),
            use_personal_calendar: false,
            event_base_uri: default_event_base_uri(),
            origin: default_origin(),
        }
    }
}

impl CalendarSyncConfig {
    /// The customer-visit calendar URI, validated
    ///
    /// # Errors
    ///
    /// Returns an error when the configured value is not a valid URI.
    pub fn visit_calendar(&self) -> Result<CalendarUri, DomainError> {
        CalendarUri::new(self.visit_calendar_uri.clone())
    }

    /// The planning calendar URI, validated
    ///
    /// # Errors
    ///
    /// Returns an error when the configured value is not a valid URI.
    pub fn planning_calendar(&self) -> Result<CalendarUri, DomainError> {
        CalendarUri::new(self.planning_calendar_uri.clone())
    }
}
