//! Value objects for the calendar mirror domain

mod calendar_uri;
mod event_id;
mod linked_resource;
mod location;
mod remote_calendar_id;
mod remote_event_id;
mod user_id;

pub use calendar_uri::CalendarUri;
pub use event_id::EventId;
pub use linked_resource::{LinkedResource, LinkedResourceKind};
pub use location::{Location, PostalAddress};
pub use remote_calendar_id::RemoteCalendarId;
pub use remote_event_id::RemoteEventId;
pub use user_id::UserId;
