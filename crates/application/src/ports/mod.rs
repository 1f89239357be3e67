//! Port definitions for the application layer
//!
//! Ports are the interfaces through which the sync engine reaches its
//! collaborators: the local record store and the remote calendar provider.
//! Adapters in the infrastructure and integration crates implement them.

mod event_store;
mod remote_calendar;

#[cfg(test)]
pub use event_store::MockEventStorePort;
pub use event_store::{EventStorePort, StoreError};
#[cfg(test)]
pub use remote_calendar::MockRemoteCalendarPort;
pub use remote_calendar::{
    CalendarTarget, RemoteCalendarError, RemoteCalendarPort, RemoteEventSnapshot,
    RemoteUpdateOutcome,
};
